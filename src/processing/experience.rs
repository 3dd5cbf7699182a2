//! Years-of-experience extraction

use regex::Regex;

/// Scans raw text for claims like "5 years experience" or "3 yrs of experience".
///
/// Must run on raw text: normalization strips the digits.
pub struct ExperienceExtractor {
    pattern: Regex,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceExtractor {
    pub fn new() -> Self {
        let pattern = Regex::new(r"(?i)([0-9]+)\s*(?:years?|yrs?)\s*(?:of)?\s*experience")
            .expect("Invalid experience regex");
        Self { pattern }
    }

    /// The largest claimed tenure, or 0 when nothing matches.
    ///
    /// Claims are not summed: a summary line and a job entry usually describe
    /// overlapping periods. Numbers too large for `u32` saturate.
    pub fn extract_years(&self, raw_text: &str) -> u32 {
        let lowered = raw_text.to_lowercase();
        self.pattern
            .captures_iter(&lowered)
            .filter_map(|caps| caps.get(1))
            .map(|digits| digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
            .max()
            .unwrap_or(0)
    }
}

//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisOutput, FitLevel, RankingOutput};
use crate::processing::matcher::MatchReport;
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_analysis(&self, output: &AnalysisOutput) -> Result<String>;
    fn format_ranking(&self, ranking: &RankingOutput) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn join_or_none(items: &BTreeSet<String>) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_fit_badge(&self, percentage: f64) -> String {
        let level = FitLevel::from_percentage(percentage);
        let color = match level {
            FitLevel::Strong => Color::Green,
            FitLevel::Partial => Color::Yellow,
            FitLevel::Weak => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", level.label().color(color).bold())
        } else {
            format!("[{}]", level.label())
        }
    }

    fn format_scores(&self, report: &MatchReport, output: &mut String) {
        output.push_str(&format!(
            "Overall Match: {:.1}% {}\n",
            report.overall_match_percentage,
            self.format_fit_badge(report.overall_match_percentage)
        ));
        output.push_str(&format!("  • Skills:     {:.1}%\n", report.skills_match_percentage));
        output.push_str(&format!("  • Education:  {:.1}%\n", report.education_match_percentage));
        output.push_str(&format!("  • Experience: {:.1}%\n", report.experience_match_percentage));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_analysis(&self, output: &AnalysisOutput) -> Result<String> {
        let report = &output.report;
        let mut text = String::new();

        text.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        text.push_str(&format!(
            "Generated: {}\n",
            output.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        text.push_str(&format!("Resume: {}\n", output.resume_source));
        text.push_str(&format!("Job Description: {}\n", output.job_source));

        text.push_str(&self.format_header("Scores", 2));
        self.format_scores(report, &mut text);

        text.push_str(&self.format_header("Skills", 2));
        text.push_str(&format!(
            "{} {}\n",
            self.colorize("Matching:", Color::Green),
            join_or_none(&report.matching_skills)
        ));
        text.push_str(&format!(
            "{} {}\n",
            self.colorize("Missing:", Color::Red),
            join_or_none(&report.missing_skills)
        ));
        text.push_str(&format!(
            "{} {}\n",
            self.colorize("Extra:", Color::Cyan),
            join_or_none(&report.extra_skills)
        ));

        text.push_str(&self.format_header("Details", 2));
        text.push_str(&report.analysis_details);
        text.push('\n');

        if self.detailed {
            text.push_str(&self.format_header("Extracted Profiles", 3));
            text.push_str(&format!(
                "Resume: {} years, education: {}\n",
                report.resume_profile.experience_years,
                report.resume_profile.education.join(", ")
            ));
            text.push_str(&format!(
                "Job:    {} years, education: {}\n",
                report.job_profile.experience_years,
                report.job_profile.education.join(", ")
            ));

            text.push_str(&self.format_header("Resume Summary", 3));
            text.push_str(&report.resume_summary);
            text.push('\n');
            text.push_str(&self.format_header("Job Description Summary", 3));
            text.push_str(&report.job_description_summary);
            text.push('\n');
        }

        Ok(text)
    }

    fn format_ranking(&self, ranking: &RankingOutput) -> Result<String> {
        let mut text = String::new();

        text.push_str(&self.format_header("RESUME RANKING", 1));
        text.push_str(&format!(
            "Generated: {}\n",
            ranking.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        text.push_str(&format!("Job Description: {}\n\n", ranking.job_source));

        for entry in &ranking.entries {
            let report = &entry.report;
            text.push_str(&format!(
                "{:>3}. {} {:.1}% {} (skills {:.1}%, education {:.1}%, experience {:.1}%)\n",
                entry.rank,
                self.colorize(&entry.resume_source, Color::Cyan),
                report.overall_match_percentage,
                self.format_fit_badge(report.overall_match_percentage),
                report.skills_match_percentage,
                report.education_match_percentage,
                report.experience_match_percentage
            ));
            if self.detailed {
                text.push_str(&format!("     Missing skills: {}\n", join_or_none(&report.missing_skills)));
            }
        }

        Ok(text)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_analysis(&self, output: &AnalysisOutput) -> Result<String> {
        self.to_json(output)
    }

    fn format_ranking(&self, ranking: &RankingOutput) -> Result<String> {
        self.to_json(ranking)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_list(items: &BTreeSet<String>) -> String {
        if items.is_empty() {
            "_none_\n".to_string()
        } else {
            items.iter().map(|item| format!("- {}\n", item)).collect()
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_analysis(&self, output: &AnalysisOutput) -> Result<String> {
        let report = &output.report;
        let mut text = String::new();

        text.push_str("# Resume Match Analysis\n\n");
        if self.include_metadata {
            text.push_str(&format!(
                "_Generated {}_\n\n",
                output.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            text.push_str(&format!("- **Resume:** {}\n", output.resume_source));
            text.push_str(&format!("- **Job description:** {}\n\n", output.job_source));
        }

        text.push_str("## Scores\n\n");
        text.push_str("| Dimension | Match |\n|---|---|\n");
        text.push_str(&format!("| Overall | {:.1}% |\n", report.overall_match_percentage));
        text.push_str(&format!("| Skills | {:.1}% |\n", report.skills_match_percentage));
        text.push_str(&format!("| Education | {:.1}% |\n", report.education_match_percentage));
        text.push_str(&format!("| Experience | {:.1}% |\n\n", report.experience_match_percentage));
        text.push_str(&format!(
            "**{}**\n\n",
            FitLevel::from_percentage(report.overall_match_percentage).label()
        ));

        text.push_str("## Matching Skills\n\n");
        text.push_str(&Self::skill_list(&report.matching_skills));
        text.push_str("\n## Missing Skills\n\n");
        text.push_str(&Self::skill_list(&report.missing_skills));
        text.push_str("\n## Extra Skills\n\n");
        text.push_str(&Self::skill_list(&report.extra_skills));

        text.push_str("\n## Details\n\n");
        text.push_str(&report.analysis_details);
        text.push_str("\n\n## Summaries\n\n");
        text.push_str(&format!("**Resume:** {}\n\n", report.resume_summary));
        text.push_str(&format!("**Job description:** {}\n", report.job_description_summary));

        Ok(text)
    }

    fn format_ranking(&self, ranking: &RankingOutput) -> Result<String> {
        let mut text = String::new();

        text.push_str("# Resume Ranking\n\n");
        if self.include_metadata {
            text.push_str(&format!(
                "_Generated {}_ against **{}**\n\n",
                ranking.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                ranking.job_source
            ));
        }

        text.push_str("| Rank | Resume | Overall | Skills | Education | Experience |\n");
        text.push_str("|---|---|---|---|---|---|\n");
        for entry in &ranking.entries {
            let report = &entry.report;
            text.push_str(&format!(
                "| {} | {} | {:.1}% | {:.1}% | {:.1}% | {:.1}% |\n",
                entry.rank,
                entry.resume_source,
                report.overall_match_percentage,
                report.skills_match_percentage,
                report.education_match_percentage,
                report.experience_match_percentage
            ));
        }

        Ok(text)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_analysis(&self, output: &AnalysisOutput, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_analysis(output)
    }

    pub fn generate_ranking(&self, ranking: &RankingOutput, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(ranking)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    match format {
        OutputFormat::Console => format!("{}_match.txt", base_name),
        OutputFormat::Json => format!("{}_match.json", base_name),
        OutputFormat::Markdown => format!("{}_match.md", base_name),
    }
}

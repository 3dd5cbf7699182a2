//! Output formatting and report envelopes

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{AnalysisOutput, RankingOutput};

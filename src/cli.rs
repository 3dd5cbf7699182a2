//! CLI interface for the resume matcher

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Score how well a resume matches a job description")]
#[command(long_about = "Extract skills, education and experience from a resume and a job description, then report keyword overlap and TF-IDF text similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match one resume against a job description
    #[command(group(ArgGroup::new("job_source").required(true).args(["job", "job_text"])))]
    Analyze {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description as plain text
        #[arg(long)]
        job_text: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank several resumes against one job description
    #[command(group(ArgGroup::new("job_source").required(true).args(["job", "job_text"])))]
    Rank {
        /// Resume files (PDF, DOCX)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Path to job description file (PDF, DOCX)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description as plain text
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the reference skill and degree vocabularies
    Vocabulary {
        /// Show only skills
        #[arg(long)]
        skills: bool,

        /// Show only degree terms
        #[arg(long)]
        degrees: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_analyze_requires_job_source() {
        assert!(Cli::try_parse_from(["resume-matcher", "analyze", "--resume", "cv.pdf"]).is_err());

        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "Python developer",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { job, job_text, .. } => {
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Python developer"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_rank_collects_resumes() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "--verbose",
            "rank",
            "--job",
            "job.docx",
            "a.pdf",
            "b.docx",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Rank { resumes, .. } => assert_eq!(resumes.len(), 2),
            _ => panic!("expected rank"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }
}

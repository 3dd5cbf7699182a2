//! Resume matcher: score resumes against job descriptions

use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::input::manager::job_description_text;
use resume_matcher::input::{AnalysisRequest, InputManager, JobDescription};
use resume_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_matcher::output::{AnalysisOutput, RankingOutput};
use resume_matcher::processing::MatchEngine;
use resume_matcher::MatcherError;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            detailed,
            output,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let engine = build_engine(&config)?;
            let input_manager = InputManager::new().with_cache(config.processing.enable_caching);

            let resume_document = input_manager
                .load_document(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let job_document = match &job {
                Some(path) => Some(
                        input_manager
                            .load_document(path)
                            .await
                            .with_context(|| format!("Failed to read job description {}", path.display()))?,
                ),
                None => None,
            };

            let request = AnalysisRequest::new(Some(resume_document), job_document, job_text)?;
            info!("Analyzing {} against {}", resume.display(), job_source_name(&job));
            let report = engine
                .analyze_request(&request)
                .context("Resume analysis failed")?;

            let analysis = AnalysisOutput::new(resume.display().to_string(), job_source_name(&job), report);
            let detailed = detailed || config.output.detailed;

            match save {
                Some(path) => {
                    let generator = ReportGenerator::with_options(false, detailed, true, true);
                    let content = generator.generate_analysis(&analysis, format)?;
                    let path = resolve_save_path(path, format, &resume);
                    save_report_to_file(&content, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => {
                    let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
                    println!("{}", generator.generate_analysis(&analysis, format)?);
                }
            }
        }

        Commands::Rank {
            resumes,
            job,
            job_text,
            output,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let engine = Arc::new(build_engine(&config)?);
            let mut input_manager = InputManager::new().with_cache(config.processing.enable_caching);

            let job_raw = match (&job, job_text) {
                (Some(path), _) => input_manager
                    .extract_text(path)
                    .await
                    .with_context(|| format!("Failed to extract job description {}", path.display()))?,
                (None, Some(text)) if !text.is_empty() => job_description_text(&JobDescription::Text(text))?,
                _ => {
                    return Err(MatcherError::MissingInput("a job description document or text is required").into())
                }
            };
            let job_raw = Arc::new(job_raw);

            let mut documents = Vec::with_capacity(resumes.len());
            for resume in &resumes {
                match input_manager.load_document(resume).await {
                    Ok(document) => documents.push((resume.display().to_string(), document)),
                    Err(e) => warn!("Skipping {}: {}", resume.display(), e),
                }
            }

            let mut results = Vec::with_capacity(documents.len());
            for (source, report) in engine.analyze_resumes(documents, job_raw).await {
                match report {
                    Ok(report) => results.push((source, report)),
                    Err(e) => warn!("Skipping {}: {}", source, e),
                }
            }
            if results.is_empty() {
                bail!("None of the {} resumes could be analyzed", resumes.len());
            }
            debug!("Ranked {} of {} resumes", results.len(), resumes.len());

            let ranking = RankingOutput::new(job_source_name(&job), results);
            match save {
                Some(path) => {
                    let generator = ReportGenerator::with_options(false, config.output.detailed, true, true);
                    let content = generator.generate_ranking(&ranking, format)?;
                    save_report_to_file(&content, &path)
                        .with_context(|| format!("Failed to save ranking to {}", path.display()))?;
                    println!("Ranking saved to {}", path.display());
                }
                None => {
                    let generator = ReportGenerator::with_options(
                        config.output.color_output,
                        config.output.detailed,
                        true,
                        true,
                    );
                    println!("{}", generator.generate_ranking(&ranking, format)?);
                }
            }
        }

        Commands::Vocabulary { skills, degrees } => {
            let vocabulary = config
                .load_vocabulary()
                .context("Failed to load reference vocabulary")?;
            let show_all = !skills && !degrees;

            if skills || show_all {
                println!("Skills ({}):", vocabulary.skills.len());
                for skill in &vocabulary.skills {
                    println!("  • {}", skill);
                }
            }
            if degrees || show_all {
                if show_all {
                    println!();
                }
                println!("Degree terms ({}):", vocabulary.degrees.len());
                for degree in &vocabulary.degrees {
                    println!("  • {}", degree);
                }
            }
        }

        Commands::Config { action } => {
            let path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration file: {}\n", path.display());
                    let vocabulary_source = match &config.vocabulary.vocabulary_file {
                        Some(file) => file.display().to_string(),
                        None => "built-in".to_string(),
                    };
                    println!("Vocabulary: {}", vocabulary_source);
                    println!("Summary length: {} characters", config.processing.summary_length);
                    println!("Text caching: {}", config.processing.enable_caching);
                    println!("Output format: {:?}", config.output.format);
                    println!("Detailed output: {}", config.output.detailed);
                    println!("Colored output: {}", config.output.color_output);
                }

                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Configuration reset to defaults at {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn build_engine(config: &Config) -> anyhow::Result<MatchEngine> {
    let vocabulary = config
        .load_vocabulary()
        .context("Failed to load reference vocabulary")?;
    let engine = MatchEngine::new(&vocabulary)
        .context("Failed to build vocabulary matchers")?
        .with_summary_length(config.processing.summary_length);
    debug!(
        "Match engine ready: {} skills, {} degree terms",
        engine.skill_vocabulary_size(),
        engine.degree_vocabulary_size()
    );
    Ok(engine)
}

fn resolve_format(flag: Option<&str>, config: &Config) -> anyhow::Result<OutputFormat> {
    match flag {
        Some(value) => cli::parse_output_format(value).map_err(|e| MatcherError::InvalidInput(e).into()),
        None => Ok(config.output.format),
    }
}

fn job_source_name(job: &Option<PathBuf>) -> String {
    match job {
        Some(path) => path.display().to_string(),
        None => "inline job description".to_string(),
    }
}

/// A directory target gets a file name derived from the resume.
fn resolve_save_path(path: PathBuf, format: OutputFormat, resume: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, &resume.to_string_lossy()))
    } else {
        path
    }
}

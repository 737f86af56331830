// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scraper::Html;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Settings, DEFAULT_SETTINGS_PATH};
use crate::core::template_engine;
use crate::proposal_service::ProposalService;

#[derive(Parser)]
#[command(name = "proposal-drafter")]
#[command(about = "Extract Upwork job pages and draft cover letters and proposal answers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the job record from a saved job page
    Extract { page: PathBuf },
    /// List job cards on a saved search page with their freshness tier
    Scan { page: PathBuf },
    /// List template variables
    Variables,
    /// Render the cover letter template against a job page
    Render {
        page: PathBuf,
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Print the prompt that would be sent, without calling the API
    Prompt {
        page: PathBuf,
        #[arg(long)]
        question: Option<String>,
    },
    /// Generate a cover letter for a job page
    CoverLetter { page: PathBuf },
    /// Answer proposal questions found on an apply page
    Answer {
        page: PathBuf,
        /// Job detail page to take job data from, if different from PAGE
        #[arg(long)]
        job: Option<PathBuf>,
        /// Answer this question instead of the ones found on the page
        #[arg(long)]
        question: Option<String>,
    },
    /// Check the configured API key
    TestKey,
}

fn load_page(path: &Path) -> Result<Html> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page: {}", path.display()))?;
    Ok(Html::parse_document(&content))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(Some(&cli.config))?;

    if let Command::Render {
        template: Some(path),
        ..
    } = &cli.command
    {
        settings.template = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
    }

    let service = ProposalService::new(settings);

    match cli.command {
        Command::Extract { page } => {
            let (job, valid) = service.extractor().extract_validated(&load_page(&page)?);
            print_json(&job)?;
            if valid {
                info!("Extracted {} fields", job.field_count());
            } else {
                warn!("No job title or description found in {}", page.display());
            }
        }

        Command::Scan { page } => {
            let cards = service.scanner().scan(&load_page(&page)?);
            for card in &cards {
                println!(
                    "{}\t{}\t{}\t{}",
                    card.job_id,
                    card.tier.map(|t| t.label()).unwrap_or("-"),
                    card.posting_time.as_deref().unwrap_or("-"),
                    card.title.as_deref().unwrap_or_default()
                );
            }
            info!("{} job cards", cards.len());
        }

        Command::Variables => {
            for variable in template_engine::available_variables() {
                println!("{{{{{}}}}}\t{}", variable.name, variable.description);
            }
        }

        Command::Render { page, .. } => {
            let job = service.extract_job(&load_page(&page)?);
            println!("{}", service.render_template(&job));
        }

        Command::Prompt { page, question } => {
            let job = service.extract_job(&load_page(&page)?);
            let prompt = match question {
                Some(question) => service.prepare_question_prompt(&question, &job)?,
                None => service.prepare_cover_letter_prompt(&job)?,
            };
            print_json(&prompt)?;
        }

        Command::CoverLetter { page } => {
            let job = service.extract_job(&load_page(&page)?);
            let letter = service.generate_cover_letter(&job).await?;
            println!("{}", letter);
        }

        Command::Answer {
            page,
            job,
            question,
        } => {
            let apply_page = load_page(&page)?;
            let job_record = match job {
                Some(job_page) => service.extract_job(&load_page(&job_page)?),
                None => service.extract_job(&apply_page),
            };

            let questions: Vec<String> = match question {
                Some(question) => vec![question],
                None => service
                    .extract_questions(&apply_page)
                    .into_iter()
                    .map(|q| q.question)
                    .collect(),
            };

            if questions.is_empty() {
                warn!("No unanswered questions found in {}", page.display());
                return Ok(());
            }

            for question in questions {
                match service.generate_question_answer(&question, &job_record).await {
                    Ok(answer) => println!("Q: {}\nA: {}\n", question, answer),
                    Err(e) => {
                        warn!("Failed to answer '{}': {:#}", question, e);
                        println!("Q: {}\nA: (error: {})\n", question, e);
                    }
                }
            }
        }

        Command::TestKey => {
            let status = service.test_api_key().await?;
            println!("{}", status.message);
            if !status.valid {
                anyhow::bail!("API key check failed");
            }
        }
    }

    Ok(())
}

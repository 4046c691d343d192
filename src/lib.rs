use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

pub mod config;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod interview;
pub mod session;

use crate::config::Settings;
use crate::dashboard::SortBy;
use crate::interview::InterviewEngine;
use crate::session::{spawn_engine, JsonFileStore};

pub use crate::error::{InterviewError, Result as InterviewResult};

#[derive(Parser, Debug)]
#[command(name = "crisp-interview", version, about = "Timed mock interviews with a reviewer dashboard")]
pub struct Cli {
    /// Settings file; `crisp.toml` in the working directory is used when present
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take an interview in the terminal, or pick up an unfinished one
    Interview {
        /// Resume file whose raw text is attached to a new candidate
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// List candidates for review
    Dashboard {
        /// Match against name or email (saved for next time)
        #[arg(long)]
        search: Option<String>,
        /// score, name or date (saved for next time)
        #[arg(long)]
        sort: Option<SortBy>,
    },
    /// Show one candidate's questions, answers and summary
    Show { id: String },
}

pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    info!("Crisp interview starting...");

    let bank = settings.question_bank().context("failed to load question bank")?;
    bank.validate()?;

    let mut engine = InterviewEngine::new(bank).with_store(JsonFileStore::new(&settings.state_path));
    engine
        .restore()
        .with_context(|| format!("failed to read saved state {}", settings.state_path.display()))?;

    let engine = spawn_engine(engine, settings.tick_period())?;

    match cli.command {
        Command::Interview { resume } => console::run_interview(engine, resume.as_deref()).await,
        Command::Dashboard { search, sort } => {
            console::show_dashboard(&engine, search, sort);
            Ok(())
        }
        Command::Show { id } => console::show_candidate(&engine, &id),
    }
}

use std::path::PathBuf;
use std::time::Duration;

use ::config::{Config, Environment, File};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interview::QuestionBank;

pub const DEFAULT_CONFIG_FILE: &str = "crisp";
pub const ENV_PREFIX: &str = "CRISP";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// File holding the persisted interview state.
    pub state_path: PathBuf,
    /// Countdown period in milliseconds.
    pub tick_millis: u64,
    /// Optional JSON file replacing the built-in question pools.
    pub question_bank: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            state_path: PathBuf::from("crisp-interview-store.json"),
            tick_millis: 1000,
            question_bank: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then `crisp.{toml,json,..}` (or `file`), then `CRISP_*` variables.
    pub fn load(file: Option<&str>) -> Result<Self> {
        let defaults = Settings::default();

        let settings = Config::builder()
            .set_default("state_path", defaults.state_path.to_string_lossy().to_string())?
            .set_default("tick_millis", defaults.tick_millis as i64)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name(file.unwrap_or(DEFAULT_CONFIG_FILE)).required(file.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    pub fn question_bank(&self) -> Result<QuestionBank> {
        match &self.question_bank {
            Some(path) => {
                info!("📚 Loading question bank from {}", path.display());
                QuestionBank::from_json_file(path)
            }
            None => Ok(QuestionBank::default()),
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::Candidate;
use crate::dashboard::SortBy;
use crate::error::Result;

/// The single persisted document: candidate records plus reviewer preferences.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub current_candidate_id: Option<String>,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub sort_by: SortBy,
}

pub trait StateStore: Send {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedState>>;
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// Stores the document as pretty JSON, replacing it atomically on each save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            info!("📂 No saved state at {}, starting fresh", self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let state: PersistedState = serde_json::from_str(&contents)?;
        info!(
            "📂 Loaded {} candidates from {}",
            state.candidates.len(),
            self.path.display()
        );
        Ok(Some(state))
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, json.as_bytes())?;
        std::fs::rename(&tmp_path, &self.path)?;

        debug!("💾 State saved to {}", self.path.display());
        Ok(())
    }
}

/// In-process store. Clones share the same document.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Arc<Mutex<Option<String>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: &PersistedState) -> Result<Self> {
        let store = Self::new();
        *store.document.lock() = Some(serde_json::to_string(state)?);
        Ok(store)
    }

    /// Raw JSON of the last save.
    pub fn document(&self) -> Option<String> {
        self.document.lock().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>> {
        match self.document.lock().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        *self.document.lock() = Some(serde_json::to_string(state)?);
        *self.saves.lock() += 1;
        Ok(())
    }
}

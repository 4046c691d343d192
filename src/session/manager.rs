use chrono::Utc;
use indexmap::IndexMap;
use log::info;

use super::{Candidate, CandidateStatus, CandidateUpdate};
use crate::error::{InterviewError, Result};

/// Owns every candidate record, in creation order. There is no delete.
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    candidates: IndexMap<String, Candidate>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        CandidateRegistry {
            candidates: candidates.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    pub fn create(&mut self, resume_text: Option<String>) -> String {
        let candidate = Candidate::new(resume_text);
        let id = candidate.id.clone();
        info!("👤 Created candidate {} ({})", id, candidate.status);
        self.candidates.insert(id.clone(), candidate);
        id
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.candidates.contains_key(id)
    }

    /// Merges contact fields. A candidate still collecting info moves to
    /// `not-started` once name, email and phone are all filled in.
    pub fn update(&mut self, id: &str, update: CandidateUpdate) -> Result<&Candidate> {
        self.modify(id, |candidate| {
            if let Some(name) = update.name {
                candidate.name = Some(name);
            }
            if let Some(email) = update.email {
                candidate.email = Some(email);
            }
            if let Some(phone) = update.phone {
                candidate.phone = Some(phone);
            }
            if candidate.status == CandidateStatus::CollectingInfo && candidate.has_contact_info() {
                candidate.status = CandidateStatus::NotStarted;
                info!("📇 Contact details complete for {}", candidate.id);
            }
        })?;
        self.get(id).ok_or_else(|| InterviewError::CandidateNotFound(id.to_string()))
    }

    /// Applies `f` to the record and refreshes `updated_at`.
    pub(crate) fn modify<R>(&mut self, id: &str, f: impl FnOnce(&mut Candidate) -> R) -> Result<R> {
        let candidate = self
            .candidates
            .get_mut(id)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.to_string()))?;
        let result = f(candidate);
        candidate.updated_at = Utc::now();
        Ok(result)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    pub fn to_vec(&self) -> Vec<Candidate> {
        self.candidates.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

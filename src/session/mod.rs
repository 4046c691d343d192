pub mod manager;
pub mod sync;
pub mod ticker;

pub use manager::*;
pub use sync::*;
pub use ticker::*;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::{Answer, Question};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateStatus {
    NotStarted,
    CollectingInfo,
    InProgress,
    Completed,
    Paused,
}

impl CandidateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::NotStarted => "not-started",
            CandidateStatus::CollectingInfo => "collecting-info",
            CandidateStatus::InProgress => "in-progress",
            CandidateStatus::Completed => "completed",
            CandidateStatus::Paused => "paused",
        }
    }

    /// A session the candidate walked away from mid-interview.
    pub fn is_unfinished(self) -> bool {
        matches!(self, CandidateStatus::InProgress | CandidateStatus::Paused)
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    pub status: CandidateStatus,
    pub current_question_index: usize,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn new(resume_text: Option<String>) -> Self {
        let now = Utc::now();
        let status = match resume_text.as_deref() {
            Some(text) if !text.is_empty() => CandidateStatus::CollectingInfo,
            _ => CandidateStatus::NotStarted,
        };

        Candidate {
            id: format!("candidate-{}", Uuid::new_v4()),
            name: None,
            email: None,
            phone: None,
            resume_text,
            status,
            current_question_index: 0,
            questions: Vec::new(),
            answers: Vec::new(),
            final_score: None,
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn has_contact_info(&self) -> bool {
        [&self.name, &self.email, &self.phone]
            .iter()
            .all(|field| field.as_deref().map_or(false, |v| !v.trim().is_empty()))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unnamed candidate")
    }
}

/// Contact fields merged by `update_candidate`; `None` leaves a field as is.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
    System,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        ChatMessage {
            id: format!("msg-{}", Uuid::new_v4()),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

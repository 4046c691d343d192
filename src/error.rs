use thiserror::Error;

use crate::session::CandidateStatus;

#[derive(Error, Debug)]
pub enum InterviewError {
    #[error("No current candidate selected")]
    NoCurrentCandidate,
    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),
    #[error("No current question for candidate: {0}")]
    NoCurrentQuestion(String),
    #[error("Cannot {operation} candidate {id} while {status}")]
    InvalidState {
        id: String,
        status: CandidateStatus,
        operation: &'static str,
    },
    #[error("Question pool error: {0}")]
    QuestionPool(String),
    #[error("Question has no score yet: {0}")]
    UnscoredQuestion(String),
    #[error("Runtime unavailable: {0}")]
    Runtime(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, InterviewError>;

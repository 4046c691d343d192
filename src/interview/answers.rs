use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::Question;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub text: String, // empty when the timer ran out
    pub time_spent: u32, // in seconds
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub score: u8, // 0-10
    pub feedback: Option<String>,
}

/// Grades a submitted answer. Injected into the engine so a real grader can replace the placeholder.
pub trait AnswerEvaluator: Send {
    fn evaluate(&mut self, question: &Question, answer: &Answer) -> Evaluation;
}

/// Placeholder grading: a uniform integer in 5..=10, regardless of the answer.
pub struct RandomEvaluator {
    rng: StdRng,
}

impl RandomEvaluator {
    pub const MIN_SCORE: u8 = 5;
    pub const MAX_SCORE: u8 = 10;

    pub fn new() -> Self {
        RandomEvaluator { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomEvaluator { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerEvaluator for RandomEvaluator {
    fn evaluate(&mut self, _question: &Question, _answer: &Answer) -> Evaluation {
        Evaluation {
            score: self.rng.gen_range(Self::MIN_SCORE..=Self::MAX_SCORE),
            feedback: None,
        }
    }
}

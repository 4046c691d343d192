use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{InterviewError, Result};

/// Questions drawn from each tier when an interview starts.
pub const QUESTIONS_PER_TIER: usize = 2;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tier order used when building a question set.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Seconds allowed to answer a question of this tier.
    pub fn time_limit(self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 60,
            Difficulty::Hard => 120,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub difficulty: Difficulty,
    pub time_limit: u32, // in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>, // 0-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Question {
    pub fn new(difficulty: Difficulty, index: usize, text: String) -> Self {
        Question {
            id: format!("q-{}-{}", difficulty, index),
            text,
            difficulty,
            time_limit: difficulty.time_limit(),
            score: None,
            feedback: None,
        }
    }
}

/// Text pools for each difficulty tier.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuestionBank {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        let pool = |texts: &[&str]| texts.iter().map(|t| t.to_string()).collect();

        QuestionBank {
            easy: pool(&[
                "What is the difference between let, const, and var in JavaScript?",
                "Explain what React components are and how they work.",
                "What is the purpose of the virtual DOM in React?",
                "How do you handle events in React?",
            ]),
            medium: pool(&[
                "Explain the concept of closures in JavaScript with an example.",
                "What are React hooks and why were they introduced?",
                "How would you optimize a React application's performance?",
                "Explain the difference between REST and GraphQL APIs.",
                "What is event delegation and how does it work?",
            ]),
            hard: pool(&[
                "Implement a debounce function from scratch and explain its use cases.",
                "Design a scalable frontend architecture for a large React application.",
                "Explain how you would handle state management in a complex React app.",
                "How would you implement server-side rendering with React?",
                "Design a caching strategy for a full-stack web application.",
            ]),
        }
    }
}

impl QuestionBank {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let bank: QuestionBank = serde_json::from_str(&contents)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn pool(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Every tier needs enough distinct texts to fill its share of an interview.
    pub fn validate(&self) -> Result<()> {
        for difficulty in Difficulty::ALL {
            let pool = self.pool(difficulty);
            let distinct: HashSet<&String> = pool.iter().collect();
            if distinct.len() != pool.len() {
                return Err(InterviewError::QuestionPool(format!(
                    "{} pool contains duplicate questions",
                    difficulty
                )));
            }
            if distinct.len() < QUESTIONS_PER_TIER {
                return Err(InterviewError::QuestionPool(format!(
                    "{} pool has {} distinct questions, need at least {}",
                    difficulty,
                    distinct.len(),
                    QUESTIONS_PER_TIER
                )));
            }
        }
        Ok(())
    }

    /// Builds the fixed interview layout: two per tier, easy then medium then hard.
    pub fn build_question_set(&self, selector: &mut dyn QuestionSelector) -> Result<Vec<Question>> {
        let mut questions = Vec::with_capacity(QUESTIONS_PER_TIER * Difficulty::ALL.len());

        for difficulty in Difficulty::ALL {
            let pool = self.pool(difficulty);
            let picked = selector.select(difficulty, pool, QUESTIONS_PER_TIER);

            let distinct: HashSet<&String> = picked.iter().collect();
            if picked.len() != QUESTIONS_PER_TIER || distinct.len() != QUESTIONS_PER_TIER {
                return Err(InterviewError::QuestionPool(format!(
                    "selector returned {} questions ({} distinct) for {} tier",
                    picked.len(),
                    distinct.len(),
                    difficulty
                )));
            }
            if let Some(stray) = picked.iter().find(|text| !pool.contains(text)) {
                return Err(InterviewError::QuestionPool(format!(
                    "selector returned a question outside the {} pool: {}",
                    difficulty, stray
                )));
            }

            questions.extend(
                picked
                    .into_iter()
                    .enumerate()
                    .map(|(index, text)| Question::new(difficulty, index, text)),
            );
        }

        Ok(questions)
    }
}

/// Chooses which texts of a tier pool are asked.
pub trait QuestionSelector: Send {
    fn select(&mut self, difficulty: Difficulty, pool: &[String], count: usize) -> Vec<String>;
}

/// Uniform draw without replacement.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new() -> Self {
        RandomSelector { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomSelector { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionSelector for RandomSelector {
    fn select(&mut self, _difficulty: Difficulty, pool: &[String], count: usize) -> Vec<String> {
        pool.choose_multiple(&mut self.rng, count).cloned().collect()
    }
}

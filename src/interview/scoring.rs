use std::fmt;

use serde::{Deserialize, Serialize};

use super::Question;
use crate::error::{InterviewError, Result};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceBand {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl PerformanceBand {
    pub fn from_average(average: f64) -> Self {
        if average >= 8.0 {
            PerformanceBand::Excellent
        } else if average >= 6.0 {
            PerformanceBand::Good
        } else if average >= 4.0 {
            PerformanceBand::Average
        } else {
            PerformanceBand::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::Good => "Good",
            PerformanceBand::Average => "Average",
            PerformanceBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoreReport {
    pub question_count: usize,
    pub average: f64,
    pub final_score: u8, // 0-100
    pub band: PerformanceBand,
    pub summary: String,
}

/// Unweighted mean of the per-question scores, scaled to 0-100.
pub fn score_questions(questions: &[Question]) -> Result<ScoreReport> {
    if questions.is_empty() {
        return Err(InterviewError::QuestionPool("no questions to score".to_string()));
    }

    let mut total: u32 = 0;
    for question in questions {
        let score = question
            .score
            .ok_or_else(|| InterviewError::UnscoredQuestion(question.id.clone()))?;
        total += u32::from(score);
    }

    let question_count = questions.len();
    let average = f64::from(total) / question_count as f64;
    let final_score = (average * 10.0).round().clamp(0.0, 100.0) as u8;
    let band = PerformanceBand::from_average(average);

    // Half-up at one decimal, the way the summary has always read.
    let shown_average = (average * 10.0).round() / 10.0;
    let summary = format!(
        "Interview completed with {} questions answered. Average score: {:.1}/10. Performance: {}.",
        question_count, shown_average, band
    );

    Ok(ScoreReport {
        question_count,
        average,
        final_score,
        band,
        summary,
    })
}

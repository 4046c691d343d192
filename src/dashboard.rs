//! Reviewer queries over the candidate list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::session::{Candidate, CandidateStatus};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Score,
    Name,
    #[default]
    Date,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Score => "score",
            SortBy::Name => "name",
            SortBy::Date => "date",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "score" => Ok(SortBy::Score),
            "name" => Ok(SortBy::Name),
            "date" => Ok(SortBy::Date),
            other => Err(format!("unknown sort order '{}', expected score, name or date", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_score: Option<u32>,
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.map_or(false, |value| value.to_lowercase().contains(needle))
}

/// Name or email match, case-insensitive. Candidates with neither field never match.
pub fn matches_query(candidate: &Candidate, query: &str) -> bool {
    let needle = query.to_lowercase();
    contains_ci(candidate.name.as_deref(), &needle) || contains_ci(candidate.email.as_deref(), &needle)
}

fn compare(a: &Candidate, b: &Candidate, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Score => b.final_score.unwrap_or(0).cmp(&a.final_score.unwrap_or(0)),
        SortBy::Name => {
            let a_name = a.name.as_deref().unwrap_or("");
            let b_name = b.name.as_deref().unwrap_or("");
            a_name
                .to_lowercase()
                .cmp(&b_name.to_lowercase())
                .then_with(|| a_name.cmp(b_name))
        }
        SortBy::Date => b.updated_at.cmp(&a.updated_at),
    }
}

pub fn filter_candidates<'a, I>(candidates: I, query: &str, sort_by: SortBy) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut filtered: Vec<&Candidate> = candidates
        .into_iter()
        .filter(|candidate| matches_query(candidate, query))
        .collect();
    filtered.sort_by(|a, b| compare(a, b, sort_by));
    filtered
}

pub fn dashboard_stats<'a, I>(candidates: I) -> DashboardStats
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut stats = DashboardStats {
        total: 0,
        completed: 0,
        in_progress: 0,
        average_score: None,
    };
    let mut score_sum: u32 = 0;
    let mut scored: u32 = 0;

    for candidate in candidates {
        stats.total += 1;
        match candidate.status {
            CandidateStatus::Completed => stats.completed += 1,
            CandidateStatus::InProgress => stats.in_progress += 1,
            _ => {}
        }
        // A zero score counts as "no score" here, as on the reviewer screen.
        if let Some(score) = candidate.final_score.filter(|s| *s > 0) {
            score_sum += u32::from(score);
            scored += 1;
        }
    }

    if scored > 0 {
        stats.average_score = Some((f64::from(score_sum) / f64::from(scored)).round() as u32);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn candidate(name: Option<&str>, email: Option<&str>, score: Option<u8>, age_minutes: i64) -> Candidate {
        let mut c = Candidate::new(None);
        c.name = name.map(String::from);
        c.email = email.map(String::from);
        c.final_score = score;
        if score.is_some() {
            c.status = CandidateStatus::Completed;
        }
        c.updated_at = Utc::now() - Duration::minutes(age_minutes);
        c
    }

    #[test]
    fn test_search_by_name_or_email() {
        let list = vec![
            candidate(Some("Ada Lovelace"), Some("ada@example.com"), None, 1),
            candidate(Some("Alan Turing"), Some("alan@bletchley.uk"), None, 2),
            candidate(None, None, None, 3),
        ];

        let hits = filter_candidates(&list, "BLETCH", SortBy::Date);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name.as_deref(), Some("Alan Turing"));

        // Anonymous records never match, even an empty query.
        assert_eq!(filter_candidates(&list, "", SortBy::Date).len(), 2);
    }

    #[test]
    fn test_sort_orders() {
        let list = vec![
            candidate(Some("bob"), None, Some(60), 5),
            candidate(Some("Alice"), None, None, 1),
            candidate(Some("carol"), None, Some(90), 10),
        ];

        let by_score: Vec<_> = filter_candidates(&list, "", SortBy::Score)
            .iter()
            .map(|c| c.display_name())
            .collect();
        assert_eq!(by_score, vec!["carol", "bob", "Alice"]);

        let by_name: Vec<_> = filter_candidates(&list, "", SortBy::Name)
            .iter()
            .map(|c| c.display_name())
            .collect();
        assert_eq!(by_name, vec!["Alice", "bob", "carol"]);

        let by_date: Vec<_> = filter_candidates(&list, "", SortBy::Date)
            .iter()
            .map(|c| c.display_name())
            .collect();
        assert_eq!(by_date, vec!["Alice", "bob", "carol"]);
    }

    #[test]
    fn test_stats() {
        let mut running = candidate(Some("dan"), None, None, 0);
        running.status = CandidateStatus::InProgress;
        let list = vec![
            candidate(Some("a"), None, Some(70), 0),
            candidate(Some("b"), None, Some(85), 0),
            running,
        ];

        let stats = dashboard_stats(&list);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.average_score, Some(78));

        assert_eq!(dashboard_stats(&Vec::new()).average_score, None);
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!("Score".parse::<SortBy>(), Ok(SortBy::Score));
        assert!("rank".parse::<SortBy>().is_err());
    }
}

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<Local>,
    /// Subject line only. May contain separator bytes, so nothing keys off it.
    pub message: String,
}

/// Aggregated view of one (repository, range) pair.
#[derive(Debug, Clone)]
pub struct Summary {
    pub repository: String,
    pub range: String,
    pub authors: HashMap<String, usize>,
    pub oldest: DateTime<Local>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.authors.values().sum()
    }

    /// Authors by commit count, highest first. Ties go to the name.
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut authors: Vec<(&str, usize)> = self
            .authors
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        authors
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorCount {
    pub name: String,
    pub commits: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    pub repository: String,
    pub range: String,
    pub total: usize,
    pub oldest: DateTime<Local>,
    pub authors: Vec<AuthorCount>,
}

impl From<&Summary> for SummaryEntry {
    fn from(summary: &Summary) -> Self {
        Self {
            repository: summary.repository.clone(),
            range: summary.range.clone(),
            total: summary.total(),
            oldest: summary.oldest,
            authors: summary
                .most_common()
                .into_iter()
                .map(|(name, commits)| AuthorCount {
                    name: name.to_string(),
                    commits,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub ranges: Vec<String>,
    pub git_flags: Vec<String>,
    pub summaries: Vec<SummaryEntry>,
}

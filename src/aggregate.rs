use crate::error::{DriftError, Result};
use crate::model::{CommitRecord, Summary};
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// Counts commits per author and finds the earliest timestamp.
///
/// Every record is scanned for the minimum: with merges and cherry-picks the
/// last line of `git log` is not necessarily the oldest commit.
pub fn aggregate(records: &[CommitRecord]) -> Result<(HashMap<String, usize>, DateTime<Local>)> {
    let mut authors: HashMap<String, usize> = HashMap::new();
    let mut oldest: Option<DateTime<Local>> = None;

    for record in records {
        *authors.entry(record.author_name.clone()).or_insert(0) += 1;
        oldest = match oldest {
            Some(current) if current <= record.timestamp => Some(current),
            _ => Some(record.timestamp),
        };
    }

    let oldest = oldest.ok_or(DriftError::EmptyRecords)?;
    Ok((authors, oldest))
}

impl Summary {
    pub fn from_records(repository: &str, range: &str, records: &[CommitRecord]) -> Result<Self> {
        let (authors, oldest) = aggregate(records)?;
        Ok(Self {
            repository: repository.to_string(),
            range: range.to_string(),
            authors,
            oldest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(author: &str, secs: i64) -> CommitRecord {
        CommitRecord {
            id: format!("{author}-{secs}"),
            author_name: author.to_string(),
            author_email: format!("{}@example.com", author.to_lowercase()),
            timestamp: DateTime::from_timestamp(secs, 0).unwrap().with_timezone(&Local),
            message: "change".to_string(),
        }
    }

    #[test]
    fn counts_authors_and_finds_oldest_out_of_order() {
        let (t1, t2, t3) = (1_600_000_000, 1_500_000_000, 1_700_000_000);
        let records = vec![record("Alice", t1), record("Bob", t2), record("Alice", t3)];

        let summary = Summary::from_records("proj", "main..release", &records).unwrap();

        let expected: HashMap<String, usize> =
            [("Alice".to_string(), 2), ("Bob".to_string(), 1)].into_iter().collect();
        assert_eq!(summary.authors, expected);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.oldest.timestamp(), t2);
    }

    #[test]
    fn oldest_bounds_every_record() {
        let stamps = [1_400_000_000, 1_300_000_500, 1_450_000_000, 1_300_000_499, 1_500_000_000];
        let records: Vec<_> = stamps
            .iter()
            .enumerate()
            .map(|(i, s)| record(&format!("dev{}", i % 2), *s))
            .collect();

        let (authors, oldest) = aggregate(&records).unwrap();

        assert_eq!(authors.values().sum::<usize>(), records.len());
        assert!(records.iter().all(|r| oldest <= r.timestamp));
        assert_eq!(oldest.timestamp(), 1_300_000_499);
    }

    #[test]
    fn single_record_is_its_own_oldest() {
        let records = vec![record("Carol", 42)];
        let (authors, oldest) = aggregate(&records).unwrap();
        assert_eq!(authors["Carol"], 1);
        assert_eq!(oldest.timestamp(), 42);
    }

    #[test]
    fn empty_input_fails_fast() {
        assert!(matches!(aggregate(&[]), Err(DriftError::EmptyRecords)));
    }
}

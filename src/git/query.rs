use crate::error::{DriftError, Result};
use crate::model::CommitRecord;
use crate::util::repo_name;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const FIELD_SEPARATOR: char = '\x1f';
pub const RECORD_SEPARATOR: char = '\x1e';

/// `%H %an %ae %at %s`, unit-separated, record-terminated.
pub const LOG_FORMAT: &str = "%H%x1f%an%x1f%ae%x1f%at%x1f%s%x1e";

/// Prefix git prints when a revision does not resolve.
pub const AMBIGUOUS_ARGUMENT: &str = "fatal: ambiguous argument";

const FIELD_COUNT: usize = 5;

/// A `git log` invocation bound to one repository.
pub struct GitLog {
    path: PathBuf,
    extra_flags: Vec<String>,
}

impl GitLog {
    pub fn new<P: AsRef<Path>>(path: P, extra_flags: &[String]) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            extra_flags: extra_flags.to_vec(),
        }
    }

    pub fn args(&self, range: &str) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            format!("--format={LOG_FORMAT}"),
            range.to_string(),
        ];
        args.extend(self.extra_flags.iter().cloned());
        args
    }

    /// Runs the query for `range` and parses whatever git printed.
    ///
    /// An empty `Vec` means the range has no divergent commits.
    pub fn collect(&self, range: &str) -> Result<Vec<CommitRecord>> {
        let args = self.args(range);
        log::debug!("running git {} in {}", args.join(" "), self.path.display());

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.path)
            .stdin(Stdio::null())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if stdout.starts_with(AMBIGUOUS_ARGUMENT) || stderr.starts_with(AMBIGUOUS_ARGUMENT) {
            return Err(DriftError::InvalidRange {
                repository: repo_name(&self.path),
                range: range.to_string(),
            });
        }

        if !output.status.success() {
            return Err(DriftError::ProcessFailure {
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        parse_log_output(&stdout)
    }
}

pub fn collect<P: AsRef<Path>>(
    repository: P,
    range: &str,
    extra_flags: &[String],
) -> Result<Vec<CommitRecord>> {
    GitLog::new(repository, extra_flags).collect(range)
}

/// Splits raw `git log` output into trimmed, non-empty record fragments.
pub fn split_records(output: &str) -> Vec<&str> {
    output
        .trim_matches(|c: char| c.is_whitespace() || c == RECORD_SEPARATOR)
        .split(RECORD_SEPARATOR)
        .map(|fragment| fragment.trim_matches(|c: char| c.is_whitespace() || c == RECORD_SEPARATOR))
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

pub fn parse_record(fragment: &str) -> Result<CommitRecord> {
    // The subject is last, so a stray unit separator in it stays in the message.
    let fields: Vec<&str> = fragment.splitn(FIELD_COUNT, FIELD_SEPARATOR).collect();
    let [id, author_name, author_email, date, message] = fields[..] else {
        return Err(DriftError::Parse(format!(
            "expected {FIELD_COUNT} fields, found {} in {fragment:?}",
            fields.len()
        )));
    };

    Ok(CommitRecord {
        id: id.to_string(),
        author_name: author_name.to_string(),
        author_email: author_email.to_string(),
        timestamp: parse_epoch(date)?,
        message: message.to_string(),
    })
}

pub fn parse_log_output(output: &str) -> Result<Vec<CommitRecord>> {
    split_records(output).into_iter().map(parse_record).collect()
}

pub fn parse_epoch(input: &str) -> Result<DateTime<Local>> {
    let secs: i64 = input
        .trim()
        .parse()
        .map_err(|e| DriftError::InvalidDate(format!("'{input}': {e}")))?;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or_else(|| DriftError::InvalidDate(format!("Invalid timestamp: {secs}")))
}

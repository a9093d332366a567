use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::Path;

/// Final path segment, or the whole path when there is none (e.g. `/`).
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%d-%m-%Y").to_string()
}

use anyhow::Context;
use std::path::{Component, Path, PathBuf};

/// Immediate subdirectories of `root`, sorted by path.
pub fn subdirectories(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read repository directory {}", root.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", root.display()))?
            .path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            log::debug!("skipping non-directory {}", path.display());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Collapses `.` and `..` in an absolute path without touching the filesystem,
/// so symlinks stay as given.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Absolute form of each explicit repository that exists as a directory.
pub fn explicit_repos(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(paths
        .iter()
        .map(|p| normalize(&cwd.join(p)))
        .filter(|p| {
            let keep = p.is_dir();
            if !keep {
                log::debug!("skipping {}: not a directory", p.display());
            }
            keep
        })
        .collect())
}

/// Candidate repositories: `repo_dir` children first, then explicit paths.
pub fn repositories(repo_dir: Option<&Path>, repos: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if let Some(dir) = repo_dir {
        found.extend(subdirectories(dir)?);
    }
    found.extend(explicit_repos(repos)?);
    log::info!("found {} candidate repositories", found.len());
    Ok(found)
}

use crate::cli::{OutputArgs, ReportArgs};
use crate::discover::repositories;
use crate::error::{DriftError, Result};
use crate::git::GitLog;
use crate::model::{Summary, SummaryEntry, SummaryOutput, SCHEMA_VERSION};
use crate::util::{day_key, repo_name};
use anyhow::Context;
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;

pub fn exec(args: ReportArgs, output: OutputArgs) -> anyhow::Result<()> {
    let repos = repositories(args.repo_dir.as_deref(), &args.repo)
        .context("Failed to discover repositories")?;

    let show_progress = !(output.json || output.ndjson);
    let mut summaries = collect_summaries(&repos, &args.branches, &args.git_flags, show_progress)?;
    sort_summaries(&mut summaries);

    if output.json {
        println!("{}", render_json(&summaries, &args)?);
    } else if output.ndjson {
        print!("{}", render_ndjson(&summaries)?);
    } else {
        output_text(&summaries);
    }

    Ok(())
}

/// Runs every (repository, range) pair in order and keeps the non-empty ones.
pub fn collect_summaries(
    repos: &[PathBuf],
    ranges: &[String],
    git_flags: &[String],
    show_progress: bool,
) -> anyhow::Result<Vec<Summary>> {
    let pb = ProgressBar::new((repos.len() * ranges.len()) as u64);
    if show_progress {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
    } else {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    let mut summaries = Vec::new();
    for repo in repos {
        let name = repo_name(repo);
        let git_log = GitLog::new(repo, git_flags);

        for range in ranges {
            pb.set_message(format!("{name} {range}"));
            match git_log.collect(range) {
                Ok(records) if records.is_empty() => {
                    log::debug!("{name} {range}: no divergent commits");
                }
                Ok(records) => {
                    let summary = Summary::from_records(&name, range, &records)
                        .with_context(|| format!("Failed to aggregate {name} {range}"))?;
                    summaries.push(summary);
                }
                Err(e @ DriftError::InvalidRange { .. }) => {
                    pb.suspend(|| eprintln!("{e}"));
                }
                Err(DriftError::ProcessFailure { status, stderr }) => {
                    log::debug!("{name} {range}: git exited with {status}: {stderr}");
                }
                Err(e) if e.is_skippable() => {
                    log::warn!("{name} {range}: {e}");
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Failed to run git log in {}", repo.display())));
                }
            }
            pb.inc(1);
        }
    }

    pb.finish_and_clear();
    Ok(summaries)
}

/// Largest total first. Stable, so equal totals keep processing order.
pub fn sort_summaries(summaries: &mut [Summary]) {
    summaries.sort_by(|a, b| b.total().cmp(&a.total()));
}

pub fn render_text(summary: &Summary) -> String {
    format!(
        "{} {}\n{} commits outstanding, oldest is from {}\n{}\n",
        style(&summary.repository).bold(),
        summary.range,
        summary.total(),
        day_key(&summary.oldest),
        format_authors(&summary.most_common()),
    )
}

/// `[("name", count), ...]` with names printed as-is.
pub fn format_authors(authors: &[(&str, usize)]) -> String {
    let pairs: Vec<String> = authors
        .iter()
        .map(|(name, count)| format!("(\"{name}\", {count})"))
        .collect();
    format!("[{}]", pairs.join(", "))
}

fn output_text(summaries: &[Summary]) {
    for summary in summaries {
        println!("{}", render_text(summary));
    }
}

pub fn render_json(summaries: &[Summary], args: &ReportArgs) -> Result<String> {
    let output = SummaryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        ranges: args.branches.clone(),
        git_flags: args.git_flags.clone(),
        summaries: summaries.iter().map(SummaryEntry::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// One compact summary per line, newline-terminated.
pub fn render_ndjson(summaries: &[Summary]) -> Result<String> {
    let mut out = String::new();
    for summary in summaries {
        out.push_str(&serde_json::to_string(&SummaryEntry::from(summary))?);
        out.push('\n');
    }
    Ok(out)
}

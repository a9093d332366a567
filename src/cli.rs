use anyhow::Result;
use clap::{ArgGroup, Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gdrift")]
#[command(about = "Report commits outstanding between git refs across repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub report: ReportArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    #[arg(long, default_value = "warn", help = "Log level (overridden by RUST_LOG)")]
    pub log_level: String,
}

#[derive(Args, Clone, Debug)]
#[command(group(
    ArgGroup::new("source")
        .args(["repo_dir", "repo"])
        .required(true)
        .multiple(true)
))]
pub struct ReportArgs {
    #[arg(short = 'd', long, help = "Directory whose subdirectories are git repositories to analyse")]
    pub repo_dir: Option<PathBuf>,

    #[arg(
        short = 'b',
        long,
        required = true,
        help = "Git refs to analyse in a..b form; repeat to analyse several ranges"
    )]
    pub branches: Vec<String>,

    #[arg(
        short = 'g',
        long,
        allow_hyphen_values = true,
        help = "Extra git log flags, e.g. --no-merges or --cherry-pick; repeat for several"
    )]
    pub git_flags: Vec<String>,

    #[arg(short = 'r', long, help = "Path to a git repository; repeat to analyse several")]
    pub repo: Vec<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        crate::report::exec(self.report, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("gdrift").chain(args.iter().copied()))
    }

    #[test]
    fn accepts_repeated_flags() {
        let cli = parse(&[
            "-d", "/srv/git", "-b", "main..r1", "-b", "main..r2", "-g", "--no-merges", "-r", "a", "-r", "b",
        ])
        .unwrap();
        assert_eq!(cli.report.branches, vec!["main..r1", "main..r2"]);
        assert_eq!(cli.report.git_flags, vec!["--no-merges"]);
        assert_eq!(cli.report.repo, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.report.repo_dir, Some(PathBuf::from("/srv/git")));
    }

    #[test]
    fn equals_form_git_flag() {
        let cli = parse(&["-r", ".", "-b", "a..b", "-g=--cherry-pick"]).unwrap();
        assert_eq!(cli.report.git_flags, vec!["--cherry-pick"]);
    }

    #[test]
    fn requires_a_repository_source() {
        let err = parse(&["-b", "main..release"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn requires_a_range() {
        let err = parse(&["-r", "."]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn json_and_ndjson_conflict() {
        assert!(parse(&["-r", ".", "-b", "a..b", "--json", "--ndjson"]).is_err());
    }
}

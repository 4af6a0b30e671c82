use clap::{Parser, Subcommand, ValueEnum};
use secure_repo::finding::ResultKind;
use secure_repo::github::RepoId;
use secure_repo::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "secure-repo",
    version,
    about = "Check a GitHub repo's configuration for security concerns"
)]
pub struct Cli {
    /// Log API requests and check progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit one or more repositories (requires GITHUB_TOKEN with admin access)
    Audit {
        /// GitHub repos to check, in "owner/repo" format
        #[arg(required = true)]
        repos: Vec<RepoId>,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Exit with status 1 if any finding is at least this severe
        /// [possible values: unknown, caution, warning, danger]
        #[arg(long, value_parser = parse_threshold)]
        fail_on: Option<ResultKind>,

        /// GitHub REST API root (overrides the config file)
        #[arg(long)]
        api_url: Option<String>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all checks and whether they are enabled
    ListChecks {
        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parses a `--fail-on` kind, rejecting `good` and `info`.
fn parse_threshold(value: &str) -> Result<ResultKind, String> {
    let kind = <ResultKind as ValueEnum>::from_str(value, true)?;
    if kind.is_issue() {
        Ok(kind)
    } else {
        Err(format!(
            "\"{kind}\" is not an issue kind; use unknown, caution, warning or danger"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_accepts_issue_kinds() {
        assert_eq!(parse_threshold("warning"), Ok(ResultKind::Warning));
        assert_eq!(parse_threshold("Danger"), Ok(ResultKind::Danger));
    }

    #[test]
    fn threshold_rejects_floor_kinds() {
        assert!(parse_threshold("good").is_err());
        assert!(parse_threshold("info").is_err());
        assert!(parse_threshold("catastrophic").is_err());
    }
}

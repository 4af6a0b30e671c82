//! # secure-repo
//!
//! Audits a GitHub repository's security-relevant configuration: branch
//! protection, secrets exposure, Actions permissions, vulnerability alerts,
//! and the fork pull request workflow approval policy.
//!
//! Each check records findings in a [`logger::ResultLogger`], which prints
//! them as an indented report and keeps a structured [`finding::Report`] that
//! can be rendered as JSON once the run completes.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use secure_repo::{audit, config::{self, Config}, github::Client, logger::ResultLogger};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let api = Client::new(&config::token_from_env().unwrap(), &config.api).unwrap();
//! let repos: Vec<secure_repo::github::RepoId> = vec!["octo-org/octo-repo".parse().unwrap()];
//!
//! let mut logger = ResultLogger::stdout();
//! audit::run_audit(&api, &repos, &config, &mut logger).unwrap();
//!
//! if logger.report().worst_kind().is_issue() {
//!     println!("Issues found");
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. **[`config`]**: load configuration from TOML and the token from the environment.
//! 2. **[`github`]**: the [`github::GitHubApi`] trait and its HTTPS client.
//! 3. **[`checks`]**: one [`checks::Check`] per settings area.
//! 4. **[`audit`]**: run the checks against each repository in turn.
//! 5. **[`logger`]**: record findings, roll up sections, and stream the text report.
//! 6. **[`finding`]**: the severity lattice, [`finding::Finding`], and [`finding::Report`].
//! 7. **[`output`]**: render findings as text, and reports as a summary or JSON.
//!
//! ## Result kinds
//!
//! | Kind | Glyph | Meaning |
//! |------|-------|---------|
//! | `good` | ✅ | Setting is secure |
//! | `info` | • | Informational, not a security concern |
//! | `unknown` | ❓ | Unexpected result, or failed to check |
//! | `caution` | 🔸 | Changing this setting may enhance security |
//! | `warning` | ❗️ | Evaluate and strongly consider correcting |
//! | `danger` | ❌ | Correct immediately |

pub mod audit;
pub mod checks;
pub mod config;
pub mod error;
pub mod finding;
pub mod github;
pub mod logger;
pub mod output;

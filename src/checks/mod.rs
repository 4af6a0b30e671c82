//! Repository settings checks.
//!
//! Every check implements the [`Check`] trait, reads the settings it needs
//! through [`GitHubApi`], and records its findings in the
//! [`ResultLogger`]. Expected failures (missing settings, 404s that mean
//! "not configured") become findings; anything else is returned as an
//! [`Error`](crate::error::Error) and aborts the run.
//!
//! Use [`all_checks`] to obtain the checks in execution order.

pub mod actions_secrets;
pub mod allowed_actions;
pub mod branch_policy;
pub mod environment_secrets;
pub mod fork_approval;
pub mod security_analysis;
pub mod workflow_perms;

use std::io::Write;

use crate::error::Result;
use crate::github::types::Repository;
use crate::github::{GitHubApi, RepoId};
use crate::logger::ResultLogger;

/// Everything a check needs to know about the repository under audit.
pub struct CheckContext<'a> {
    pub api: &'a dyn GitHubApi,
    pub repo: &'a RepoId,
    pub repository: &'a Repository,
    /// Web root used for settings links, e.g. `https://github.com`.
    pub web_url: &'a str,
}

impl CheckContext<'_> {
    /// `https://github.com/{owner}/{repo}/settings/{page}`
    pub fn settings_url(&self, page: &str) -> String {
        self.repo.settings_url(self.web_url, page)
    }
}

/// One audited area of repository settings.
///
/// # Implementing a custom check
///
/// ```rust,ignore
/// use secure_repo::checks::{Check, CheckContext};
///
/// pub struct MyCheck;
///
/// impl Check for MyCheck {
///     fn name(&self) -> &'static str { "my_check" }
///     fn description(&self) -> &'static str { "My custom check" }
///     fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
///         logger.good("Everything is fine", Details::new())?;
///         Ok(())
///     }
/// }
/// ```
pub trait Check {
    /// Unique identifier, also the key under `[checks]` in the config file.
    fn name(&self) -> &'static str;

    /// Short, human-readable description of the settings area.
    fn description(&self) -> &'static str;

    /// Audits the repository in `ctx`, recording findings in `logger`.
    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()>;
}

/// Returns every registered [`Check`] in the order the audit runs them.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(actions_secrets::ActionsSecretsCheck),
        Box::new(environment_secrets::EnvironmentSecretsCheck),
        Box::new(branch_policy::BranchPolicyCheck),
        Box::new(allowed_actions::AllowedActionsCheck),
        Box::new(workflow_perms::WorkflowPermsCheck),
        Box::new(security_analysis::SecurityAnalysisCheck),
        Box::new(fork_approval::ForkApprovalCheck),
    ]
}

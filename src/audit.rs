//! Audit orchestration.
//!
//! [`run_audit`] is the entry point for auditing a list of repositories. It
//! audits them strictly one after another, in the order given: each
//! repository gets a fresh logger context, an admin-permission check, and
//! then every enabled [`Check`](crate::checks::Check) in turn.

use std::io::Write;

use crate::checks::{self, CheckContext};
use crate::config::Config;
use crate::error::Result;
use crate::finding::Details;
use crate::github::{GitHubApi, RepoId};
use crate::logger::ResultLogger;

/// Audits every repository in `repos`, recording findings in `logger`.
///
/// Problems a check can describe are recorded as findings. Any other error
/// aborts the run; findings already written stay written, but a section that
/// was still open is lost.
///
/// # Examples
///
/// ```rust,no_run
/// use secure_repo::{audit, config::{self, Config}, github::Client, logger::ResultLogger};
///
/// let config = Config::load(None).unwrap();
/// let api = Client::new(&config::token_from_env().unwrap(), &config.api).unwrap();
/// let repos: Vec<secure_repo::github::RepoId> = vec!["octo-org/octo-repo".parse().unwrap()];
/// let mut logger = ResultLogger::stdout();
///
/// audit::run_audit(&api, &repos, &config, &mut logger).unwrap();
/// ```
pub fn run_audit(
    api: &dyn GitHubApi,
    repos: &[RepoId],
    config: &Config,
    logger: &mut ResultLogger<dyn Write>,
) -> Result<()> {
    let username = api.authenticated_user()?.login;
    tracing::debug!(%username, repos = repos.len(), "starting audit");

    for repo in repos {
        audit_repo(api, &username, repo, config, logger)?;
    }
    logger.flush()?;
    Ok(())
}

fn audit_repo(
    api: &dyn GitHubApi,
    username: &str,
    repo: &RepoId,
    config: &Config,
    logger: &mut ResultLogger<dyn Write>,
) -> Result<()> {
    let repo_name = repo.to_string();
    logger.set_repo(&repo_name)?;
    logger.repo_header()?;

    match api.collaborator_permission(repo, username) {
        Ok(perms) if perms.is_admin() => {}
        Ok(_) => {
            logger.unknown("You must be a repo admin to run this script", Details::new())?;
            return Ok(());
        }
        // Missing repo, no access, or a token not authorized for the org.
        Err(e) => {
            let mut details = Details::new().details(e.message);
            if let Some(url) = e.documentation_url {
                details = details.docs_url(url);
            }
            logger.unknown("Error checking repo permissions", details)?;
            return Ok(());
        }
    }

    let repository = api.repository(repo)?;
    let ctx = CheckContext {
        api,
        repo,
        repository: &repository,
        web_url: &config.api.web_url,
    };

    for check in checks::all_checks() {
        if !config.is_check_enabled(check.name()) {
            tracing::debug!(check = check.name(), "check disabled");
            continue;
        }
        tracing::debug!(repo = %repo, check = check.name(), "running check");
        check.run(&ctx, logger)?;
    }

    logger.write_raw("\n")?;
    Ok(())
}

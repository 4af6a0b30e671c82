//! Access to the GitHub REST API.
//!
//! Checks talk to GitHub only through the [`GitHubApi`] trait, one method per
//! endpoint. [`Client`] implements it over HTTPS; tests substitute canned
//! responses.

pub mod client;
pub mod types;

pub use client::Client;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use types::{
    ActionsPermissions, AuthenticatedUser, BranchProtection, CollaboratorPermission,
    EnvironmentList, ForkPrApprovalPolicy, Repository, SecretList, WorkflowPermissions,
};

/// A failed GitHub request.
///
/// `status` is set when GitHub answered with an error status; it is `None`
/// when no response was received or the body could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
    pub documentation_url: Option<String>,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError {
            status: None,
            message: message.into(),
            documentation_url: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// A repository identifier in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// `{web_url}/{owner}/{repo}`
    pub fn web_url(&self, web_url: &str) -> String {
        format!("{}/{}/{}", web_url.trim_end_matches('/'), self.owner, self.name)
    }

    pub fn settings_url(&self, web_url: &str, page: &str) -> String {
        format!("{}/settings/{page}", self.web_url(web_url))
    }
}

impl FromStr for RepoId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE_REPO: LazyLock<regex::Regex> =
            LazyLock::new(|| regex::Regex::new(r"^([\w.-]+)/([\w.-]+)$").unwrap());

        let caps = RE_REPO
            .captures(s)
            .ok_or_else(|| format!("\"{s}\" must be in \"owner/repo\" format"))?;
        // URL path normalization would drop these segments.
        if [&caps[1], &caps[2]].iter().any(|part| matches!(*part, "." | "..")) {
            return Err(format!("\"{s}\" is not a valid repository name"));
        }
        Ok(RepoId {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The GitHub endpoints used by the audit.
pub trait GitHubApi {
    /// `GET /user`
    fn authenticated_user(&self) -> Result<AuthenticatedUser, ApiError>;

    /// `GET /repos/{owner}/{repo}/collaborators/{username}/permission`
    fn collaborator_permission(
        &self,
        repo: &RepoId,
        username: &str,
    ) -> Result<CollaboratorPermission, ApiError>;

    /// `GET /repos/{owner}/{repo}`
    fn repository(&self, repo: &RepoId) -> Result<Repository, ApiError>;

    /// `GET /repos/{owner}/{repo}/actions/secrets`
    fn repo_secrets(&self, repo: &RepoId) -> Result<SecretList, ApiError>;

    /// `GET /repos/{owner}/{repo}/environments`
    fn environments(&self, repo: &RepoId) -> Result<EnvironmentList, ApiError>;

    /// `GET /repositories/{repository_id}/environments/{environment_name}/secrets`
    fn environment_secrets(
        &self,
        repo: &RepoId,
        repo_id: u64,
        environment: &str,
    ) -> Result<SecretList, ApiError>;

    /// `GET /repos/{owner}/{repo}/branches/{branch}/protection`
    fn branch_protection(&self, repo: &RepoId, branch: &str)
        -> Result<BranchProtection, ApiError>;

    /// `GET /repos/{owner}/{repo}/actions/permissions`
    fn actions_permissions(&self, repo: &RepoId) -> Result<ActionsPermissions, ApiError>;

    /// `GET /repos/{owner}/{repo}/actions/permissions/workflow`
    fn workflow_permissions(&self, repo: &RepoId) -> Result<WorkflowPermissions, ApiError>;

    /// `GET /repos/{owner}/{repo}/vulnerability-alerts`
    ///
    /// GitHub answers 204 when alerts are enabled and 404 when they are not.
    fn vulnerability_alerts_enabled(&self, repo: &RepoId) -> Result<bool, ApiError>;

    /// `GET /repos/{owner}/{repo}/actions/permissions/fork-pr-contributor-approval`
    fn fork_pr_approval_policy(&self, repo: &RepoId) -> Result<ForkPrApprovalPolicy, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let id: RepoId = "octo-org/my.repo_1".parse().unwrap();
        assert_eq!(id.owner, "octo-org");
        assert_eq!(id.name, "my.repo_1");
        assert_eq!(id.to_string(), "octo-org/my.repo_1");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in ["octo", "octo/", "/repo", "a/b/c", "octo repo/x", ""] {
            assert!(bad.parse::<RepoId>().is_err(), "{bad}");
        }
    }

    #[test]
    fn rejects_dot_segments() {
        for bad in ["../octo", "./octo", "octo/..", "octo/.", "../.."] {
            assert!(bad.parse::<RepoId>().is_err(), "{bad}");
        }
        let dotted: RepoId = "octo/.github".parse().unwrap();
        assert_eq!(dotted.name, ".github");
    }

    #[test]
    fn builds_settings_urls() {
        let id: RepoId = "o/r".parse().unwrap();
        assert_eq!(
            id.settings_url("https://github.com/", "actions"),
            "https://github.com/o/r/settings/actions"
        );
    }
}

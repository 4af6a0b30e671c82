//! Blocking HTTPS implementation of [`GitHubApi`].

use std::time::Duration;

use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::types::{
    ActionsPermissions, AuthenticatedUser, BranchProtection, CollaboratorPermission,
    EnvironmentList, ForkPrApprovalPolicy, Repository, SecretList, WorkflowPermissions,
};
use super::{ApiError, GitHubApi, RepoId};
use crate::config::ApiConfig;

const API_VERSION: &str = "2022-11-28";

/// Error body GitHub sends with non-2xx responses.
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    documentation_url: Option<String>,
}

/// GitHub REST client authenticated with a personal access token.
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: Url,
}

impl Client {
    /// Builds a client for `config.base_url` that sends `token` with every
    /// request.
    pub fn new(token: &str, config: &ApiConfig) -> Result<Client, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::transport(format!("invalid API URL {}: {e}", config.base_url)))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ApiError::transport("GITHUB_TOKEN contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Client { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::transport(format!("invalid API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, segments: &[&str]) -> Result<Response, ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| ApiError::transport(format!("request to {url} failed: {e}")))?;
        tracing::debug!(%url, status = response.status().as_u16(), "response");
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response = self.send(segments)?;
        if !response.status().is_success() {
            return Err(error_from_response(response));
        }
        response
            .json()
            .map_err(|e| ApiError::transport(format!("failed to decode response: {e}")))
    }
}

fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let body: ErrorBody = response.json().unwrap_or_default();
    ApiError {
        status: Some(status.as_u16()),
        message: body.message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        }),
        documentation_url: body.documentation_url,
    }
}

impl GitHubApi for Client {
    fn authenticated_user(&self) -> Result<AuthenticatedUser, ApiError> {
        self.get_json(&["user"])
    }

    fn collaborator_permission(
        &self,
        repo: &RepoId,
        username: &str,
    ) -> Result<CollaboratorPermission, ApiError> {
        self.get_json(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "collaborators",
            username,
            "permission",
        ])
    }

    fn repository(&self, repo: &RepoId) -> Result<Repository, ApiError> {
        self.get_json(&["repos", repo.owner.as_str(), repo.name.as_str()])
    }

    fn repo_secrets(&self, repo: &RepoId) -> Result<SecretList, ApiError> {
        self.get_json(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "actions",
            "secrets",
        ])
    }

    fn environments(&self, repo: &RepoId) -> Result<EnvironmentList, ApiError> {
        self.get_json(&["repos", repo.owner.as_str(), repo.name.as_str(), "environments"])
    }

    fn environment_secrets(
        &self,
        _repo: &RepoId,
        repo_id: u64,
        environment: &str,
    ) -> Result<SecretList, ApiError> {
        let repo_id = repo_id.to_string();
        self.get_json(&[
            "repositories",
            repo_id.as_str(),
            "environments",
            environment,
            "secrets",
        ])
    }

    fn branch_protection(
        &self,
        repo: &RepoId,
        branch: &str,
    ) -> Result<BranchProtection, ApiError> {
        self.get_json(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "branches",
            branch,
            "protection",
        ])
    }

    fn actions_permissions(&self, repo: &RepoId) -> Result<ActionsPermissions, ApiError> {
        self.get_json(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "actions",
            "permissions",
        ])
    }

    fn workflow_permissions(&self, repo: &RepoId) -> Result<WorkflowPermissions, ApiError> {
        self.get_json(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "actions",
            "permissions",
            "workflow",
        ])
    }

    fn vulnerability_alerts_enabled(&self, repo: &RepoId) -> Result<bool, ApiError> {
        let response = self.send(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "vulnerability-alerts",
        ])?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            // Also returned to non-admins; the driver has already checked admin
            // access, so this means disabled.
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(error_from_response(response)),
        }
    }

    fn fork_pr_approval_policy(&self, repo: &RepoId) -> Result<ForkPrApprovalPolicy, ApiError> {
        self.get_json(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "actions",
            "permissions",
            "fork-pr-contributor-approval",
        ])
    }
}

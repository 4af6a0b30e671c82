//! Configuration loading and management.
//!
//! The default configuration file is `secure-repo.toml` in the current
//! working directory. Every field has a default, so the file can be omitted
//! entirely. Use [`Config::load`] to read it:
//!
//! ```rust,no_run
//! use secure_repo::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert!(config.is_check_enabled("branch_policy"));
//! ```
//!
//! The GitHub token is never read from the config file; it comes from the
//! environment or a `.env` file, see [`load_dotenv`] and [`token_from_env`].

use std::path::Path;

use crate::finding::ResultKind;

/// Name of the environment variable holding the GitHub token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Main configuration for the audit.
///
/// # Examples
///
/// ```toml
/// fail_on = "warning"
///
/// [checks]
/// fork_workflow_approval = false
///
/// [api]
/// base_url = "https://ghe.example.com/api/v3"
/// web_url = "https://ghe.example.com"
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Per-check on/off toggles.
    pub checks: ChecksConfig,
    /// Exit with status 1 when any top-level finding is at least this severe.
    /// Must be an issue kind; `good` and `info` are rejected on load.
    pub fail_on: Option<ResultKind>,
    /// Where to reach GitHub.
    pub api: ApiConfig,
}

/// Per-check on/off toggles. Every check defaults to **enabled**.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub actions_secrets: bool,
    pub environment_secrets: bool,
    pub branch_policy: bool,
    pub allowed_actions: bool,
    pub workflow_perms: bool,
    pub security_analysis: bool,
    pub fork_workflow_approval: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        ChecksConfig {
            actions_secrets: true,
            environment_secrets: true,
            branch_policy: true,
            allowed_actions: true,
            workflow_perms: true,
            security_analysis: true,
            fork_workflow_approval: true,
        }
    }
}

/// GitHub endpoints and request settings.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST API root (GitHub Enterprise Server: `https://HOST/api/v3`).
    pub base_url: String,
    /// Web root used to build settings links in findings.
    pub web_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try `secure-repo.toml` in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when the explicit path does not exist, the file
    /// cannot be read or parsed, or `fail_on` names `good` or `info`.
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let config_path = if let Some(p) = path {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(format!("Config file not found: {}", p.display()));
            }
        } else {
            let default_path = Path::new("secure-repo.toml");
            if default_path.exists() {
                Some(default_path.to_path_buf())
            } else {
                None
            }
        };

        match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
                tracing::debug!(path = %path.display(), "loaded config");
                let config: Config = toml::from_str(&content)
                    .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
                match config.fail_on {
                    Some(kind) if !kind.is_issue() => Err(format!(
                        "Invalid config {}: fail_on = \"{kind}\" is not an issue kind",
                        path.display()
                    )),
                    _ => Ok(config),
                }
            }
            None => Ok(Config::default()),
        }
    }

    /// Returns `true` if the named check is enabled.
    ///
    /// Unknown check names are considered enabled.
    ///
    /// ```
    /// use secure_repo::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.checks.security_analysis = false;
    /// assert!(!config.is_check_enabled("security_analysis"));
    /// assert!(config.is_check_enabled("unknown_check"));
    /// ```
    pub fn is_check_enabled(&self, name: &str) -> bool {
        match name {
            "actions_secrets" => self.checks.actions_secrets,
            "environment_secrets" => self.checks.environment_secrets,
            "branch_policy" => self.checks.branch_policy,
            "allowed_actions" => self.checks.allowed_actions,
            "workflow_perms" => self.checks.workflow_perms,
            "security_analysis" => self.checks.security_analysis,
            "fork_workflow_approval" => self.checks.fork_workflow_approval,
            _ => true,
        }
    }
}

/// Loads variables from a `.env` file in the current directory or one of its
/// parents. Variables already set in the environment keep their values.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("failed to load .env: {e}"),
    }
}

/// Reads the GitHub token from [`TOKEN_VAR`]. Call [`load_dotenv`] first to
/// pick it up from a `.env` file.
///
/// Empty values are treated as missing.
pub fn token_from_env() -> Result<String, String> {
    match std::env::var(TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(format!(
            "{TOKEN_VAR} must be provided via an environment variable or .env file"
        )),
    }
}

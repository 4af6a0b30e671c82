//! Settings → Secrets and variables → Actions.
//!
//! Repository-level Actions secrets are available to any workflow run from a
//! branch in the repository, including pull requests from collaborators.
//! Secrets whose names look like credentials are reported as dangerous.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::{Details, Finding, ResultKind};
use crate::logger::ResultLogger;

// Incomplete list of names and substrings used for credentials. The groups at
// either end approximate \b, treating underscores as word boundaries.
static RE_CREDENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|_)token|pat|auth[^_]*|cred[^_]*|password|secret|key|pass|pwd|pw(_|$)")
        .unwrap()
});

/// Returns `true` if a secret's name suggests it holds a credential.
pub fn looks_like_credential(name: &str) -> bool {
    RE_CREDENTIAL.is_match(name)
}

pub struct ActionsSecretsCheck;

impl Check for ActionsSecretsCheck {
    fn name(&self) -> &'static str {
        "actions_secrets"
    }

    fn description(&self) -> &'static str {
        "Repository Actions secrets that pull request workflows can read"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let secrets: Vec<String> = ctx
            .api
            .repo_secrets(ctx.repo)?
            .secrets
            .into_iter()
            .map(|s| s.name)
            .collect();

        if secrets.is_empty() {
            logger.good("No actions secrets found", Details::new())?;
            return Ok(());
        }

        let credentials: Vec<String> = secrets
            .iter()
            .filter(|s| looks_like_credential(s))
            .cloned()
            .collect();

        if !credentials.is_empty() {
            logger.danger(
                "Found actions secrets which may be credentials",
                Details::new()
                    .details(
                        "Secrets marked with ❌ appear to be sensitive credentials (based on names). \
                         STRONGLY RECONSIDER whether these should be available to PRs! If not, \
                         rotate the secrets and move them to an environment. If GitHub access is \
                         needed for a PR workflow, use the built-in GITHUB_TOKEN with minimal \
                         specific permissions if possible.",
                    )
                    .children(
                        credentials
                            .into_iter()
                            .map(|s| Finding::new(ResultKind::Danger, s))
                            .collect(),
                    ),
            )?;
        } else {
            logger.warning(
                "Found actions secrets",
                Details::new()
                    .details(
                        "Verify whether it's safe for any PR build to access these secrets. \
                         If not, rotate the secrets and move them to an environment. \
                         (Non-sensitive secrets can also be stored in plain text as actions \
                         variables.)",
                    )
                    .children(
                        secrets
                            .into_iter()
                            .map(|s| Finding::new(ResultKind::Info, s))
                            .collect(),
                    ),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_names_match() {
        for name in [
            "NPM_TOKEN",
            "GH_PAT",
            "AUTH_HEADER",
            "DOCKER_PASSWORD",
            "DEPLOY_KEY",
            "AWS_SECRET_ACCESS_KEY",
            "DB_PWD",
            "CREDENTIALS_JSON",
        ] {
            assert!(looks_like_credential(name), "{name}");
        }
    }

    #[test]
    fn plain_names_do_not_match() {
        for name in ["SLACK_CHANNEL", "REGION", "BUILD_MODE", "ENVIRONMENT_NAME"] {
            assert!(!looks_like_credential(name), "{name}");
        }
    }
}

//! Settings → Environments.
//!
//! An environment's secrets are only as protected as the environment itself:
//! without a deployment branch policy or a gating protection rule, any
//! workflow that names the environment can read them.

use std::io::Write;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::{Details, Finding, ResultKind};
use crate::logger::ResultLogger;

pub struct EnvironmentSecretsCheck;

impl Check for EnvironmentSecretsCheck {
    fn name(&self) -> &'static str {
        "environment_secrets"
    }

    fn description(&self) -> &'static str {
        "Environment secrets without branch restrictions or protection rules"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let environments = match ctx.api.environments(ctx.repo) {
            Ok(list) => list.environments,
            // The driver verified admin access, so 404 means no environments.
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => {
                logger.unknown(
                    "Error getting environments",
                    Details::new().details(e.message),
                )?;
                return Ok(());
            }
        };

        if environments.is_empty() {
            logger.good("No environments found", Details::new())?;
            return Ok(());
        }

        let mut exposed = Vec::new();
        for env in &environments {
            let secrets = ctx
                .api
                .environment_secrets(ctx.repo, ctx.repository.id, &env.name)?
                .secrets;
            if secrets.is_empty() || env.has_branch_policy() || env.has_gating_rule() {
                continue;
            }
            let names: Vec<String> = secrets.into_iter().map(|s| s.name).collect();
            exposed.push(format!("{} ({})", env.name, names.join(", ")));
        }

        if exposed.is_empty() {
            logger.good(
                "No environments contain secrets with inadequate protection",
                Details::new(),
            )?;
        } else {
            logger.warning(
                "Some environments contain secrets with inadequate protection",
                Details::new()
                    .details(
                        "These secrets might be accessible to PRs. Verify whether this is okay, \
                         and if not, add branch restrictions or protection rules to the \
                         environment.",
                    )
                    .resolve_url(ctx.settings_url("environments"))
                    .children(
                        exposed
                            .into_iter()
                            .map(|e| Finding::new(ResultKind::Info, e))
                            .collect(),
                    ),
            )?;
        }
        Ok(())
    }
}

//! Settings → Actions → General → Actions permissions.

use std::io::Write;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::Details;
use crate::logger::ResultLogger;

pub struct AllowedActionsCheck;

impl Check for AllowedActionsCheck {
    fn name(&self) -> &'static str {
        "allowed_actions"
    }

    fn description(&self) -> &'static str {
        "Which actions and reusable workflows may run"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let actions_url = ctx.settings_url("actions");
        let perms = ctx.api.actions_permissions(ctx.repo)?;

        if !perms.enabled {
            logger.good("Actions are disabled", Details::new())?;
            return Ok(());
        }

        match perms.allowed_actions.as_deref() {
            Some("all") => logger.warning(
                "All actions are allowed",
                Details::new()
                    .details("Consider restricting to certain actions.")
                    .resolve_url(actions_url),
            )?,
            Some("selected") => logger.good("Only selected actions are allowed", Details::new())?,
            Some("local_only") => logger.good("Only local actions are allowed", Details::new())?,
            other => logger.warning(
                format!(
                    "Unknown allowed_actions value: \"{}\"",
                    other.unwrap_or_default()
                ),
                Details::new().details(format!("Please verify this setting at {actions_url}.")),
            )?,
        }
        Ok(())
    }
}

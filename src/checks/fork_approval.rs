//! Settings → Actions → General → Fork pull request workflows from outside
//! collaborators.
//!
//! Only public repositories are checked: private and internal repositories
//! cannot be forked by arbitrary outside accounts.

use std::io::Write;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::Details;
use crate::github::types::Visibility;
use crate::logger::ResultLogger;

pub struct ForkApprovalCheck;

impl Check for ForkApprovalCheck {
    fn name(&self) -> &'static str {
        "fork_workflow_approval"
    }

    fn description(&self) -> &'static str {
        "Approval required before fork pull request workflows run"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let visibility = ctx.repository.visibility;
        if visibility != Visibility::Public {
            logger.info(
                format!("Skipping fork PR approval setting check for {visibility} repo"),
                Details::new(),
            )?;
            return Ok(());
        }

        let actions_url = ctx.settings_url("actions");
        let policy = ctx.api.fork_pr_approval_policy(ctx.repo)?;

        match policy.approval_policy.as_deref() {
            Some("all_external_contributors") => logger.good(
                "Fork PR workflow approval required for all outside collaborators",
                Details::new(),
            )?,
            Some("first_time_contributors" | "first_time_contributors_new_to_github") => logger
                .danger(
                    "Fork PR workflow approval is only required for first-time contributors",
                    Details::new()
                        .details(
                            "This is risky because if a malicious contributor makes one good PR, \
                             they could then make a malicious PR which would run workflows and \
                             potentially access secrets without maintainer knowledge. Consider \
                             changing this setting to \"Require approval for all outside \
                             collaborators\".",
                        )
                        .resolve_url(actions_url),
                )?,
            _ => logger.warning(
                "Could not determine fork PR workflow approval setting",
                Details::new().details(format!("Please verify this setting at {actions_url}.")),
            )?,
        }
        Ok(())
    }
}

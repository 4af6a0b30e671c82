//! Settings → Actions → General → Workflow permissions.

use std::io::Write;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::Details;
use crate::logger::ResultLogger;

const TOKEN_DOCS_URL: &str =
    "https://docs.github.com/en/actions/security-guides/automatic-token-authentication";

pub struct WorkflowPermsCheck;

impl Check for WorkflowPermsCheck {
    fn name(&self) -> &'static str {
        "workflow_perms"
    }

    fn description(&self) -> &'static str {
        "Default GITHUB_TOKEN permissions and pull request approval by Actions"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let actions_url = ctx.settings_url("actions");
        let perms = ctx.api.workflow_permissions(ctx.repo)?;

        if perms.default_workflow_permissions == "write" {
            logger.danger(
                "\"Workflow permissions\" is set to allow write access from workflows",
                Details::new()
                    .details(
                        "This should be changed to read-only, with specific perms granted to \
                         individual workflows as needed using a \"permissions\" block. (Fork PR \
                         workflows run via the pull_request trigger will always get a read-only \
                         token, but it's still good practice to minimize possible access from \
                         main branch workflows or in-repo PR workflows.)",
                    )
                    .resolve_url(actions_url.as_str())
                    .docs_url(TOKEN_DOCS_URL),
            )?;
        } else {
            logger.good("\"Workflow permissions\" setting is read-only", Details::new())?;
        }

        if perms.can_approve_pull_request_reviews {
            logger.warning(
                "GitHub Actions are allowed to create and approve pull requests",
                Details::new()
                    .details(
                        "Disable this if it's not needed. If it's currently used, you may want \
                         to consider another approach.",
                    )
                    .resolve_url(actions_url),
            )?;
        } else {
            logger.good(
                "GitHub Actions are not allowed to create or approve pull requests",
                Details::new(),
            )?;
        }
        Ok(())
    }
}

//! Settings → Branches → Branch protection rules → (default branch).
//!
//! Reports two sections: the pull request review requirements, and the
//! remaining protections on the default branch.

use std::io::Write;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::{Details, Finding, ResultKind};
use crate::github::types::{enabled, BranchProtection, BypassAllowances};
use crate::logger::ResultLogger;

pub struct BranchPolicyCheck;

impl Check for BranchPolicyCheck {
    fn name(&self) -> &'static str {
        "branch_policy"
    }

    fn description(&self) -> &'static str {
        "Default branch protection and pull request review requirements"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let branch = ctx.repository.default_branch.as_str();
        let settings_url = ctx.settings_url("branches");

        let policy = match ctx.api.branch_protection(ctx.repo, branch) {
            Ok(policy) => policy,
            // The driver verified admin access, so 404 means unprotected.
            Err(e) if e.is_not_found() => {
                logger.danger(
                    format!("Default branch \"{branch}\" should be protected"),
                    Details::new().resolve_url(settings_url),
                )?;
                return Ok(());
            }
            Err(e) => {
                logger.unknown(
                    "Error checking branch policy",
                    Details::new().details(e.message),
                )?;
                return Ok(());
            }
        };

        check_pr_policy(logger, &policy, branch, &settings_url)?;
        check_protection(logger, &policy, branch)?;
        Ok(())
    }
}

fn bypass_children(allowances: &BypassAllowances) -> Vec<Finding> {
    let mut children = Vec::new();
    if !allowances.apps.is_empty() {
        let names: Vec<&str> = allowances.apps.iter().map(|a| a.name.as_str()).collect();
        children.push(Finding::new(
            ResultKind::Info,
            format!("Apps: {}", names.join(", ")),
        ));
    }
    if !allowances.teams.is_empty() {
        let names: Vec<&str> = allowances.teams.iter().map(|t| t.name.as_str()).collect();
        children.push(Finding::new(
            ResultKind::Info,
            format!("Teams: {}", names.join(", ")),
        ));
    }
    if !allowances.users.is_empty() {
        let names: Vec<&str> = allowances.users.iter().map(|u| u.login.as_str()).collect();
        children.push(Finding::new(
            ResultKind::Info,
            format!("Users: {}", names.join(", ")),
        ));
    }
    children
}

fn check_pr_policy(
    logger: &mut ResultLogger<dyn Write>,
    policy: &BranchProtection,
    branch: &str,
    settings_url: &str,
) -> Result<()> {
    let Some(ref reviews) = policy.required_pull_request_reviews else {
        logger.danger(
            format!("Pull requests should be required for default branch \"{branch}\""),
            Details::new().resolve_url(settings_url),
        )?;
        return Ok(());
    };

    logger.start_section(
        format!("Pull requests are required for default branch \"{branch}\""),
        Details::new().resolve_url(settings_url),
    )?;

    let approvals = reviews.required_approving_review_count.unwrap_or(0);
    if approvals > 0 {
        logger.good(format!("{approvals} approval(s) required"), Details::new())?;
    } else {
        logger.danger("At least 1 approval should be required", Details::new())?;
    }

    if reviews.dismiss_stale_reviews {
        logger.good("Stale reviews are dismissed", Details::new())?;
    }
    if reviews.require_last_push_approval {
        logger.good("Approval of last push is required", Details::new())?;
    }
    if !reviews.dismiss_stale_reviews && !reviews.require_last_push_approval {
        logger.caution(
            "Consider requiring last push approval or dismissing stale reviews on push",
            Details::new(),
        )?;
    }

    if reviews.require_code_owner_reviews {
        logger.good("Code owners must approve", Details::new())?;
    } else {
        logger.caution("Consider requiring code owners to approve", Details::new())?;
    }

    if reviews.dismissal_restrictions.is_some() {
        logger.good("Review dismissal is restricted", Details::new())?;
    } else {
        logger.caution("Consider restricting review dismissal", Details::new())?;
    }

    match reviews.bypass_pull_request_allowances {
        Some(ref allowances) if !allowances.is_empty() => {
            logger.caution(
                "Bypassing pull requests is allowed for:",
                Details::new().children(bypass_children(allowances)),
            )?;
        }
        _ => {
            let suffix = if enabled(&policy.enforce_admins) {
                ""
            } else {
                " (except for admins)"
            };
            logger.good(
                format!("Bypassing pull requests is not allowed{suffix}"),
                Details::new(),
            )?;
        }
    }

    logger.write_section()?;
    Ok(())
}

fn check_protection(
    logger: &mut ResultLogger<dyn Write>,
    policy: &BranchProtection,
    branch: &str,
) -> Result<()> {
    logger.start_section(
        format!("Default branch \"{branch}\" is protected"),
        Details::new(),
    )?;

    match policy.required_status_checks {
        Some(ref checks) if !checks.contexts.is_empty() => {
            logger.good(
                "Status checks are required",
                Details::new().children(
                    checks
                        .contexts
                        .iter()
                        .map(|c| Finding::new(ResultKind::Info, c.as_str()))
                        .collect(),
                ),
            )?;
        }
        // Requiring status checks without naming any has no effect.
        _ => {
            logger.danger(
                "Specific status checks should be required to pass",
                Details::new(),
            )?;
        }
    }

    if enabled(&policy.allow_force_pushes) {
        logger.danger("Force pushes should not be allowed", Details::new())?;
    } else {
        logger.good("Force pushes are not allowed", Details::new())?;
    }

    if enabled(&policy.allow_deletions) {
        logger.danger("Deleting the branch should not be allowed", Details::new())?;
    } else {
        logger.good("Deleting the branch is not allowed", Details::new())?;
    }

    if enabled(&policy.enforce_admins) {
        logger.good("Admins may not bypass policies", Details::new())?;
    } else {
        logger.caution("Admins may bypass policies", Details::new())?;
    }

    logger.write_section()?;
    Ok(())
}

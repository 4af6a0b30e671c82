//! Settings → Code security and analysis.
//!
//! Dependabot alerts are always checked. Secret scanning and push protection
//! are reported only when GitHub includes them in the repository payload.

use std::io::Write;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::finding::Details;
use crate::logger::ResultLogger;

pub struct SecurityAnalysisCheck;

impl Check for SecurityAnalysisCheck {
    fn name(&self) -> &'static str {
        "security_analysis"
    }

    fn description(&self) -> &'static str {
        "Dependabot vulnerability alerts and secret scanning"
    }

    fn run(&self, ctx: &CheckContext<'_>, logger: &mut ResultLogger<dyn Write>) -> Result<()> {
        let security_url = ctx.settings_url("security_analysis");

        if ctx.api.vulnerability_alerts_enabled(ctx.repo)? {
            logger.good("Vulnerability alerts are enabled", Details::new())?;
        } else {
            logger.danger(
                "Vulnerability alerts are disabled",
                Details::new().resolve_url(security_url.as_str()),
            )?;
        }

        let Some(ref analysis) = ctx.repository.security_and_analysis else {
            return Ok(());
        };
        if let Some(ref scanning) = analysis.secret_scanning {
            if scanning.is_enabled() {
                logger.good("Secret scanning is enabled", Details::new())?;
            } else {
                logger.caution(
                    "Consider enabling secret scanning",
                    Details::new().resolve_url(security_url.as_str()),
                )?;
            }
        }
        if let Some(ref push) = analysis.secret_scanning_push_protection {
            if push.is_enabled() {
                logger.good("Secret scanning push protection is enabled", Details::new())?;
            } else {
                logger.caution(
                    "Consider enabling secret scanning push protection",
                    Details::new().resolve_url(security_url),
                )?;
            }
        }
        Ok(())
    }
}

//! Response bodies for the GitHub REST endpoints the checks use.
//!
//! Only the fields the checks read are modelled; everything else in the
//! payloads is ignored. Field names follow GitHub's schemas.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub login: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollaboratorPermission {
    #[serde(default)]
    pub permission: String,
    pub user: Option<Collaborator>,
}

impl CollaboratorPermission {
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .and_then(|u| u.permissions.as_ref())
            .is_some_and(|p| p.admin)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collaborator {
    pub login: String,
    pub permissions: Option<Permissions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub default_branch: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Only returned to admins, and only for features the plan supports.
    pub security_and_analysis: Option<SecurityAndAnalysis>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityAndAnalysis {
    pub secret_scanning: Option<FeatureStatus>,
    pub secret_scanning_push_protection: Option<FeatureStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureStatus {
    pub status: String,
}

impl FeatureStatus {
    pub fn is_enabled(&self) -> bool {
        self.status == "enabled"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Internal,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretList {
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Secret {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentList {
    #[serde(default)]
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub protection_rules: Vec<ProtectionRule>,
    pub deployment_branch_policy: Option<DeploymentBranchPolicy>,
}

impl Environment {
    /// Access is limited to specific branches or to protected branches.
    pub fn has_branch_policy(&self) -> bool {
        self.deployment_branch_policy
            .as_ref()
            .is_some_and(|p| p.custom_branch_policies || p.protected_branches)
    }

    /// Has a protection rule other than a wait timer, which alone does not
    /// keep a workflow from reaching the secrets.
    pub fn has_gating_rule(&self) -> bool {
        self.protection_rules
            .iter()
            .any(|r| r.rule_type != "wait_timer")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtectionRule {
    #[serde(rename = "type")]
    pub rule_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentBranchPolicy {
    #[serde(default)]
    pub protected_branches: bool,
    #[serde(default)]
    pub custom_branch_policies: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchProtection {
    pub required_status_checks: Option<RequiredStatusChecks>,
    pub required_pull_request_reviews: Option<PullRequestReviews>,
    pub enforce_admins: Option<EnabledSetting>,
    pub allow_force_pushes: Option<EnabledSetting>,
    pub allow_deletions: Option<EnabledSetting>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EnabledSetting {
    #[serde(default)]
    pub enabled: bool,
}

/// `true` when the setting is present and enabled.
pub fn enabled(setting: &Option<EnabledSetting>) -> bool {
    setting.is_some_and(|s| s.enabled)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequiredStatusChecks {
    #[serde(default)]
    pub contexts: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestReviews {
    pub required_approving_review_count: Option<u32>,
    #[serde(default)]
    pub dismiss_stale_reviews: bool,
    #[serde(default)]
    pub require_code_owner_reviews: bool,
    #[serde(default)]
    pub require_last_push_approval: bool,
    pub dismissal_restrictions: Option<serde_json::Value>,
    pub bypass_pull_request_allowances: Option<BypassAllowances>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BypassAllowances {
    #[serde(default)]
    pub users: Vec<Collaborator>,
    #[serde(default)]
    pub teams: Vec<Named>,
    #[serde(default)]
    pub apps: Vec<Named>,
}

impl BypassAllowances {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.teams.is_empty() && self.apps.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionsPermissions {
    #[serde(default)]
    pub enabled: bool,
    pub allowed_actions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowPermissions {
    #[serde(default)]
    pub default_workflow_permissions: String,
    #[serde(default)]
    pub can_approve_pull_request_reviews: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForkPrApprovalPolicy {
    pub approval_policy: Option<String>,
}

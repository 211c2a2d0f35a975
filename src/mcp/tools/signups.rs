//! Tools for reviewing pending staff signups.
//!
//! Approving activates the user account and rejecting marks it rejected; the
//! backend emails the applicant in both cases.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::mcp::{
    error::AdminError,
    http::{AdminApi, Method},
    tools::require_id,
};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApproveSignupRequest {
    #[schemars(description = "UUID of the signup request to approve")]
    pub signup_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional internal notes recorded with the approval")]
    pub approval_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RejectSignupRequest {
    #[schemars(description = "UUID of the signup request to reject")]
    pub signup_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional reason for rejection (sent to the applicant by email)")]
    pub reason: Option<String>,
}

/// `{}` without notes, `{"approvalNotes": ...}` with them.
#[must_use]
pub fn approve_body(args: &ApproveSignupRequest) -> Value {
    args.approval_notes.as_ref().map_or_else(
        || Value::Object(Map::new()),
        |notes| json!({ "approvalNotes": notes }),
    )
}

/// `{}` when no reason was given. An empty reason is still sent as
/// `{"reason": ""}` so the two cases stay distinguishable on the wire.
#[must_use]
pub fn reject_body(args: &RejectSignupRequest) -> Value {
    args.reason.as_ref().map_or_else(
        || Value::Object(Map::new()),
        |reason| json!({ "reason": reason }),
    )
}

/// # Errors
/// Whatever [`AdminApi::call`] reports.
pub async fn list_pending_signups(api: &AdminApi) -> Result<Value, AdminError> {
    let url = api.endpoint(&["api", "admin", "signups", "pending"])?;
    api.call(Method::GET, url, None).await
}

/// # Errors
/// `InvalidParams` for a blank `signup_id`, otherwise whatever [`AdminApi::call`] reports.
pub async fn approve_signup(
    api: &AdminApi,
    args: &ApproveSignupRequest,
) -> Result<Value, AdminError> {
    let signup_id = require_id("signup_id", &args.signup_id)?;
    info!(%signup_id, "approving signup");
    let url = api.endpoint(&["api", "admin", "signups", signup_id, "approve"])?;
    api.call(Method::POST, url, Some(&approve_body(args))).await
}

/// # Errors
/// `InvalidParams` for a blank `signup_id`, otherwise whatever [`AdminApi::call`] reports.
pub async fn reject_signup(
    api: &AdminApi,
    args: &RejectSignupRequest,
) -> Result<Value, AdminError> {
    let signup_id = require_id("signup_id", &args.signup_id)?;
    info!(%signup_id, with_reason = args.reason.is_some(), "rejecting signup");
    let url = api.endpoint(&["api", "admin", "signups", signup_id, "reject"])?;
    api.call(Method::POST, url, Some(&reject_body(args))).await
}

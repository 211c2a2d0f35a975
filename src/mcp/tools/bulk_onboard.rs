//! Tool for onboarding a whole batch of staff in one call.
//!
//! The sequencing and outcome bookkeeping live in [`crate::mcp::onboarding`];
//! this module only adapts them to the tool surface.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::{
    error::AdminError,
    http::AdminApi,
    onboarding::{self, EmployeeRecord},
};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BulkOnboardRequest {
    #[schemars(
        description = "Staff to onboard, processed in order. Each entry needs employee_id and email; notes are optional. Example: [{\"employee_id\": \"EMP-001\", \"email\": \"john@sasa-worldwide.com\", \"notes\": \"Sales\"}]"
    )]
    pub employee_data: Vec<EmployeeRecord>,
}

/// Always succeeds at the tool level; per-record failures are reported in
/// the summary.
///
/// # Errors
/// `Serialization` only if the summary cannot be encoded.
pub async fn bulk_onboard_staff(
    api: &AdminApi,
    args: &BulkOnboardRequest,
) -> Result<Value, AdminError> {
    let summary = onboarding::bulk_onboard(api, &args.employee_data).await;
    Ok(serde_json::to_value(summary)?)
}

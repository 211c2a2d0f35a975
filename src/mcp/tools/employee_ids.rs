//! Tools for issuing and managing staff employee IDs.
//!
//! An employee ID gates the staff signup flow: an admin issues one against an
//! email address, the backend optionally mails it out, and the new staff member
//! quotes it when signing up. Format checking (`EMP-12345`, `SASA-12345`) is the
//! backend's job; nothing here inspects the ID.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::mcp::{
    error::AdminError,
    http::{AdminApi, Method},
    tools::require_id,
};

const fn default_send_email() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateEmployeeIdRequest {
    #[schemars(description = "Employee ID in format EMP-12345 or SASA-12345")]
    pub employee_id: String,
    #[schemars(description = "Email address to assign this employee ID to")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional notes about this employee, e.g. team and location")]
    pub notes: Option<String>,
    #[serde(default = "default_send_email")]
    #[schemars(description = "Whether to email the employee ID immediately. Defaults to true.")]
    pub send_email: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeIdRecordRequest {
    #[schemars(
        description = "UUID of the employee ID record (the `id` field returned by list_employee_ids, not the EMP-12345 value)"
    )]
    pub employee_id_record_id: String,
}

/// Wire body for `POST /api/admin/employee-ids`. `notes` is sent as `null`
/// when absent.
#[must_use]
pub fn create_body(args: &CreateEmployeeIdRequest) -> Value {
    json!({
        "employeeId": args.employee_id,
        "email": args.email,
        "notes": args.notes,
        "sendEmail": args.send_email,
    })
}

/// # Errors
/// Whatever [`AdminApi::call`] reports.
pub async fn create_employee_id(
    api: &AdminApi,
    args: &CreateEmployeeIdRequest,
) -> Result<Value, AdminError> {
    info!(employee_id = %args.employee_id, send_email = args.send_email, "creating employee ID");
    let url = api.endpoint(&["api", "admin", "employee-ids"])?;
    api.call(Method::POST, url, Some(&create_body(args))).await
}

/// # Errors
/// Whatever [`AdminApi::call`] reports.
pub async fn list_employee_ids(api: &AdminApi) -> Result<Value, AdminError> {
    let url = api.endpoint(&["api", "admin", "employee-ids"])?;
    api.call(Method::GET, url, None).await
}

/// # Errors
/// `InvalidParams` for a blank `employee_id_record_id`, otherwise whatever [`AdminApi::call`] reports.
pub async fn send_employee_id_email(
    api: &AdminApi,
    args: &EmployeeIdRecordRequest,
) -> Result<Value, AdminError> {
    let record_id = require_id("employee_id_record_id", &args.employee_id_record_id)?;
    let url = api.endpoint(&["api", "admin", "employee-ids", "send-email"])?;
    let body = json!({ "employeeIdRecordId": record_id });
    api.call(Method::POST, url, Some(&body)).await
}

/// # Errors
/// `InvalidParams` for a blank `employee_id_record_id`, otherwise whatever [`AdminApi::call`] reports.
pub async fn revoke_employee_id(
    api: &AdminApi,
    args: &EmployeeIdRecordRequest,
) -> Result<Value, AdminError> {
    let record_id = require_id("employee_id_record_id", &args.employee_id_record_id)?;
    info!(%record_id, "revoking employee ID");
    let url = api.endpoint(&["api", "admin", "employee-ids", record_id])?;
    api.call(Method::DELETE, url, None).await
}

//! Bulk onboarding of staff.
//!
//! Issues one employee ID per record, strictly in input order, and folds the
//! outcomes into a [`BulkSummary`]. Each record is isolated: a backend refusal,
//! a transport failure or a record that fails validation is recorded as a
//! [`OnboardOutcome::Failure`] and the batch moves on to the next record.
//!
//! Whether a create call succeeded is decided once, right after the response
//! is decoded (see [`OnboardOutcome::from_response`]); the summary never looks
//! at raw JSON again.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::mcp::{
    error::AdminError,
    http::AdminApi,
    tools::employee_ids::{self, CreateEmployeeIdRequest},
};

const NO_SUCCESS_FLAG: &str = "response did not report success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeRecord {
    // Missing fields default to empty so the record reaches `validate`
    // instead of failing the whole batch at deserialization.
    #[serde(default)]
    #[schemars(description = "Employee ID, e.g. EMP-00101")]
    pub employee_id: String,
    #[serde(default)]
    #[schemars(description = "Email address the employee ID is sent to")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional notes, e.g. role and location")]
    pub notes: Option<String>,
}

impl EmployeeRecord {
    #[must_use]
    pub fn new(employee_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            email: email.into(),
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Both `employee_id` and `email` must be non-blank.
    ///
    /// # Errors
    /// `InvalidParams` naming the first blank field.
    pub fn validate(&self) -> Result<(), AdminError> {
        if self.employee_id.trim().is_empty() {
            return Err(AdminError::InvalidParams(
                "employee_id is required".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(AdminError::InvalidParams(format!(
                "email is required for employee {}",
                self.employee_id
            )));
        }
        Ok(())
    }

    /// Bulk onboarding always emails the new ID.
    fn create_request(&self) -> CreateEmployeeIdRequest {
        CreateEmployeeIdRequest {
            employee_id: self.employee_id.clone(),
            email: self.email.clone(),
            notes: self.notes.clone(),
            send_email: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OnboardOutcome {
    Success {
        response: Value,
    },
    Failure {
        /// `None` when no response was received at all.
        #[serde(default)]
        response: Option<Value>,
        reason: String,
    },
}

impl OnboardOutcome {
    /// Classifies a decoded create response by its `success` field.
    #[must_use]
    pub fn from_response(response: Value) -> Self {
        if response.get("success").is_some_and(is_truthy) {
            return Self::Success { response };
        }
        let reason = ["error", "message"]
            .iter()
            .find_map(|key| response.get(key).and_then(Value::as_str))
            .unwrap_or(NO_SUCCESS_FLAG)
            .to_string();
        Self::Failure {
            response: Some(response),
            reason,
        }
    }

    /// A record that never got a response, either because it failed
    /// validation or because the request itself failed.
    #[must_use]
    pub fn from_error(err: &AdminError) -> Self {
        Self::Failure {
            response: None,
            reason: err.to_string(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn response(&self) -> Option<&Value> {
        match self {
            Self::Success { response } => Some(response),
            Self::Failure { response, .. } => response.as_ref(),
        }
    }
}

/// Loose truthiness for the backend's `success` flag.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardResult {
    pub employee_id: String,
    pub email: String,
    #[serde(flatten)]
    pub outcome: OnboardOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// One entry per input record, in input order.
    pub results: Vec<OnboardResult>,
}

impl BulkSummary {
    #[must_use]
    pub fn from_results(results: Vec<OnboardResult>) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.outcome.is_success()).count();
        Self {
            total,
            successful,
            failed: total - successful,
            results,
        }
    }

    /// Failed records, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &OnboardResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }
}

/// Onboards a single record. Never fails: every problem becomes a
/// `Failure` outcome.
pub async fn onboard_one(api: &AdminApi, record: &EmployeeRecord) -> OnboardResult {
    let outcome = match record.validate() {
        Err(err) => OnboardOutcome::from_error(&err),
        Ok(()) => match employee_ids::create_employee_id(api, &record.create_request()).await {
            Ok(response) => OnboardOutcome::from_response(response),
            Err(err) => OnboardOutcome::from_error(&err),
        },
    };

    match &outcome {
        OnboardOutcome::Success { .. } => {
            info!(employee_id = %record.employee_id, "employee onboarded");
        }
        OnboardOutcome::Failure { reason, .. } => {
            warn!(employee_id = %record.employee_id, %reason, "employee onboarding failed");
        }
    }

    OnboardResult {
        employee_id: record.employee_id.clone(),
        email: record.email.clone(),
        outcome,
    }
}

/// Onboards every record in order, awaiting each create call before
/// starting the next.
pub async fn bulk_onboard(api: &AdminApi, records: &[EmployeeRecord]) -> BulkSummary {
    info!(total = records.len(), "starting bulk onboarding");

    let mut results = Vec::with_capacity(records.len());
    for record in records {
        results.push(onboard_one(api, record).await);
    }

    let summary = BulkSummary::from_results(results);
    info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        "bulk onboarding complete"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::http::Credentials;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api(server: &MockServer) -> AdminApi {
        AdminApi::new(server.base_url(), Credentials::Bearer("test-token".into()))
    }

    fn sales_team() -> Vec<EmployeeRecord> {
        vec![
            EmployeeRecord::new("EMP-00101", "sarah.johnson@sasa-worldwide.com")
                .with_notes("Sales Manager - Dubai"),
            EmployeeRecord::new("EMP-00102", "michael.chen@sasa-worldwide.com")
                .with_notes("Sales Representative - Abu Dhabi"),
            EmployeeRecord::new("EMP-00103", "fatima.ahmed@sasa-worldwide.com")
                .with_notes("Sales Representative - Sharjah"),
            EmployeeRecord::new("EMP-00104", "david.wilson@sasa-worldwide.com")
                .with_notes("Sales Executive - Al Ain"),
            EmployeeRecord::new("EMP-00105", "layla.hassan@sasa-worldwide.com")
                .with_notes("Business Development - Dubai"),
        ]
    }

    #[test]
    fn success_flag_decides_outcome() {
        assert!(OnboardOutcome::from_response(json!({ "success": true })).is_success());
        assert!(OnboardOutcome::from_response(json!({ "success": 1 })).is_success());
        assert!(OnboardOutcome::from_response(json!({ "success": -0.5 })).is_success());
        assert!(!OnboardOutcome::from_response(json!({ "success": 0 })).is_success());
        assert!(!OnboardOutcome::from_response(json!({ "success": 0.0 })).is_success());
        assert!(!OnboardOutcome::from_response(json!({ "success": false })).is_success());
        assert!(!OnboardOutcome::from_response(json!({ "success": null })).is_success());
        assert!(!OnboardOutcome::from_response(json!({ "success": "" })).is_success());
        assert!(!OnboardOutcome::from_response(json!({})).is_success());
        assert!(!OnboardOutcome::from_response(json!([])).is_success());
    }

    #[test]
    fn failure_reason_prefers_backend_error() {
        let outcome =
            OnboardOutcome::from_response(json!({ "error": "This employee ID already exists" }));
        assert_eq!(
            outcome,
            OnboardOutcome::Failure {
                response: Some(json!({ "error": "This employee ID already exists" })),
                reason: "This employee ID already exists".into(),
            }
        );

        match OnboardOutcome::from_response(json!({ "success": false })) {
            OnboardOutcome::Failure { reason, .. } => assert_eq!(reason, NO_SUCCESS_FLAG),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn summary_counts_hold_together() {
        let results = vec![
            OnboardResult {
                employee_id: "EMP-1".into(),
                email: "a@x.com".into(),
                outcome: OnboardOutcome::Success {
                    response: json!({ "success": true }),
                },
            },
            OnboardResult {
                employee_id: "EMP-2".into(),
                email: "b@x.com".into(),
                outcome: OnboardOutcome::Failure {
                    response: None,
                    reason: "boom".into(),
                },
            },
        ];
        let summary = BulkSummary::from_results(results);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, summary.results.len());
        assert_eq!(
            summary.failures().map(|r| r.employee_id.as_str()).collect::<Vec<_>>(),
            vec!["EMP-2"]
        );
    }

    #[test]
    fn result_serializes_flat_with_status_tag() {
        let result = OnboardResult {
            employee_id: "EMP-1".into(),
            email: "a@x.com".into(),
            outcome: OnboardOutcome::Failure {
                response: None,
                reason: "email is required".into(),
            },
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "employee_id": "EMP-1",
                "email": "a@x.com",
                "status": "failure",
                "response": null,
                "reason": "email is required",
            })
        );
    }

    #[test]
    fn record_missing_email_deserializes_then_fails_validation() {
        let record: EmployeeRecord =
            serde_json::from_value(json!({ "employee_id": "EMP-9" })).unwrap();
        assert!(matches!(record.validate(), Err(AdminError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn single_successful_record() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/admin/employee-ids")
                .json_body(json!({
                    "employeeId": "EMP-12345",
                    "email": "john.doe@sasa-worldwide.com",
                    "notes": null,
                    "sendEmail": true,
                }));
            then.status(200).json_body(json!({ "success": true }));
        });

        let records = vec![EmployeeRecord::new("EMP-12345", "john.doe@sasa-worldwide.com")];
        let summary = bulk_onboard(&api(&server), &records).await;

        mock.assert();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn two_refusals_in_five_records() {
        let server = MockServer::start();
        for refused in ["EMP-00102", "EMP-00104"] {
            server.mock(|when, then| {
                when.method(POST)
                    .path("/api/admin/employee-ids")
                    .body_contains(refused);
                then.status(400)
                    .json_body(json!({ "success": false, "error": "This employee ID already exists" }));
            });
        }
        let accepted = server.mock(|when, then| {
            when.method(POST)
                .path("/api/admin/employee-ids")
                .matches(|req| {
                    let body = req.body.as_deref().unwrap_or_default();
                    let body = String::from_utf8_lossy(body);
                    !body.contains("EMP-00102") && !body.contains("EMP-00104")
                });
            then.status(200).json_body(json!({ "success": true }));
        });

        let records = sales_team();
        let summary = bulk_onboard(&api(&server), &records).await;

        accepted.assert_hits(3);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.successful, 3);
        assert_eq!(summary.failed, 2);

        let ids: Vec<&str> = summary.results.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(
            ids,
            records.iter().map(|r| r.employee_id.as_str()).collect::<Vec<_>>()
        );
        let statuses: Vec<bool> = summary.results.iter().map(|r| r.outcome.is_success()).collect();
        assert_eq!(statuses, vec![true, false, true, false, true]);
    }

    #[tokio::test]
    async fn every_record_forces_send_email() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/admin/employee-ids")
                .json_body_partial(r#"{ "sendEmail": true }"#);
            then.status(200).json_body(json!({ "success": true }));
        });

        let summary = bulk_onboard(&api(&server), &sales_team()).await;

        mock.assert_hits(5);
        assert_eq!(summary.successful, 5);
    }

    #[tokio::test]
    async fn invalid_record_is_skipped_without_network_call() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/admin/employee-ids");
            then.status(200).json_body(json!({ "success": true }));
        });

        let records = vec![
            EmployeeRecord::new("EMP-00201", "amal@sasa-worldwide.com"),
            EmployeeRecord::new("EMP-00202", "   "),
            EmployeeRecord::new("EMP-00203", "omar@sasa-worldwide.com"),
        ];
        let summary = bulk_onboard(&api(&server), &records).await;

        mock.assert_hits(2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.successful, 2);
        match &summary.results[1].outcome {
            OnboardOutcome::Failure { response, reason } => {
                assert!(response.is_none());
                assert!(reason.contains("email is required"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_does_not_abort_batch() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/admin/employee-ids")
                .body_contains("EMP-00301");
            then.status(502).body("<html>upstream unavailable</html>");
        });
        let healthy = server.mock(|when, then| {
            when.method(POST)
                .path("/api/admin/employee-ids")
                .body_contains("EMP-00302");
            then.status(200).json_body(json!({ "success": true }));
        });

        let records = vec![
            EmployeeRecord::new("EMP-00301", "first@sasa-worldwide.com"),
            EmployeeRecord::new("EMP-00302", "second@sasa-worldwide.com"),
        ];
        let summary = bulk_onboard(&api(&server), &records).await;

        healthy.assert();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.successful, 1);
        assert!(matches!(
            summary.results[0].outcome,
            OnboardOutcome::Failure { response: None, .. }
        ));
    }

    #[tokio::test]
    async fn unreachable_backend_fails_every_record() {
        let api = AdminApi::new("http://127.0.0.1:9", Credentials::Bearer("t".into()));
        let summary = bulk_onboard(&api, &sales_team()).await;

        assert_eq!(summary.total, 5);
        assert_eq!(summary.successful, 0);
        assert_eq!(summary.failed, 5);
    }

    #[tokio::test]
    async fn empty_batch_is_an_empty_summary() {
        let api = AdminApi::new("http://127.0.0.1:9", Credentials::Bearer("t".into()));
        let summary = bulk_onboard(&api, &[]).await;
        assert_eq!(summary, BulkSummary::from_results(Vec::new()));
        assert_eq!(summary.total, 0);
    }

    #[tokio::test]
    async fn rerunning_a_batch_onboards_twice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/admin/employee-ids");
            then.status(200).json_body(json!({ "success": true }));
        });

        let records = sales_team();
        let api = api(&server);
        let first = bulk_onboard(&api, &records).await;
        let second = bulk_onboard(&api, &records).await;

        mock.assert_hits(10);
        assert_eq!(first, second);
        assert_eq!(first.total, 5);
    }
}

//! Walks through the admin tools against a running backend:
//! one employee ID, a bulk onboarding batch, and a request the backend refuses.
//!
//! Needs the same environment as the server (`ADMIN_API_BASE_URL` and one of
//! the credential variables).

use anyhow::Result;
use dotenv::dotenv;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sasa_admin_mcp::mcp::{
    http::AdminApi,
    onboarding::{self, EmployeeRecord, OnboardOutcome},
    tools::employee_ids::{self, CreateEmployeeIdRequest},
};

fn rule() {
    println!("{}", "-".repeat(50));
}

async fn single_employee(api: &AdminApi) -> Result<()> {
    println!("Example 1: Creating single employee ID");
    rule();

    let args = CreateEmployeeIdRequest {
        employee_id: "EMP-12345".to_string(),
        email: "john.doe@sasa-worldwide.com".to_string(),
        notes: Some("New sales team member".to_string()),
        send_email: true,
    };
    let result = employee_ids::create_employee_id(api, &args).await?;
    println!("Result: {result}\n");
    Ok(())
}

async fn bulk_onboarding(api: &AdminApi) {
    println!("Example 2: Bulk onboarding new sales team");
    rule();

    let new_staff = vec![
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
    ];

    println!("Creating {} employee IDs...", new_staff.len());
    let summary = onboarding::bulk_onboard(api, &new_staff).await;

    println!("\nBulk onboarding complete");
    println!("   Total: {}", summary.total);
    println!("   Successful: {}", summary.successful);
    println!("   Failed: {}", summary.failed);

    println!("\nPer employee:");
    for result in &summary.results {
        match &result.outcome {
            OnboardOutcome::Success { .. } => {
                println!("   [ok]     {} ({})", result.email, result.employee_id);
            }
            OnboardOutcome::Failure { reason, .. } => {
                println!("   [failed] {} ({}): {reason}", result.email, result.employee_id);
            }
        }
    }
    println!();
}

async fn with_error_handling(api: &AdminApi) {
    println!("Example 3: With error handling");
    rule();

    let args = CreateEmployeeIdRequest {
        employee_id: "INVALID-FORMAT".to_string(),
        email: "test@sasa-worldwide.com".to_string(),
        notes: None,
        send_email: false,
    };
    match employee_ids::create_employee_id(api, &args).await {
        Ok(result) => match OnboardOutcome::from_response(result) {
            OnboardOutcome::Success { response } => println!("Success: {response}"),
            OnboardOutcome::Failure { reason, .. } => println!("Refused by backend: {reason}"),
        },
        Err(e) => {
            error!(error = %e, "request failed");
            println!("Error: {e}");
            println!("   Make sure the admin API is running at {}", api.base_url());
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api = AdminApi::from_env()?;

    println!("SASA admin bulk onboarding examples");
    println!("{}\n", "=".repeat(50));

    single_employee(&api).await?;
    bulk_onboarding(&api).await;
    with_error_handling(&api).await;

    println!("All examples completed");
    Ok(())
}

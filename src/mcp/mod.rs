//! SASA Worldwide admin Model Context Protocol implementation.
//!
//! This crate provides MCP tools for the SASA admin REST API.
//! The implementation is organized into:
//!
//! - `error`: Error types and conversions
//! - `http`: Configuration, credentials and API communication
//! - `onboarding`: Sequential bulk onboarding with per-record outcomes
//! - `tools`: Individual MCP tools for specific admin operations
//!
//! The main entry point is `SasaAdminMcp`, which provides the MCP server
//! implementation and routes every tool.

pub mod error;
pub mod http;
pub mod onboarding;
pub mod tools;

use anyhow::{Result, anyhow};
use axum::http::request;
use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Implementation, InitializeRequestParam, InitializeResult,
        ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::mcp::{
    http::AdminApi,
    tools::{
        bulk_onboard::{self, BulkOnboardRequest},
        employee_ids::{self, CreateEmployeeIdRequest, EmployeeIdRecordRequest},
        signups::{self, ApproveSignupRequest, RejectSignupRequest},
        users::{self, ListUsersRequest, UserRequest},
    },
};

#[derive(Clone)]
pub struct SasaAdminMcp {
    api: AdminApi,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SasaAdminMcp {
    /// Builds the server from environment configuration.
    ///
    /// # Errors
    /// Fails fast if credentials are missing or the base URL is unusable.
    pub fn new() -> Result<Self> {
        let api = AdminApi::from_env().map_err(|e| anyhow!("Failed to load admin API config: {e}"))?;
        info!(
            base_url = api.base_url(),
            auth = api.credentials().scheme(),
            "admin API configured"
        );
        Ok(Self::with_api(api))
    }

    #[must_use]
    pub fn with_api(api: AdminApi) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    #[must_use]
    pub const fn api(&self) -> &AdminApi {
        &self.api
    }

    // Thin delegating methods so the `tool_router` proc-macro (which scans
    // this impl block) can discover and register the tools. They forward to
    // the implementations in `mcp::tools::*`.

    #[tool(
        description = "Create a new employee ID for staff registration. The employee ID (format EMP-12345 or SASA-12345) is assigned to an email address and, unless send_email is false, emailed to that address."
    )]
    async fn create_employee_id(
        &self,
        Parameters(args): Parameters<CreateEmployeeIdRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = employee_ids::create_employee_id(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "List all issued employee IDs with their status (unused, used, revoked).")]
    async fn list_employee_ids(&self) -> Result<CallToolResult, ErrorData> {
        let json = employee_ids::list_employee_ids(&self.api).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Re-send the employee ID email for an existing, non-revoked employee ID record.")]
    async fn send_employee_id_email(
        &self,
        Parameters(args): Parameters<EmployeeIdRecordRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = employee_ids::send_employee_id_email(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Revoke an unused employee ID so it can no longer be used to sign up.")]
    async fn revoke_employee_id(
        &self,
        Parameters(args): Parameters<EmployeeIdRecordRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = employee_ids::revoke_employee_id(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Get all pending staff signup requests waiting for admin approval.")]
    async fn list_pending_signups(&self) -> Result<CallToolResult, ErrorData> {
        let json = signups::list_pending_signups(&self.api).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Approve a pending staff signup request. The user account becomes active and the applicant is emailed.")]
    async fn approve_signup(
        &self,
        Parameters(args): Parameters<ApproveSignupRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = signups::approve_signup(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Reject a pending staff signup request, optionally with a reason that is emailed to the applicant.")]
    async fn reject_signup(
        &self,
        Parameters(args): Parameters<RejectSignupRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = signups::reject_signup(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Get all users, optionally filtered by role (staff, affiliate, admin) and/or status (active, pending, suspended, rejected).")]
    async fn list_all_users(
        &self,
        Parameters(args): Parameters<ListUsersRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = users::list_all_users(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Suspend a user account, preventing login. Admin accounts cannot be suspended.")]
    async fn suspend_user(
        &self,
        Parameters(args): Parameters<UserRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = users::suspend_user(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(description = "Activate a suspended user account.")]
    async fn activate_user(
        &self,
        Parameters(args): Parameters<UserRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = users::activate_user(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }

    #[tool(
        description = "Onboard multiple staff members at once. Creates and emails one employee ID per entry, in order, and returns total, successful and failed counts plus a per-employee result. One failed entry never stops the rest."
    )]
    async fn bulk_onboard_staff(
        &self,
        Parameters(args): Parameters<BulkOnboardRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let json = bulk_onboard::bulk_onboard_staff(&self.api, &args).await?;
        Ok(CallToolResult::structured(json))
    }
}

#[tool_handler]
impl ServerHandler for SasaAdminMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "SASA Worldwide admin operations: employee IDs, staff signup review, user account management and bulk staff onboarding"
                    .to_string(),
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, ErrorData> {
        if let Some(http_request_part) = context.extensions.get::<request::Parts>() {
            let initialize_headers = &http_request_part.headers;
            let initialize_uri = &http_request_part.uri;
            info!(?initialize_headers, %initialize_uri, "initialize from http server");
        }
        Ok(self.get_info())
    }
}

//! Tools for listing and changing the state of user accounts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::mcp::{
    error::AdminError,
    http::{AdminApi, Method, Url},
    tools::require_id,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListUsersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Filter by role: staff, affiliate or admin")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Filter by status: active, pending, suspended or rejected")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserRequest {
    #[schemars(description = "UUID of the user account")]
    pub user_id: String,
}

/// `GET /api/admin/users` with only the filters that were actually given.
///
/// # Errors
/// `MissingConfig` when the base URL is unusable.
pub fn users_url(api: &AdminApi, args: &ListUsersRequest) -> Result<Url, AdminError> {
    let mut url = api.endpoint(&["api", "admin", "users"])?;
    let filters: Vec<(&str, &str)> = [("role", &args.role), ("status", &args.status)]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect();

    if !filters.is_empty() {
        url.query_pairs_mut().extend_pairs(filters);
    }
    Ok(url)
}

/// # Errors
/// Whatever [`AdminApi::call`] reports.
pub async fn list_all_users(api: &AdminApi, args: &ListUsersRequest) -> Result<Value, AdminError> {
    let url = users_url(api, args)?;
    api.call(Method::GET, url, None).await
}

/// # Errors
/// `InvalidParams` for a blank `user_id`, otherwise whatever [`AdminApi::call`] reports.
pub async fn suspend_user(api: &AdminApi, args: &UserRequest) -> Result<Value, AdminError> {
    let user_id = require_id("user_id", &args.user_id)?;
    info!(%user_id, "suspending user");
    let url = api.endpoint(&["api", "admin", "users", user_id, "suspend"])?;
    api.call(Method::POST, url, None).await
}

/// # Errors
/// `InvalidParams` for a blank `user_id`, otherwise whatever [`AdminApi::call`] reports.
pub async fn activate_user(api: &AdminApi, args: &UserRequest) -> Result<Value, AdminError> {
    let user_id = require_id("user_id", &args.user_id)?;
    info!(%user_id, "activating user");
    let url = api.endpoint(&["api", "admin", "users", user_id, "activate"])?;
    api.call(Method::POST, url, None).await
}

//! MCP tools for the SASA admin API.
//!
//! Each module implements a group of tools:
//! - `employee_ids`: Issue, list, re-send and revoke staff employee IDs
//! - `signups`: Review pending staff signups
//! - `users`: List, suspend and activate user accounts
//! - `bulk_onboard`: Issue employee IDs for a whole batch of staff
//!
//! Every tool is a free function taking the shared `AdminApi` handle and its
//! typed arguments, returning the backend's decoded JSON unmodified.

pub mod bulk_onboard;
pub mod employee_ids;
pub mod signups;
pub mod users;

use crate::mcp::error::AdminError;

/// Rejects blank identifiers before they are spliced into a URL.
pub(crate) fn require_id<'a>(field: &str, value: &'a str) -> Result<&'a str, AdminError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminError::InvalidParams(format!("{field} cannot be empty.")));
    }
    Ok(trimmed)
}

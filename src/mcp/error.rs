//! Error types for the SASA admin MCP implementation.
//!
//! This module contains the error taxonomy shared by the gateway and the
//! onboarding orchestrator. It provides:
//! - `AdminError`: the main error enum covering every failure the crate reports
//! - Conversions from `reqwest`, `reqwest_middleware` and `serde_json` errors
//! - Conversion to RMCP's `ErrorData` for MCP protocol compliance
//!
//! Backend-reported failures (a JSON body without `success: true`) are not
//! errors at this level; they travel back to the caller as data.

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AdminError> for ErrorData {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::InvalidParams(msg) => Self::new(ErrorCode::INVALID_PARAMS, msg, None),
            AdminError::MissingConfig(msg) => Self::new(ErrorCode::INTERNAL_ERROR, msg, None),
            AdminError::Http(e) => {
                Self::new(ErrorCode::INTERNAL_ERROR, format!("HTTP error: {e}"), None)
            }
            AdminError::HttpMiddleware(e) => Self::new(
                ErrorCode::INTERNAL_ERROR,
                format!("HTTP middleware error: {e}"),
                None,
            ),
            AdminError::Serialization(e) => Self::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None),
        }
    }
}

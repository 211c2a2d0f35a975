//! HTTP client and API communication layer for the SASA admin backend.
//!
//! This module handles all HTTP communication with the admin REST API,
//! including configuration, credential attachment, request construction and
//! response decoding.

mod auth;
mod client;

// Re-export the public API
pub use auth::Credentials;
pub use client::{
    ADMIN_API_BASE_URL, ADMIN_API_TIMEOUT, ADMIN_CREDENTIALS, AdminApi, DEFAULT_BASE_URL,
    resolve_base_url,
};

// Re-export common types used in our public API
pub use reqwest::{Method, Url};

//! Credential attachment for outbound admin API requests.
//!
//! The admin backend rejects anonymous calls with `403`, so every request
//! carries one of the schemes below. Credentials are attached in exactly one
//! place, [`Credentials::apply`], which `AdminApi::call` invokes while
//! constructing each request.

use std::fmt;

use http::header::COOKIE;
use reqwest_middleware::RequestBuilder;

use crate::mcp::error::AdminError;

pub const TOKEN_VAR: &str = "ADMIN_API_TOKEN";
pub const SESSION_COOKIE_VAR: &str = "ADMIN_SESSION_COOKIE";
pub const USERNAME_VAR: &str = "ADMIN_API_USERNAME";
pub const PASSWORD_VAR: &str = "ADMIN_API_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// Raw `Cookie` header value carrying the admin's session token, the way
    /// the web app's own admin pages authenticate.
    SessionCookie(String),
    /// `Authorization: Basic ...`
    Basic { username: String, password: String },
}

impl Credentials {
    /// Resolves credentials from a variable lookup.
    ///
    /// Precedence is token, then session cookie, then username/password.
    /// Blank values count as unset.
    ///
    /// # Errors
    /// `MissingConfig` when no scheme is configured, or a username is given
    /// without a password.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = var(TOKEN_VAR) {
            return Ok(Self::Bearer(token));
        }
        if let Some(cookie) = var(SESSION_COOKIE_VAR) {
            return Ok(Self::SessionCookie(cookie));
        }
        match (var(USERNAME_VAR), var(PASSWORD_VAR)) {
            (Some(username), Some(password)) => Ok(Self::Basic { username, password }),
            (Some(_), None) => Err(AdminError::MissingConfig(format!(
                "{PASSWORD_VAR} must be set when {USERNAME_VAR} is set"
            ))),
            _ => Err(AdminError::MissingConfig(format!(
                "admin API credentials must be set: one of {TOKEN_VAR}, {SESSION_COOKIE_VAR} or {USERNAME_VAR}/{PASSWORD_VAR}"
            ))),
        }
    }

    #[must_use]
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(token) => builder.bearer_auth(token),
            Self::SessionCookie(cookie) => builder.header(COOKIE, cookie.as_str()),
            Self::Basic { username, password } => builder.basic_auth(username, Some(password)),
        }
    }

    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::SessionCookie(_) => "session-cookie",
            Self::Basic { .. } => "basic",
        }
    }
}

// Secrets never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            other => f.debug_tuple(other.scheme()).field(&"<redacted>").finish(),
        }
    }
}

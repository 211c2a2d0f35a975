//! MCP server and client library for SASA Worldwide admin operations.
//!
//! Exposes the admin HTTP API (employee IDs, signup review, user accounts)
//! as MCP tools, plus sequential bulk staff onboarding on top of it.

pub mod mcp;

pub use mcp::SasaAdminMcp;

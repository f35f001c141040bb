//! HTTP request handlers.

/// Health endpoint.
pub mod health;
/// Paste-related endpoints.
pub mod paste;

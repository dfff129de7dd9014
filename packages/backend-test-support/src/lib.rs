//! Backend test support utilities
//!
//! Shared by the backend's integration tests: unified logging
//! initialization and assertions for the `{status, message}` error body.

pub mod error_body;
pub mod logging;

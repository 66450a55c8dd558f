//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::AuthUser;
pub use logging::{request_logging, REQUEST_ID_HEADER};
pub use rate_limit::{rate_limit, spawn_cleanup, ClientRateLimiter, CLEANUP_INTERVAL};

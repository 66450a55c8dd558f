//! Test helpers module
//!
//! This module provides utilities and helpers for testing the StarCast API.
//! It includes a mocked upstream feed server, database helpers, and a test
//! context that wires both into an application router.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use test_context::*;
pub use test_data::*;

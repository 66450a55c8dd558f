//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod saved_event;
pub mod learning;

// Re-export repositories
pub use user::UserRepository;
pub use saved_event::SavedEventRepository;
pub use learning::LearningRepository;

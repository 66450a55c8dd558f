//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, UserRepository, SavedEventRepository, LearningRepository};
use crate::database::seed::seed_learning_content;
use crate::utils::errors::StarCastError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub saved_events: SavedEventRepository,
    pub learning: LearningRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            saved_events: SavedEventRepository::new(pool.clone()),
            learning: LearningRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Seed the static learning catalogue
    pub async fn seed(&self) -> Result<(), StarCastError> {
        seed_learning_content(&self.learning).await
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), StarCastError> {
        super::connection::health_check(&self.pool).await
    }
}

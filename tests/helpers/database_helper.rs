//! Test database helper utilities
//!
//! Uses `TEST_DATABASE_URL` when set, otherwise starts a throwaway
//! PostgreSQL container.

use sqlx::PgPool;
use std::sync::Once;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres as PostgresImage;

static INIT: Once = Once::new();

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Test database helper that manages PostgreSQL test database setup
pub struct TestDatabase {
    pub pool: PgPool,
    pub database_url: String,
    _container: Option<ContainerAsync<PostgresImage>>,
}

impl TestDatabase {
    /// Create a migrated, empty test database
    pub async fn new() -> TestResult<Self> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });

        let (database_url, container) = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => (url, None),
            Err(_) => {
                let container = PostgresImage::default()
                    .with_db_name("starcast_test")
                    .with_user("starcast")
                    .with_password("starcast")
                    .with_tag("16-alpine")
                    .start()
                    .await?;
                let host = container.get_host().await?;
                let port = container.get_host_port_ipv4(5432).await?;
                let url = format!("postgresql://starcast:starcast@{}:{}/starcast_test", host, port);
                (url, Some(container))
            }
        };

        let pool = PgPool::connect(&database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let database = Self {
            pool,
            database_url,
            _container: container,
        };
        database.cleanup().await?;
        Ok(database)
    }

    /// Remove all user data; the learning catalogue is left in place
    pub async fn cleanup(&self) -> TestResult {
        sqlx::query("TRUNCATE user_progress, saved_events, users RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count_records(&self, table: &str) -> TestResult<i64> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

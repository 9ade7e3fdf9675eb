use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

/// PostgreSQL-backed store. Implements both `UserStore` and `OrderStore`.
#[derive(Clone)]
pub struct PgStore {
    pub pool: PgPool,
}

/// Store failures callers need to tell apart from plain I/O errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated ({constraint})")]
    UniqueViolation { constraint: String },
}

impl StoreError {
    pub fn unique(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

pub(crate) fn map_insert_error(e: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::unique(constraint).into();
        }
    }
    anyhow::Error::new(e).context("insert row")
}

use crate::models::{AssignmentRecord, CalendarDay};
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL client for the assignment history
///
/// Each finalized assignment is logged per volunteer so that a volunteer's
/// past events can be listed without scanning the event store.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Replace the recorded assignment of an event
    ///
    /// Rows for volunteers no longer assigned are removed; the whole change
    /// runs in one transaction.
    pub async fn record_assignments(
        &self,
        event_id: &str,
        event_title: &str,
        event_date: CalendarDay,
        account_ids: &[String],
    ) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM assignment_history WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        let insert = r#"
            INSERT INTO assignment_history (event_id, account_id, event_title, event_date, assigned_at)
            VALUES ($1, $2, $3, $4, NOW())
        "#;

        for account_id in account_ids {
            sqlx::query(insert)
                .bind(event_id)
                .bind(account_id)
                .bind(event_title)
                .bind(event_date.date())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Recorded {} assignments for event {}",
            account_ids.len(),
            event_id
        );

        Ok(())
    }

    /// Assignments of one volunteer, most recent event first
    pub async fn get_history(&self, account_id: &str) -> Result<Vec<AssignmentRecord>, PostgresError> {
        let query = r#"
            SELECT event_id, account_id, event_title, event_date, assigned_at
            FROM assignment_history
            WHERE account_id = $1
            ORDER BY event_date DESC, assigned_at DESC
        "#;

        let rows = sqlx::query(query).bind(account_id).fetch_all(&self.pool).await?;

        let records = rows
            .iter()
            .map(|row| AssignmentRecord {
                event_id: row.get("event_id"),
                account_id: row.get("account_id"),
                event_title: row.get("event_title"),
                event_date: CalendarDay::from(row.get::<NaiveDate, _>("event_date")),
                assigned_at: row.get("assigned_at"),
            })
            .collect();

        Ok(records)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

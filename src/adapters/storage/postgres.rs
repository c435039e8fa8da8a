//! PostgreSQL implementation of the session store.
//!
//! Sessions are persisted as JSONB documents alongside a plain progress
//! column; generated timelines and recorded selections live in companion
//! tables keyed by (session, question) so replays read exactly what was
//! written. Schema lives under `migrations/`.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::domain::timeline::{SelectionSet, Tweet};
use crate::ports::{SessionStore, StoreError};

/// PostgreSQL implementation of the session store.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Wraps an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool from configuration and optionally runs migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        if config.run_migrations {
            sqlx::migrate!().run(&pool).await?;
        }

        Ok(Self { pool })
    }

    fn db_error(context: &str, error: sqlx::Error, id: &SessionId) -> StoreError {
        if let Some(db) = error.as_database_error() {
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) {
                return StoreError::SessionNotFound(*id);
            }
        }
        StoreError::Database(format!("{}: {}", context, error))
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let record = serde_json::to_value(session)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO survey_sessions (id, record, progress, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET record = EXCLUDED.record, progress = EXCLUDED.progress
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(record)
        .bind(i32::from(session.progress()))
        .bind(session.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("failed to insert session", e, session.id()))?;

        Ok(())
    }

    async fn find_session(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query("SELECT record FROM survey_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("failed to fetch session", e, id))?;

        match row {
            Some(row) => {
                let record: serde_json::Value = row
                    .try_get("record")
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                let session = serde_json::from_value(record)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn update_progress(&self, id: &SessionId, progress: u8) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE survey_sessions
            SET progress = $2,
                record = jsonb_set(record, '{progress}', to_jsonb($2::int))
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(i32::from(progress))
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("failed to update progress", e, id))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::SessionNotFound(*id));
        }

        Ok(())
    }

    async fn save_timeline(
        &self,
        id: &SessionId,
        question: u8,
        timeline: &[Tweet],
    ) -> Result<(), StoreError> {
        let tweets = serde_json::to_value(timeline)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO survey_timelines (session_id, question, tweets)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id, question) DO UPDATE
                SET tweets = EXCLUDED.tweets
            "#,
        )
        .bind(id.as_uuid())
        .bind(i32::from(question))
        .bind(tweets)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("failed to save timeline", e, id))?;

        Ok(())
    }

    async fn load_timeline(
        &self,
        id: &SessionId,
        question: u8,
    ) -> Result<Option<Vec<Tweet>>, StoreError> {
        let row = sqlx::query(
            "SELECT tweets FROM survey_timelines WHERE session_id = $1 AND question = $2",
        )
        .bind(id.as_uuid())
        .bind(i32::from(question))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::db_error("failed to load timeline", e, id))?;

        match row {
            Some(row) => {
                let tweets: serde_json::Value = row
                    .try_get("tweets")
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                let timeline = serde_json::from_value(tweets)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(timeline))
            }
            None => Ok(None),
        }
    }

    async fn save_selections(
        &self,
        id: &SessionId,
        question: u8,
        selections: &SelectionSet,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_value(selections)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO survey_selections (session_id, question, selections)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id, question) DO UPDATE
                SET selections = EXCLUDED.selections
            "#,
        )
        .bind(id.as_uuid())
        .bind(i32::from(question))
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_error("failed to save selections", e, id))?;

        Ok(())
    }

    async fn load_selections(
        &self,
        id: &SessionId,
        question: u8,
    ) -> Result<Option<SelectionSet>, StoreError> {
        let row = sqlx::query(
            "SELECT selections FROM survey_selections WHERE session_id = $1 AND question = $2",
        )
        .bind(id.as_uuid())
        .bind(i32::from(question))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::db_error("failed to load selections", e, id))?;

        match row {
            Some(row) => {
                let payload: serde_json::Value = row
                    .try_get("selections")
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                let selections = serde_json::from_value(payload)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(selections))
            }
            None => Ok(None),
        }
    }

    async fn delete_session(&self, id: &SessionId) -> Result<(), StoreError> {
        // Timelines and selections cascade with the session row.
        sqlx::query("DELETE FROM survey_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("failed to delete session", e, id))?;

        Ok(())
    }
}

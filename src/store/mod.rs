use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::AppError;
use crate::models::{Class, Task, TaskType};

pub const TASKS_KEY: &str = "calendar_tasks";
pub const CLASSES_KEY: &str = "calendar_classes";
pub const TASK_TYPES_KEY: &str = "calendar_task_types";
pub const LAST_SYNC_KEY: &str = "last_sync_timestamp";

/// Key-value persistence for the offline collections. Each key holds one
/// JSON-serialized collection; there is no merge logic here, callers always
/// read and write whole collections.
#[derive(Clone)]
pub struct LocalStore {
    db: SqlitePool,
}

impl LocalStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM local_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    // Unreadable stored value falls back to the caller's default.
                    warn!("discarding malformed value under '{}': {}", key, err);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO local_store (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(json)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.get(TASKS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_tasks(&self, tasks: &[Task]) -> Result<(), AppError> {
        self.put(TASKS_KEY, &tasks).await
    }

    pub async fn classes(&self) -> Result<Vec<Class>, AppError> {
        Ok(self.get(CLASSES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_classes(&self, classes: &[Class]) -> Result<(), AppError> {
        self.put(CLASSES_KEY, &classes).await
    }

    pub async fn task_types(&self) -> Result<Vec<TaskType>, AppError> {
        Ok(self.get(TASK_TYPES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_task_types(&self, types: &[TaskType]) -> Result<(), AppError> {
        self.put(TASK_TYPES_KEY, &types).await
    }

    pub async fn last_sync(&self) -> Result<Option<String>, AppError> {
        self.get(LAST_SYNC_KEY).await
    }

    pub async fn record_sync_now(&self) -> Result<(), AppError> {
        self.put(LAST_SYNC_KEY, &Utc::now().to_rfc3339()).await
    }
}

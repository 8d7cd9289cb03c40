pub mod dto;
pub mod memory;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::{Class, Task, TaskType};

pub use memory::MemoryRemoteStore;

/// Remote relational store. Rows are scoped by `user_id`; upserts are keyed
/// by each table's primary key `id`, so repeating an upsert never duplicates
/// rows.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Whether at least one task row exists for this user.
    async fn any_tasks(&self, user_id: &str) -> Result<bool, AppError>;

    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>, AppError>;
    async fn fetch_classes(&self, user_id: &str) -> Result<Vec<Class>, AppError>;
    async fn fetch_task_types(&self, user_id: &str) -> Result<Vec<TaskType>, AppError>;

    async fn upsert_tasks(&self, tasks: &[Task]) -> Result<(), AppError>;
    async fn upsert_classes(&self, classes: &[Class]) -> Result<(), AppError>;
    async fn upsert_task_types(&self, types: &[TaskType]) -> Result<(), AppError>;

    async fn delete_task(&self, id: &str, user_id: &str) -> Result<(), AppError>;
    async fn delete_class(&self, id: &str, user_id: &str) -> Result<(), AppError>;
    async fn delete_task_type(&self, id: &str, user_id: &str) -> Result<(), AppError>;
}

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub api_key: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env::var("SUPABASE_URL")
            .map_err(|_| AppError::BadRequest("SUPABASE_URL is not set".to_string()))?;
        let api_key = env::var("SUPABASE_KEY")
            .map_err(|_| AppError::BadRequest("SUPABASE_KEY is not set".to_string()))?;

        Ok(Self { base_url, api_key })
    }
}

/// PostgREST client for the three remote tables (`tasks`, `classes`,
/// `task_types`).
pub struct SupabaseRemoteStore {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseRemoteStore {
    pub fn new(config: SupabaseConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Remote(format!("failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url.trim_end_matches('/'), table)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!("select from {} failed with {}: {}", table, status, body)));
        }

        Ok(response.json().await?)
    }

    async fn upsert<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!("upsert into {} failed with {}: {}", table, status, body)));
        }

        Ok(())
    }

    async fn delete(&self, table: &str, id: &str, user_id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.table_url(table))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .query(&[("id", format!("eq.{}", id)), ("user_id", format!("eq.{}", user_id))])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!("delete from {} failed with {}: {}", table, status, body)));
        }

        Ok(())
    }
}

#[async_trait]
impl RemoteStore for SupabaseRemoteStore {
    async fn any_tasks(&self, user_id: &str) -> Result<bool, AppError> {
        let rows: Vec<dto::IdRow> = self
            .select(
                "tasks",
                &[
                    ("select", "id".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>, AppError> {
        self.select(
            "tasks",
            &[("select", "*".to_string()), ("user_id", format!("eq.{}", user_id))],
        )
        .await
    }

    async fn fetch_classes(&self, user_id: &str) -> Result<Vec<Class>, AppError> {
        let rows: Vec<dto::ClassRow> = self
            .select(
                "classes",
                &[("select", "*".to_string()), ("user_id", format!("eq.{}", user_id))],
            )
            .await?;
        Ok(rows.into_iter().map(Class::from).collect())
    }

    async fn fetch_task_types(&self, user_id: &str) -> Result<Vec<TaskType>, AppError> {
        self.select(
            "task_types",
            &[("select", "*".to_string()), ("user_id", format!("eq.{}", user_id))],
        )
        .await
    }

    async fn upsert_tasks(&self, tasks: &[Task]) -> Result<(), AppError> {
        self.upsert("tasks", tasks).await
    }

    async fn upsert_classes(&self, classes: &[Class]) -> Result<(), AppError> {
        let rows: Vec<dto::ClassRow> = classes.iter().cloned().map(dto::ClassRow::from).collect();
        self.upsert("classes", &rows).await
    }

    async fn upsert_task_types(&self, types: &[TaskType]) -> Result<(), AppError> {
        self.upsert("task_types", types).await
    }

    async fn delete_task(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        self.delete("tasks", id, user_id).await
    }

    async fn delete_class(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        self.delete("classes", id, user_id).await
    }

    async fn delete_task_type(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        self.delete("task_types", id, user_id).await
    }
}

use std::sync::Arc;

use chrono::Utc;

use crate::error::AppError;
use crate::models::{Class, Task, TaskType};
use crate::remote::RemoteStore;
use crate::store::LocalStore;

/// Routes entity CRUD to the local store or the remote store depending on
/// whether the caller holds an authenticated user id. Never merges the two;
/// reconciliation is the sync service's job.
pub struct DataService {
    local: LocalStore,
    remote: Arc<dyn RemoteStore>,
    user_id: Option<String>,
}

impl DataService {
    pub fn new(local: LocalStore, remote: Arc<dyn RemoteStore>, user_id: Option<String>) -> Self {
        Self {
            local,
            remote,
            user_id,
        }
    }

    fn remote_user(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub async fn get_tasks(&self) -> Result<Vec<Task>, AppError> {
        match self.remote_user() {
            Some(uid) => self.remote.fetch_tasks(uid).await,
            None => self.local.tasks().await,
        }
    }

    pub async fn add_task(&self, mut task: Task) -> Result<Task, AppError> {
        task.created_at.get_or_insert_with(|| Utc::now().to_rfc3339());
        match self.remote_user() {
            Some(uid) => {
                task.user_id = Some(uid.to_string());
                self.remote.upsert_tasks(std::slice::from_ref(&task)).await?;
            }
            None => {
                let mut tasks = self.local.tasks().await?;
                tasks.push(task.clone());
                self.local.save_tasks(&tasks).await?;
            }
        }
        Ok(task)
    }

    pub async fn update_task(&self, id: &str, mut task: Task) -> Result<Task, AppError> {
        task.id = id.to_string();
        match self.remote_user() {
            Some(uid) => {
                task.user_id = Some(uid.to_string());
                self.remote.upsert_tasks(std::slice::from_ref(&task)).await?;
            }
            None => {
                let mut tasks = self.local.tasks().await?;
                let slot = tasks
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or(AppError::NotFound)?;
                *slot = task.clone();
                self.local.save_tasks(&tasks).await?;
            }
        }
        Ok(task)
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        match self.remote_user() {
            Some(uid) => self.remote.delete_task(id, uid).await,
            None => {
                let mut tasks = self.local.tasks().await?;
                tasks.retain(|t| t.id != id);
                self.local.save_tasks(&tasks).await
            }
        }
    }

    pub async fn get_classes(&self) -> Result<Vec<Class>, AppError> {
        match self.remote_user() {
            Some(uid) => self.remote.fetch_classes(uid).await,
            None => self.local.classes().await,
        }
    }

    pub async fn add_class(&self, mut class: Class) -> Result<Class, AppError> {
        class.created_at.get_or_insert_with(|| Utc::now().to_rfc3339());
        match self.remote_user() {
            Some(uid) => {
                class.user_id = Some(uid.to_string());
                self.remote.upsert_classes(std::slice::from_ref(&class)).await?;
            }
            None => {
                let mut classes = self.local.classes().await?;
                classes.push(class.clone());
                self.local.save_classes(&classes).await?;
            }
        }
        Ok(class)
    }

    /// Wholesale replacement by id; attaching or clearing a syllabus goes
    /// through here as well.
    pub async fn update_class(&self, id: &str, mut class: Class) -> Result<Class, AppError> {
        class.id = id.to_string();
        match self.remote_user() {
            Some(uid) => {
                class.user_id = Some(uid.to_string());
                self.remote.upsert_classes(std::slice::from_ref(&class)).await?;
            }
            None => {
                let mut classes = self.local.classes().await?;
                let slot = classes
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or(AppError::NotFound)?;
                *slot = class.clone();
                self.local.save_classes(&classes).await?;
            }
        }
        Ok(class)
    }

    pub async fn delete_class(&self, id: &str) -> Result<(), AppError> {
        match self.remote_user() {
            Some(uid) => self.remote.delete_class(id, uid).await,
            None => {
                let mut classes = self.local.classes().await?;
                classes.retain(|c| c.id != id);
                self.local.save_classes(&classes).await
            }
        }
    }

    pub async fn get_task_types(&self) -> Result<Vec<TaskType>, AppError> {
        match self.remote_user() {
            Some(uid) => self.remote.fetch_task_types(uid).await,
            None => self.local.task_types().await,
        }
    }

    pub async fn add_task_type(&self, mut task_type: TaskType) -> Result<TaskType, AppError> {
        task_type
            .created_at
            .get_or_insert_with(|| Utc::now().to_rfc3339());
        match self.remote_user() {
            Some(uid) => {
                task_type.user_id = Some(uid.to_string());
                self.remote
                    .upsert_task_types(std::slice::from_ref(&task_type))
                    .await?;
            }
            None => {
                let mut types = self.local.task_types().await?;
                types.push(task_type.clone());
                self.local.save_task_types(&types).await?;
            }
        }
        Ok(task_type)
    }

    pub async fn update_task_type(
        &self,
        id: &str,
        mut task_type: TaskType,
    ) -> Result<TaskType, AppError> {
        task_type.id = id.to_string();
        match self.remote_user() {
            Some(uid) => {
                task_type.user_id = Some(uid.to_string());
                self.remote
                    .upsert_task_types(std::slice::from_ref(&task_type))
                    .await?;
            }
            None => {
                let mut types = self.local.task_types().await?;
                let slot = types
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or(AppError::NotFound)?;
                *slot = task_type.clone();
                self.local.save_task_types(&types).await?;
            }
        }
        Ok(task_type)
    }

    pub async fn delete_task_type(&self, id: &str) -> Result<(), AppError> {
        match self.remote_user() {
            Some(uid) => self.remote.delete_task_type(id, uid).await,
            None => {
                let mut types = self.local.task_types().await?;
                types.retain(|t| t.id != id);
                self.local.save_task_types(&types).await
            }
        }
    }
}

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Class, Task, TaskType};
use crate::remote::RemoteStore;

/// In-process remote store used when no Supabase credentials are configured,
/// and by the integration tests. Upsert replaces by `id`, matching the real
/// store's merge-duplicates behavior.
#[derive(Default)]
pub struct MemoryRemoteStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    tasks: Vec<Task>,
    classes: Vec<Class>,
    task_types: Vec<TaskType>,
}

fn upsert_by_id<T: Clone>(rows: &mut Vec<T>, incoming: &[T], id: impl Fn(&T) -> &str) {
    for item in incoming {
        match rows.iter().position(|row| id(row) == id(item)) {
            Some(pos) => rows[pos] = item.clone(),
            None => rows.push(item.clone()),
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn any_tasks(&self, user_id: &str) -> Result<bool, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .tasks
            .iter()
            .any(|t| t.user_id.as_deref() == Some(user_id)))
    }

    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .tasks
            .iter()
            .filter(|t| t.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn fetch_classes(&self, user_id: &str) -> Result<Vec<Class>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .classes
            .iter()
            .filter(|c| c.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn fetch_task_types(&self, user_id: &str) -> Result<Vec<TaskType>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .task_types
            .iter()
            .filter(|t| t.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn upsert_tasks(&self, tasks: &[Task]) -> Result<(), AppError> {
        let mut tables = self.inner.lock().unwrap();
        upsert_by_id(&mut tables.tasks, tasks, |t| t.id.as_str());
        Ok(())
    }

    async fn upsert_classes(&self, classes: &[Class]) -> Result<(), AppError> {
        let mut tables = self.inner.lock().unwrap();
        upsert_by_id(&mut tables.classes, classes, |c| c.id.as_str());
        Ok(())
    }

    async fn upsert_task_types(&self, types: &[TaskType]) -> Result<(), AppError> {
        let mut tables = self.inner.lock().unwrap();
        upsert_by_id(&mut tables.task_types, types, |t| t.id.as_str());
        Ok(())
    }

    async fn delete_task(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tables = self.inner.lock().unwrap();
        tables
            .tasks
            .retain(|t| !(t.id == id && t.user_id.as_deref() == Some(user_id)));
        Ok(())
    }

    async fn delete_class(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tables = self.inner.lock().unwrap();
        tables
            .classes
            .retain(|c| !(c.id == id && c.user_id.as_deref() == Some(user_id)));
        Ok(())
    }

    async fn delete_task_type(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tables = self.inner.lock().unwrap();
        tables
            .task_types
            .retain(|t| !(t.id == id && t.user_id.as_deref() == Some(user_id)));
        Ok(())
    }
}

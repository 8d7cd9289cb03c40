use std::sync::Arc;

use sqlx::SqlitePool;

use planner_backend::error::AppError;
use planner_backend::models::{Class, Syllabus, Task, TaskType};
use planner_backend::remote::{MemoryRemoteStore, RemoteStore};
use planner_backend::services::DataService;
use planner_backend::store::LocalStore;

async fn local_store() -> LocalStore {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::query(
        r#"
        CREATE TABLE local_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create local_store table");

    LocalStore::new(pool)
}

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        due_date: Some("2025-03-31".to_string()),
        ..Task::default()
    }
}

#[tokio::test]
async fn unauthenticated_crud_stays_local() {
    let local = local_store().await;
    let remote = Arc::new(MemoryRemoteStore::default());
    let service = DataService::new(local.clone(), remote.clone(), None);

    let added = service.add_task(task("task1", "Reading")).await.unwrap();
    assert!(added.created_at.is_some());
    assert!(added.user_id.is_none());

    let mut updated = task("task1", "Reading ch. 3");
    updated = service.update_task("task1", updated).await.unwrap();
    assert_eq!(updated.title, "Reading ch. 3");

    assert_eq!(service.get_tasks().await.unwrap().len(), 1);
    // Nothing leaked to the remote store.
    assert!(remote.fetch_tasks("user-1").await.unwrap().is_empty());

    service.delete_task("task1").await.unwrap();
    assert!(service.get_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn authenticated_crud_targets_remote_and_stamps_user() {
    let local = local_store().await;
    let remote = Arc::new(MemoryRemoteStore::default());
    let service = DataService::new(
        local.clone(),
        remote.clone(),
        Some("user-1".to_string()),
    );

    service.add_task(task("task1", "Lab report")).await.unwrap();

    let rows = remote.fetch_tasks("user-1").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id.as_deref(), Some("user-1"));
    // The local collections stay untouched on the remote path.
    assert!(local.tasks().await.unwrap().is_empty());

    service.delete_task("task1").await.unwrap();
    assert!(remote.fetch_tasks("user-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn local_update_of_missing_task_is_not_found() {
    let local = local_store().await;
    let service = DataService::new(local, Arc::new(MemoryRemoteStore::default()), None);

    let err = service
        .update_task("ghost", task("ghost", "Nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn class_acquires_and_loses_syllabus_through_update() {
    let local = local_store().await;
    let service = DataService::new(local, Arc::new(MemoryRemoteStore::default()), None);

    let class = Class {
        id: "class1".to_string(),
        name: "Linear Algebra".to_string(),
        ..Class::default()
    };
    service.add_class(class.clone()).await.unwrap();

    let mut with_syllabus = class.clone();
    with_syllabus.syllabus = Some(Syllabus {
        name: "week1.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        size: 1024,
        data: "data:application/pdf;base64,BBBB".to_string(),
    });
    service.update_class("class1", with_syllabus).await.unwrap();

    let stored = service.get_classes().await.unwrap();
    assert!(stored[0].syllabus.is_some());

    let mut cleared = stored[0].clone();
    cleared.syllabus = None;
    service.update_class("class1", cleared).await.unwrap();
    assert!(service.get_classes().await.unwrap()[0].syllabus.is_none());
}

#[tokio::test]
async fn task_types_round_trip_locally() {
    let local = local_store().await;
    let service = DataService::new(local, Arc::new(MemoryRemoteStore::default()), None);

    service
        .add_task_type(TaskType {
            id: "type1".to_string(),
            name: "Exam".to_string(),
            ..TaskType::default()
        })
        .await
        .unwrap();

    let renamed = TaskType {
        id: "type1".to_string(),
        name: "Final exam".to_string(),
        ..TaskType::default()
    };
    service.update_task_type("type1", renamed).await.unwrap();

    let types = service.get_task_types().await.unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].name, "Final exam");

    service.delete_task_type("type1").await.unwrap();
    assert!(service.get_task_types().await.unwrap().is_empty());
}

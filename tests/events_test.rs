use std::sync::Arc;

use sqlx::SqlitePool;

use planner_backend::remote::MemoryRemoteStore;
use planner_backend::state::{AppState, CalendarEvent};

#[tokio::test]
async fn calendar_updates_reach_subscribers() {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    let state = AppState::new(pool, Arc::new(MemoryRemoteStore::default()));

    let mut rx = state.subscribe();
    state.notify_calendar_update();

    assert_eq!(rx.recv().await.unwrap(), CalendarEvent::Updated);
}

#[tokio::test]
async fn notify_without_subscribers_is_harmless() {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    let state = AppState::new(pool, Arc::new(MemoryRemoteStore::default()));

    state.notify_calendar_update();
}

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::remote::RemoteStore;
use crate::store::LocalStore;

/// Raised after any successful entity mutation so calendar views re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    Updated,
}

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub remote: Arc<dyn RemoteStore>,
    events: broadcast::Sender<CalendarEvent>,
}

impl AppState {
    pub fn new(db: SqlitePool, remote: Arc<dyn RemoteStore>) -> Self {
        let (events, _) = broadcast::channel(32);
        Self { db, remote, events }
    }

    pub fn local(&self) -> LocalStore {
        LocalStore::new(self.db.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CalendarEvent> {
        self.events.subscribe()
    }

    /// Lossy broadcast; nobody listening is fine.
    pub fn notify_calendar_update(&self) {
        let _ = self.events.send(CalendarEvent::Updated);
    }
}

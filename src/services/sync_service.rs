use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::remote::RemoteStore;
use crate::store::LocalStore;

/// One-shot reconciliation between the local store and the remote store,
/// run when a user logs in.
///
/// Direction is decided by a single existence check: a user with no remote
/// task rows gets their local data pushed up (first sync), anyone else gets
/// the remote collections pulled down wholesale. After the first successful
/// push the existence check finds rows, so every later call takes the pull
/// branch; local data is uploaded exactly once per user.
pub struct SyncService {
    local: LocalStore,
    remote: Arc<dyn RemoteStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    Push,
    Pull,
}

impl SyncService {
    pub fn new(local: LocalStore, remote: Arc<dyn RemoteStore>) -> Self {
        Self { local, remote }
    }

    /// Reconciles the two stores for `user_id`. Store failures are logged
    /// and collapsed into `false`; a partial push is not rolled back, the
    /// caller retries the whole operation later.
    pub async fn synchronize(&self, user_id: &str) -> bool {
        if user_id.is_empty() {
            warn!("synchronize called without an authenticated user, skipping");
            return false;
        }

        match self.run(user_id).await {
            Ok(direction) => {
                info!("sync completed for {} ({:?})", user_id, direction);
                true
            }
            Err(err) => {
                error!("sync failed for {}: {}", user_id, err);
                false
            }
        }
    }

    async fn run(&self, user_id: &str) -> Result<SyncDirection, AppError> {
        let remote_populated = self.remote.any_tasks(user_id).await?;

        let direction = if remote_populated {
            SyncDirection::Pull
        } else {
            SyncDirection::Push
        };

        match direction {
            SyncDirection::Push => self.push(user_id).await?,
            SyncDirection::Pull => self.pull(user_id).await?,
        }

        // Advisory marker only; a failure here must not fail the sync.
        if let Err(err) = self.local.record_sync_now().await {
            warn!("failed to record sync timestamp: {}", err);
        }

        Ok(direction)
    }

    /// First sync for this user: seed the remote tables from local data.
    /// Reads go through the local store directly so an authenticated session
    /// cannot recurse into the remote tables being seeded.
    async fn push(&self, user_id: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        let mut classes = self.local.classes().await?;
        for class in &mut classes {
            class.user_id = Some(user_id.to_string());
            class.created_at.get_or_insert_with(|| now.clone());
        }

        let mut types = self.local.task_types().await?;
        for task_type in &mut types {
            task_type.user_id = Some(user_id.to_string());
            task_type.created_at.get_or_insert_with(|| now.clone());
        }

        let mut tasks = self.local.tasks().await?;
        for task in &mut tasks {
            task.user_id = Some(user_id.to_string());
            task.created_at.get_or_insert_with(|| now.clone());
        }

        // Classes and task-types go first so no strongly-consistent reader
        // ever sees a task whose references do not resolve. Empty
        // collections are skipped outright.
        if !classes.is_empty() {
            self.remote.upsert_classes(&classes).await?;
        }
        if !types.is_empty() {
            self.remote.upsert_task_types(&types).await?;
        }
        if !tasks.is_empty() {
            self.remote.upsert_tasks(&tasks).await?;
        }

        info!(
            "pushed {} classes, {} task types, {} tasks for {}",
            classes.len(),
            types.len(),
            tasks.len(),
            user_id
        );
        Ok(())
    }

    /// Remote is authoritative: overwrite the local collections with exactly
    /// what the remote holds for this user, empty results included.
    async fn pull(&self, user_id: &str) -> Result<(), AppError> {
        let tasks = dedupe_by_id(self.remote.fetch_tasks(user_id).await?, |t| t.id.as_str());
        let classes = dedupe_by_id(self.remote.fetch_classes(user_id).await?, |c| c.id.as_str());
        let types = dedupe_by_id(self.remote.fetch_task_types(user_id).await?, |t| t.id.as_str());

        self.local.save_tasks(&tasks).await?;
        self.local.save_classes(&classes).await?;
        self.local.save_task_types(&types).await?;

        info!(
            "pulled {} tasks, {} classes, {} task types for {}",
            tasks.len(),
            classes.len(),
            types.len(),
            user_id
        );
        Ok(())
    }
}

/// Keeps the first occurrence of each id. The calendar classifier also
/// guards against duplicate ids, but the invariant belongs in the store too.
fn dedupe_by_id<T>(rows: Vec<T>, id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(id(row).to_string()))
        .collect()
}

use serde::{Deserialize, Serialize};

/// A calendar task. Exactly one of the deadline fields (`due_date`/`due_time`)
/// or the duration fields is authoritative, selected by `is_duration`; `date`
/// is a legacy full timestamp kept for tasks created before `due_date` existed.
///
/// Field names on the wire match the remote table columns (`dueDate`,
/// `isDuration`, ...) so rows round-trip between stores without translation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Foreign key to `Class.id`; empty when the task has no class.
    #[serde(default)]
    pub class: String,
    /// Foreign key to `TaskType.id`; empty when untyped.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "isDuration", default)]
    pub is_duration: bool,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<String>,
    #[serde(rename = "dueTime", default)]
    pub due_time: Option<String>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(rename = "endTime", default)]
    pub end_time: Option<String>,
    /// Legacy timestamp (RFC 3339), consulted only when `due_date` is absent.
    #[serde(default)]
    pub date: Option<String>,
    /// Owning user; present only on rows that have been through the remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub class: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "isDuration", default)]
    pub is_duration: bool,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<String>,
    #[serde(rename = "dueTime", default)]
    pub due_time: Option<String>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(rename = "endTime", default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl NewTaskRequest {
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            class: self.class,
            kind: self.kind,
            is_duration: self.is_duration,
            due_date: self.due_date,
            due_time: self.due_time,
            start_date: self.start_date,
            start_time: self.start_time,
            end_date: self.end_date,
            end_time: self.end_time,
            date: self.date,
            user_id: None,
            created_at: None,
        }
    }
}

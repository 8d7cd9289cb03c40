use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskTypeRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

impl NewTaskTypeRequest {
    pub fn into_task_type(self, id: String) -> TaskType {
        TaskType {
            id,
            name: self.name,
            user_id: None,
            created_at: None,
        }
    }
}

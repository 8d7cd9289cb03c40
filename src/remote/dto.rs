use serde::{Deserialize, Serialize};

use crate::models::{Class, Syllabus};

#[derive(Debug, Deserialize)]
pub struct IdRow {
    #[allow(dead_code)]
    pub id: String,
}

/// Row shape of the remote `classes` table, where the syllabus attachment
/// lives in a `syllabus_json` column rather than the local `syllabus` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub syllabus_json: Option<Syllabus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<Class> for ClassRow {
    fn from(class: Class) -> Self {
        Self {
            id: class.id,
            name: class.name,
            syllabus_json: class.syllabus,
            user_id: class.user_id,
            created_at: class.created_at,
        }
    }
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            syllabus: row.syllabus_json,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Syllabus file attached to a class. `data` is the base64 data URL exactly
/// as produced by the uploader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Syllabus {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub syllabus: Option<Syllabus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub syllabus: Option<Syllabus>,
}

impl NewClassRequest {
    pub fn into_class(self, id: String) -> Class {
        Class {
            id,
            name: self.name,
            syllabus: self.syllabus,
            user_id: None,
            created_at: None,
        }
    }
}

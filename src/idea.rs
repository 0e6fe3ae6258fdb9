//! Idea record definition.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generate_id;

/// A single captured idea.
///
/// Records serialize with camelCase field names and millisecond timestamps,
/// matching the document layout persisted under the ideas key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    /// Free-form idea text
    pub content: String,
    /// Id of the category this idea is filed under; a dangling reference
    /// renders as no category
    pub category_id: String,
    /// When the idea was captured
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag; deleted ideas stay in the store but are hidden
    /// from filtered read paths
    pub is_deleted: bool,
}

impl Idea {
    /// Creates a new idea with the given content and category
    pub fn new(content: String, category_id: String) -> Self {
        let now = Utc::now();

        Idea {
            id: generate_id(),
            content,
            category_id,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}

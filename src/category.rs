//! Category record definition and the built-in defaults.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generate_id;

/// A named, iconized, colored tag used to classify ideas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier, immutable once created
    pub id: String,
    /// Display name
    pub name: String,
    /// Emoji rendered next to the name
    pub icon: String,
    /// Hex color, e.g. "#3B82F6"
    pub color: String,
    /// When the category was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Collection length at creation time; never renumbered on delete
    pub sort_order: u32,
}

impl Category {
    /// Creates a new category with a fresh id
    pub fn new(name: String, icon: String, color: String, sort_order: u32) -> Self {
        Category {
            id: generate_id(),
            name,
            icon,
            color,
            created_at: Utc::now(),
            sort_order,
        }
    }

    /// The six built-in categories seeded into an empty store, stamped
    /// with the given creation time.
    pub fn defaults(now: DateTime<Utc>) -> Vec<Category> {
        [
            ("1", "Personal Growth", "📚", "#3B82F6"),
            ("2", "Parenting", "👶", "#EC4899"),
            ("3", "Tech Thoughts", "💡", "#8B5CF6"),
            ("4", "Work", "💼", "#F59E0B"),
            ("5", "Life", "🏠", "#10B981"),
            ("6", "Other", "💭", "#6B7280"),
        ]
        .iter()
        .enumerate()
        .map(|(index, (id, name, icon, color))| Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: now,
            sort_order: index as u32,
        })
        .collect()
    }
}

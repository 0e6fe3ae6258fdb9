//! Core shared types for the idea-capture application.
//!
//! This module contains the Result alias and the CLI command surface used
//! throughout the application.
use std::path::PathBuf;

use clap::Subcommand;

use crate::CaptureError;

/// A specialized Result type for idea-capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Available subcommands for the idea-capture application
#[derive(Subcommand)]
pub enum Commands {
    /// Capture a new idea
    Add {
        /// Text of the idea; omit to compose it in your editor
        content: Option<String>,

        /// Category to file the idea under
        #[clap(short, long)]
        category: String,

        /// Path to a file containing the idea text
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open the text in an editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// List ideas with optional filtering
    List {
        /// Only show ideas filed under this category
        #[clap(short, long)]
        category: Option<String>,

        /// Include soft-deleted ideas
        #[clap(short, long)]
        all: bool,

        /// Limit the number of ideas returned (0 means no limit)
        #[clap(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Search ideas by content
    Search {
        /// Search keyword
        keyword: String,

        /// Limit the number of search results (0 means no limit)
        #[clap(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Delete an idea by ID
    Delete {
        /// ID of the idea to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Manage categories
    Category {
        #[clap(subcommand)]
        command: CategoryCommands,
    },
}

/// Category management subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Create a new category
    Add {
        /// Name of the category
        name: String,

        /// Emoji shown next to the category name
        #[clap(short, long, default_value = "💭")]
        icon: String,

        /// Hex color used when rendering the category
        #[clap(short, long, default_value = "#6B7280")]
        color: String,
    },

    /// Edit an existing category
    Edit {
        /// ID of the category to edit
        id: String,

        /// New name for the category
        #[clap(short, long)]
        name: Option<String>,

        /// New emoji for the category
        #[clap(short, long)]
        icon: Option<String>,

        /// New hex color for the category
        #[clap(short, long)]
        color: Option<String>,
    },

    /// Delete a category by ID
    Delete {
        /// ID of the category to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },
}

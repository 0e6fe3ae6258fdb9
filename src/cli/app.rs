//! CLI module for the idea-capture application
//!
//! This module handles the command-line interface for interacting with the
//! idea and category repositories.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use chrono::Utc;
use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{
    format_time, CaptureError, Category, CategoryCommands, CategoryRepository, Commands, Config,
    Idea, IdeaRepository, LocalStore, Result,
};

/// CLI application handler - processes CLI commands and interfaces with the
/// idea and category repositories
pub struct App {
    /// The idea collection backend
    ideas: IdeaRepository,

    /// The category collection backend
    categories: CategoryRepository,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application over the given store and config
    pub fn new(store: LocalStore, config: Config, verbose: bool) -> Self {
        let ideas = IdeaRepository::new(store.clone(), config.ideas_key.as_str());
        let categories = CategoryRepository::new(
            store,
            config.categories_key.as_str(),
            Category::defaults(Utc::now()),
        );

        Self {
            ideas,
            categories,
            config,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                content,
                category,
                file,
                edit,
            } => self.add_idea(content, category, file, edit),

            Commands::List {
                category,
                all,
                limit,
                json,
            } => self.list_ideas(category, all, limit, json),

            Commands::Search {
                keyword,
                limit,
                json,
            } => self.search_ideas(keyword, limit, json),

            Commands::Delete { id, force } => self.delete_idea(id, force),

            Commands::Category { command } => match command {
                CategoryCommands::List { json } => self.list_categories(json),
                CategoryCommands::Add { name, icon, color } => {
                    self.add_category(name, icon, color)
                }
                CategoryCommands::Edit {
                    id,
                    name,
                    icon,
                    color,
                } => self.edit_category(id, name, icon, color),
                CategoryCommands::Delete { id, force } => self.delete_category(id, force),
            },
        }
    }

    fn add_idea(
        &self,
        content: Option<String>,
        category: String,
        file: Option<PathBuf>,
        edit: bool,
    ) -> Result<()> {
        // Get content based on the provided options
        let text = match (content, file) {
            (Some(text), _) if !edit => text,
            (Some(text), _) => self.open_editor_for_content(Some(&text))?,
            (None, Some(file_path)) => {
                if !file_path.exists() {
                    return Err(CaptureError::ApplicationError {
                        message: format!("File not found: {}", file_path.display()),
                    });
                }
                read_to_string(file_path)?
            }
            (None, None) => self.open_editor_for_content(None)?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(CaptureError::ApplicationError {
                message: "Idea content is empty".to_string(),
            });
        }

        let idea = self.ideas.create(text, &category)?;
        println!("Idea captured with ID: {}", idea.id);
        Ok(())
    }

    fn open_editor_for_content(&self, existing: Option<&str>) -> Result<String> {
        // Compose the idea in a temporary file
        let temp_file = Builder::new().suffix(".txt").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        // Get editor from config or environment
        let editor_cmd = self.config.get_editor_command();

        self.write_editor_template(&temp_path, existing)?;

        info!("Opening editor to write the idea. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        // Read and process the content
        let content = read_to_string(&temp_path)?;
        Ok(self.process_editor_content(content))
    }

    fn write_editor_template(&self, path: &Path, existing: Option<&str>) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(path)?;

        writeln!(file, "<!-- ")?;
        writeln!(file, "Write your idea below.")?;
        writeln!(
            file,
            "Lines that start with <!-- and end with --> are comments and will be ignored."
        )?;
        writeln!(file, "Save and exit the editor when you're done.")?;
        writeln!(file, "-->")?;
        writeln!(file)?;
        if let Some(existing) = existing {
            writeln!(file, "{}", existing)?;
        }

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        // Convert file path to string once
        let path_str = file_path.to_string_lossy();

        // Handle shell-like command parsing
        let args = split(editor_cmd).map_err(|e| CaptureError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        if args.is_empty() {
            return Err(CaptureError::EditorError {
                message: "Empty editor command".to_string(),
            });
        }

        // First word is the program name, rest are arguments
        let program = &args[0];

        let mut command = Command::new(program);

        if args.len() > 1 {
            command.args(&args[1..]);
        }

        // Add the file path as the final argument
        command.arg(path_str.as_ref());

        let status = command.status()?;

        if !status.success() {
            return Err(CaptureError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }

    fn process_editor_content(&self, content: String) -> String {
        // Remove comment lines from content
        content
            .lines()
            .filter(|line| {
                !line.trim_start().starts_with("<!--") && !line.trim_end().ends_with("-->")
            })
            .collect::<Vec<&str>>()
            .join("\n")
    }

    /// List ideas according to provided filters and options
    fn list_ideas(
        &self,
        category: Option<String>,
        all: bool,
        limit: usize,
        json: bool,
    ) -> Result<()> {
        let mut ideas = match (&category, all) {
            (Some(id), false) => self.ideas.get_by_category(id)?,
            (Some(id), true) => {
                let id = id.clone();
                self.ideas
                    .get_all_raw()?
                    .into_iter()
                    .filter(|idea| idea.category_id == id)
                    .collect()
            }
            (None, false) => self.ideas.get_all()?,
            (None, true) => self.ideas.get_all_raw()?,
        };

        if limit > 0 && ideas.len() > limit {
            ideas.truncate(limit);
        }

        if json {
            self.display_ideas_json(&ideas)
        } else {
            self.display_ideas_text(&ideas)
        }
    }

    fn search_ideas(&self, keyword: String, limit: usize, json: bool) -> Result<()> {
        // An empty keyword means no filter
        let mut results = if keyword.trim().is_empty() {
            self.ideas.get_all()?
        } else {
            self.ideas.search(&keyword)?
        };

        let total = results.len();
        if limit > 0 && results.len() > limit {
            results.truncate(limit);
        }

        if json {
            return self.display_ideas_json(&results);
        }

        if results.is_empty() {
            println!("No ideas found matching query: \"{}\"", keyword);
            return Ok(());
        }

        self.display_ideas_text(&results)?;

        if limit > 0 && total > limit {
            println!(
                "Showing {} of {} matching ideas. Use --limit to show more.",
                results.len(),
                total
            );
        }

        Ok(())
    }

    /// Display ideas in JSON format
    fn display_ideas_json(&self, ideas: &[Idea]) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(ideas)?);
        Ok(())
    }

    /// Display ideas in text format
    fn display_ideas_text(&self, ideas: &[Idea]) -> Result<()> {
        if ideas.is_empty() {
            println!("No ideas found matching the criteria.");
            return Ok(());
        }

        // Categories resolve icons and names for the listing
        let categories = self.categories.get_all()?;

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, idea) in ideas.iter().enumerate() {
            // Add separator between ideas (except before the first)
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            let captured = format_time(idea.created_at);

            // An unresolved category renders as no category
            match categories
                .iter()
                .find(|category| category.id == idea.category_id)
            {
                Some(category) => println!(
                    "ID: {} | {} {} | {}",
                    idea.id,
                    category.icon,
                    console::style(&category.name).cyan(),
                    captured
                ),
                None => println!("ID: {} | {}", idea.id, captured),
            }

            if idea.is_deleted {
                println!("{}", console::style("[deleted]").red());
            }

            let preview =
                self.get_content_preview(&idea.content, term_width.saturating_sub(4).max(20));
            println!("{}", preview);
        }

        println!(
            "\nFound {} idea{}",
            ideas.len(),
            if ideas.len() == 1 { "" } else { "s" }
        );

        Ok(())
    }

    /// Generate a content preview for displaying brief ideas
    fn get_content_preview(&self, content: &str, max_len: usize) -> String {
        // Get first non-empty line
        let first_line = content
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("");

        if first_line.chars().count() <= max_len {
            first_line.to_string()
        } else {
            let truncated: String = first_line.chars().take(max_len).collect();
            format!("{}...", truncated)
        }
    }

    fn delete_idea(&self, id: String, force: bool) -> Result<()> {
        // Fetch the idea to verify it exists and show details in the prompt
        let idea = match self.ideas.get_all()?.into_iter().find(|idea| idea.id == id) {
            Some(idea) => idea,
            None => {
                return Err(CaptureError::ApplicationError {
                    message: format!("Idea not found: {}", id),
                });
            }
        };

        if !force {
            println!("You are about to delete the following idea:");
            println!("ID:       {}", idea.id);
            println!("Captured: {}", format_time(idea.created_at));
            println!("\n{}", self.get_content_preview(&idea.content, 100));

            print!("\nAre you sure you want to delete this idea? [y/N]: ");
            stdout().flush().map_err(CaptureError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(CaptureError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.ideas.soft_delete(&id)?;

        println!("Idea {} has been deleted.", id);
        Ok(())
    }

    fn list_categories(&self, json: bool) -> Result<()> {
        let categories = self.categories.get_all()?;

        if json {
            println!("{}", serde_json::to_string_pretty(&categories)?);
            return Ok(());
        }

        if self.verbose {
            if let Some(dir) = &self.config.data_dir {
                println!("Data directory: {}", dir.display());
            }
        }

        for category in &categories {
            println!(
                "ID: {} | {} {} | {}",
                category.id,
                category.icon,
                console::style(&category.name).bold(),
                console::style(&category.color).dim()
            );
        }

        println!(
            "\nFound {} categor{}",
            categories.len(),
            if categories.len() == 1 { "y" } else { "ies" }
        );

        Ok(())
    }

    fn add_category(&self, name: String, icon: String, color: String) -> Result<()> {
        let category = self.categories.create(&name, &icon, &color)?;
        println!("Category created with ID: {}", category.id);
        Ok(())
    }

    fn edit_category(
        &self,
        id: String,
        name: Option<String>,
        icon: Option<String>,
        color: Option<String>,
    ) -> Result<()> {
        if name.is_none() && icon.is_none() && color.is_none() {
            return Err(CaptureError::ApplicationError {
                message: "Nothing to change: pass at least one of --name, --icon, --color"
                    .to_string(),
            });
        }

        let categories = self.categories.get_all()?;
        let existing = match categories.iter().find(|category| category.id == id) {
            Some(category) => category,
            None => {
                return Err(CaptureError::ApplicationError {
                    message: format!("Category not found: {}", id),
                });
            }
        };

        let name = name.unwrap_or_else(|| existing.name.clone());
        let icon = icon.unwrap_or_else(|| existing.icon.clone());
        let color = color.unwrap_or_else(|| existing.color.clone());

        self.categories.update(&id, &name, &icon, &color)?;

        println!("Category {} updated successfully", id);
        Ok(())
    }

    fn delete_category(&self, id: String, force: bool) -> Result<()> {
        // A category still referenced by live ideas must not be removed
        let in_use = self.ideas.get_by_category(&id)?;
        if !in_use.is_empty() {
            return Err(CaptureError::CategoryInUse {
                id,
                count: in_use.len(),
            });
        }

        if !force {
            print!("Are you sure you want to delete category {}? [y/N]: ", id);
            stdout().flush().map_err(CaptureError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(CaptureError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.categories.delete(&id)?;

        println!("Category {} has been deleted.", id);
        Ok(())
    }
}

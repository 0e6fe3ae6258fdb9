//! Category repository: CRUD over the category collection.
use log::{debug, info, warn};

use crate::{Category, LocalStore, Result};

/// Manages the category collection persisted under a single store key.
///
/// An absent key is equivalent to "use the defaults": the first read seeds
/// the store with the configured default categories. Categories are
/// returned in stored insertion order, not sorted by `sort_order`.
pub struct CategoryRepository {
    store: LocalStore,
    key: String,
    defaults: Vec<Category>,
}

impl CategoryRepository {
    /// Creates a repository over the given store handle, key, and seed list
    pub fn new(store: LocalStore, key: impl Into<String>, defaults: Vec<Category>) -> Self {
        Self {
            store,
            key: key.into(),
            defaults,
        }
    }

    /// Returns all categories, seeding the store with the defaults when
    /// the key is absent.
    pub fn get_all(&self) -> Result<Vec<Category>> {
        debug!("Listing categories");
        match self.store.read(&self.key)? {
            Some(categories) => Ok(categories),
            None => {
                info!("Seeding {} default categories", self.defaults.len());
                self.store.write(&self.key, &self.defaults)?;
                Ok(self.defaults.clone())
            }
        }
    }

    /// Creates a new category at the end of the collection. Its sort order
    /// is the collection length at creation time.
    pub fn create(&self, name: &str, icon: &str, color: &str) -> Result<Category> {
        let mut categories = self.get_all()?;

        let category = Category::new(
            name.to_string(),
            icon.to_string(),
            color.to_string(),
            categories.len() as u32,
        );
        categories.push(category.clone());
        self.store.write(&self.key, &categories)?;

        info!("Created category: {}", category.id);
        Ok(category)
    }

    /// Replaces the name, icon, and color of the category with the given
    /// id, preserving everything else. An unknown id is ignored without
    /// touching the store.
    pub fn update(&self, id: &str, name: &str, icon: &str, color: &str) -> Result<()> {
        let mut categories = self.get_all()?;

        match categories.iter_mut().find(|category| category.id == id) {
            Some(category) => {
                category.name = name.to_string();
                category.icon = icon.to_string();
                category.color = color.to_string();
                self.store.write(&self.key, &categories)?;
                info!("Updated category: {}", id);
            }
            None => {
                warn!("Ignoring update of unknown category: {}", id);
            }
        }

        Ok(())
    }

    /// Removes the category with the given id; deleting an absent id is a
    /// no-op. Referential integrity is the caller's concern: ideas filed
    /// under the category are not checked here.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut categories = self.get_all()?;
        categories.retain(|category| category.id != id);
        self.store.write(&self.key, &categories)?;

        info!("Deleted category: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::tempdir;

    use super::*;

    const KEY: &str = "categories-under-test";

    fn repository(dir: &std::path::Path) -> CategoryRepository {
        CategoryRepository::new(
            LocalStore::open(dir).unwrap(),
            KEY,
            Category::defaults(Utc::now()),
        )
    }

    #[test]
    fn first_read_seeds_the_defaults() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let categories = repo.get_all().unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, "1");
        assert_eq!(categories[0].name, "Personal Growth");
        assert_eq!(categories[0].sort_order, 0);
        assert_eq!(categories[5].id, "6");
        assert_eq!(categories[5].sort_order, 5);
    }

    #[test]
    fn seeding_happens_at_most_once() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let first = repo.get_all().unwrap();
        let second = repo.get_all().unwrap();
        let first_ids: Vec<&String> = first.iter().map(|c| &c.id).collect();
        let second_ids: Vec<&String> = second.iter().map(|c| &c.id).collect();
        assert_eq!(first_ids, second_ids);

        // A mutation between reads stays visible afterwards, proving the
        // later read does not re-seed
        repo.create("Reading", "📖", "#111111").unwrap();
        let third = repo.get_all().unwrap();
        assert_eq!(third.len(), 7);
    }

    #[test]
    fn created_categories_are_appended_with_the_next_sort_order() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let created = repo.create("Reading", "📖", "#111111").unwrap();
        assert_eq!(created.sort_order, 6);
        assert_eq!(created.name, "Reading");

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(all.last().unwrap().id, created.id);
    }

    #[test]
    fn update_replaces_only_name_icon_color() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let before = repo
            .get_all()
            .unwrap()
            .into_iter()
            .find(|c| c.id == "3")
            .unwrap();

        repo.update("3", "Deep Work", "🧠", "#000000").unwrap();

        let after = repo
            .get_all()
            .unwrap()
            .into_iter()
            .find(|c| c.id == "3")
            .unwrap();
        assert_eq!(after.name, "Deep Work");
        assert_eq!(after.icon, "🧠");
        assert_eq!(after.color, "#000000");
        assert_eq!(after.sort_order, before.sort_order);
        assert_eq!(
            after.created_at.timestamp_millis(),
            before.created_at.timestamp_millis()
        );
    }

    #[test]
    fn update_of_unknown_id_changes_nothing() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let before = repo.get_all().unwrap();
        repo.update("no-such-id", "Ghost", "👻", "#FFFFFF").unwrap();

        let after = repo.get_all().unwrap();
        assert_eq!(after.len(), before.len());
        assert!(after.iter().all(|c| c.name != "Ghost"));
    }

    #[test]
    fn delete_removes_without_renumbering_the_rest() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        repo.get_all().unwrap();
        repo.delete("2").unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|c| c.id != "2"));
        // Sort orders keep their original values
        assert_eq!(all.iter().find(|c| c.id == "6").unwrap().sort_order, 5);
    }

    #[test]
    fn delete_of_absent_id_is_a_no_op() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        repo.get_all().unwrap();
        repo.delete("no-such-id").unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 6);
    }
}

//! Idea repository: CRUD and search over the idea collection.
use log::{debug, info, warn};

use crate::{Idea, LocalStore, Result};

/// Manages the idea collection persisted under a single store key.
///
/// Every operation re-reads the full collection from the store, mutates it
/// in memory, and writes the full collection back; the store is the single
/// source of truth between calls.
pub struct IdeaRepository {
    store: LocalStore,
    key: String,
}

impl IdeaRepository {
    /// Creates a repository over the given store handle and key
    pub fn new(store: LocalStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    fn load(&self) -> Result<Vec<Idea>> {
        Ok(self.store.read(&self.key)?.unwrap_or_default())
    }

    /// Returns all non-deleted ideas, most-recent-first as stored.
    pub fn get_all(&self) -> Result<Vec<Idea>> {
        debug!("Listing ideas");
        Ok(self
            .load()?
            .into_iter()
            .filter(|idea| !idea.is_deleted)
            .collect())
    }

    /// Returns the stored collection unfiltered, soft-deleted records
    /// included.
    pub fn get_all_raw(&self) -> Result<Vec<Idea>> {
        debug!("Listing ideas, deleted included");
        self.load()
    }

    /// Captures a new idea at the front of the collection, so the stored
    /// order stays most-recent-first.
    pub fn create(&self, content: &str, category_id: &str) -> Result<Idea> {
        let mut ideas = self.load()?;

        let idea = Idea::new(content.to_string(), category_id.to_string());
        ideas.insert(0, idea.clone());
        self.store.write(&self.key, &ideas)?;

        info!("Captured idea: {}", idea.id);
        Ok(idea)
    }

    /// Marks the idea with the given id as deleted. An unknown id is
    /// ignored without touching the store. `updated_at` is left as is.
    pub fn soft_delete(&self, id: &str) -> Result<()> {
        let mut ideas = self.load()?;

        match ideas.iter_mut().find(|idea| idea.id == id) {
            Some(idea) => {
                idea.is_deleted = true;
                self.store.write(&self.key, &ideas)?;
                info!("Soft-deleted idea: {}", id);
            }
            None => {
                warn!("Ignoring delete of unknown idea: {}", id);
            }
        }

        Ok(())
    }

    /// Returns non-deleted ideas filed under the given category.
    pub fn get_by_category(&self, category_id: &str) -> Result<Vec<Idea>> {
        debug!("Listing ideas in category: {}", category_id);
        Ok(self
            .load()?
            .into_iter()
            .filter(|idea| idea.category_id == category_id && !idea.is_deleted)
            .collect())
    }

    /// Returns non-deleted ideas whose content contains `keyword`, matched
    /// case-insensitively.
    pub fn search(&self, keyword: &str) -> Result<Vec<Idea>> {
        debug!("Searching ideas for: {}", keyword);
        let keyword_lower = keyword.to_lowercase();
        Ok(self
            .load()?
            .into_iter()
            .filter(|idea| {
                !idea.is_deleted && idea.content.to_lowercase().contains(&keyword_lower)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const KEY: &str = "ideas-under-test";

    fn repository(dir: &std::path::Path) -> IdeaRepository {
        IdeaRepository::new(LocalStore::open(dir).unwrap(), KEY)
    }

    #[test]
    fn created_idea_round_trips_through_the_store() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let created = repo.create("buy milk", "cat-1").unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].content, "buy milk");
        assert_eq!(all[0].category_id, "cat-1");
        assert!(!all[0].is_deleted);
        assert_eq!(
            all[0].created_at.timestamp_millis(),
            created.created_at.timestamp_millis()
        );
        assert_eq!(
            all[0].updated_at.timestamp_millis(),
            created.updated_at.timestamp_millis()
        );
    }

    #[test]
    fn new_ideas_are_listed_most_recent_first() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        repo.create("a", "cat-1").unwrap();
        repo.create("b", "cat-1").unwrap();
        repo.create("c", "cat-1").unwrap();

        let contents: Vec<String> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|idea| idea.content)
            .collect();
        assert_eq!(contents, vec!["c", "b", "a"]);
    }

    #[test]
    fn soft_deleted_ideas_are_hidden_from_reads() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let doomed = repo.create("delete me", "cat-1").unwrap();
        let kept = repo.create("keep me", "cat-1").unwrap();

        repo.soft_delete(&doomed.id).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, kept.id);

        let by_category = repo.get_by_category("cat-1").unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, kept.id);

        assert!(repo.search("delete").unwrap().is_empty());

        // The record is still in the store, flagged, with the rest intact
        let raw = repo.get_all_raw().unwrap();
        assert_eq!(raw.len(), 2);
        let flagged = raw.iter().find(|idea| idea.id == doomed.id).unwrap();
        assert!(flagged.is_deleted);
        let untouched = raw.iter().find(|idea| idea.id == kept.id).unwrap();
        assert!(!untouched.is_deleted);
        assert_eq!(
            untouched.created_at.timestamp_millis(),
            kept.created_at.timestamp_millis()
        );
    }

    #[test]
    fn soft_delete_leaves_updated_at_untouched() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let created = repo.create("fleeting", "cat-1").unwrap();
        repo.soft_delete(&created.id).unwrap();

        let raw = repo.get_all_raw().unwrap();
        assert_eq!(
            raw[0].updated_at.timestamp_millis(),
            created.updated_at.timestamp_millis()
        );
    }

    #[test]
    fn soft_delete_of_unknown_id_is_a_no_op() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        repo.create("still here", "cat-1").unwrap();
        repo.soft_delete("no-such-id").unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].is_deleted);
    }

    #[test]
    fn search_matches_case_insensitively() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        repo.create("my idea today", "cat-1").unwrap();

        let hits = repo.search("Idea").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "my idea today");

        assert!(repo.search("nothing like this").unwrap().is_empty());
    }

    #[test]
    fn get_by_category_filters_both_category_and_deleted() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let in_one = repo.create("first", "cat-1").unwrap();
        repo.create("second", "cat-2").unwrap();
        let deleted = repo.create("third", "cat-1").unwrap();
        repo.soft_delete(&deleted.id).unwrap();

        let by_category = repo.get_by_category("cat-1").unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, in_one.id);
    }
}

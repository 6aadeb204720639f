//! Category repository
//!
//! Persists categories to `categories.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::BudgetError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// On-disk layout of categories.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub next_id: i64,
    pub categories: Vec<Category>,
}

pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<BTreeMap<CategoryId, Category>>,
    next_id: AtomicI64,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Load categories from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut categories = self.categories.write().map_err(lock_error)?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        let after_max = categories.keys().next_back().map_or(1, |id| id.value() + 1);
        self.next_id
            .store(file_data.next_id.max(after_max), Ordering::SeqCst);

        tracing::debug!(count = categories.len(), "loaded categories");
        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let categories = self.categories.read().map_err(lock_error)?;
        let file_data = CategoryData {
            next_id: self.next_id.load(Ordering::SeqCst),
            categories: categories.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Reserve the next unused id
    pub fn allocate_id(&self) -> CategoryId {
        CategoryId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, BudgetError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.get(&id).cloned())
    }

    /// Find a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, BudgetError> {
        let categories = self.categories.read().map_err(lock_error)?;
        let needle = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == needle)
            .cloned())
    }

    /// All categories in id order
    pub fn get_all(&self) -> Result<Vec<Category>, BudgetError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.values().cloned().collect())
    }

    pub fn upsert(&self, category: Category) -> Result<(), BudgetError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.insert(category.id, category);
        Ok(())
    }

    /// Remove a category, returning it if it existed
    pub fn delete(&self, id: CategoryId) -> Result<Option<Category>, BudgetError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        Ok(categories.remove(&id))
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (CategoryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_ids_are_sequential() {
        let (repo, _temp) = repo();
        assert_eq!(repo.allocate_id(), CategoryId::new(1));
        assert_eq!(repo.allocate_id(), CategoryId::new(2));
    }

    #[test]
    fn test_save_and_reload() {
        let (repo, temp) = repo();
        let id = repo.allocate_id();
        repo.upsert(Category::new(id, "Groceries")).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(temp.path().join("categories.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.get(id).unwrap().unwrap().name, "Groceries");
        assert_eq!(reloaded.allocate_id(), CategoryId::new(2));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let (repo, temp) = repo();
        for name in ["A", "B", "C"] {
            let id = repo.allocate_id();
            repo.upsert(Category::new(id, name)).unwrap();
        }
        repo.delete(CategoryId::new(3)).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(temp.path().join("categories.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.allocate_id(), CategoryId::new(4));
    }

    #[test]
    fn test_get_by_name_ignores_case() {
        let (repo, _temp) = repo();
        let id = repo.allocate_id();
        repo.upsert(Category::new(id, "Healthcare")).unwrap();

        assert_eq!(repo.get_by_name("HEALTHCARE").unwrap().unwrap().id, id);
        assert!(repo.get_by_name("Health").unwrap().is_none());
    }

    #[test]
    fn test_delete_returns_removed() {
        let (repo, _temp) = repo();
        let id = repo.allocate_id();
        repo.upsert(Category::new(id, "Utilities")).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}

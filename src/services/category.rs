//! Category service
//!
//! CRUD for categories with name uniqueness and reference checks.

use chrono::Utc;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a category
#[derive(Debug, Clone, Default)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Fields to change on an existing category; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateCategoryInput) -> BudgetResult<Category> {
        let name = input.name.trim();
        self.ensure_name_available(name, None)?;

        let mut category = Category::new(CategoryId::new(0), name);
        category.description = input.description.filter(|d| !d.trim().is_empty());
        category.icon = input.icon.filter(|i| !i.trim().is_empty());
        if let Some(color) = input.color {
            category.color = color.trim().to_uppercase();
        }

        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        category.id = self.storage.categories.allocate_id();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(id = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> BudgetResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or id ("Groceries", "3", "cat-3")
    pub fn find(&self, identifier: &str) -> BudgetResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a missing category is an error
    pub fn resolve(&self, identifier: &str) -> BudgetResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| BudgetError::category_not_found(identifier))
    }

    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> BudgetResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))?;
        let before = category.clone();

        if let Some(name) = input.name {
            let name = name.trim();
            self.ensure_name_available(name, Some(id))?;
            category.name = name.to_string();
        }
        if let Some(description) = input.description {
            category.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(color) = input.color {
            category.color = color.trim().to_uppercase();
        }
        if let Some(icon) = input.icon {
            category.icon = Some(icon).filter(|i| !i.trim().is_empty());
        }

        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        category.updated_at = Utc::now();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        tracing::info!(id = %category.id, "updated category");
        Ok(category)
    }

    /// Delete a category
    ///
    /// Refused while budgets point at it unless `force` is set. Transactions
    /// are never touched; they report as "Uncategorized" afterwards.
    pub fn delete(&self, id: CategoryId, force: bool) -> BudgetResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))?;

        let budgets = self.storage.budgets.get_by_category(id)?.len();
        if budgets > 0 && !force {
            return Err(BudgetError::Conflict(format!(
                "Category '{}' is used by {} budget(s); delete them first or use --force",
                category.name, budgets
            )));
        }

        let orphaned = self.storage.transactions.count_by_category(id)?;

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(
            id = %category.id,
            budgets,
            transactions = orphaned,
            "deleted category"
        );
        Ok(category)
    }

    fn ensure_name_available(&self, name: &str, current: Option<CategoryId>) -> BudgetResult<()> {
        if let Some(existing) = self.storage.categories.get_by_name(name)? {
            if Some(existing.id) != current {
                return Err(BudgetError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

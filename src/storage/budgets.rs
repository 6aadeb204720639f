//! Budget repository
//!
//! Persists budgets to `budgets.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::BudgetError;
use crate::models::{Budget, BudgetId, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    next_id: i64,
    budgets: Vec<Budget>,
}

pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BTreeMap<BudgetId, Budget>>,
    next_id: AtomicI64,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut budgets = self.budgets.write().map_err(lock_error)?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        let after_max = budgets.keys().next_back().map_or(1, |id| id.value() + 1);
        self.next_id
            .store(file_data.next_id.max(after_max), Ordering::SeqCst);

        tracing::debug!(count = budgets.len(), "loaded budgets");
        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        let file_data = BudgetData {
            next_id: self.next_id.load(Ordering::SeqCst),
            budgets: budgets.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn allocate_id(&self) -> BudgetId {
        BudgetId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, BudgetError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.get(&id).cloned())
    }

    /// All budgets in id order
    pub fn get_all(&self) -> Result<Vec<Budget>, BudgetError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.values().cloned().collect())
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Budget>, BudgetError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets
            .values()
            .filter(|b| b.category_id == category_id)
            .cloned()
            .collect())
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), BudgetError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        budgets.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(&self, id: BudgetId) -> Result<Option<Budget>, BudgetError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        Ok(budgets.remove(&id))
    }
}

//! Storage layer for budgetwatch
//!
//! Each entity type lives in its own JSON file under the data directory and
//! is held in memory behind an `RwLock` once loaded. Mutations go through the
//! services, which save the affected file and append to the audit log.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::{TransactionFilter, TransactionRepository};

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, Category, CategoryId, Transaction};
use crate::reports::DataSource;

pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> BudgetError {
    BudgetError::Storage(format!("Lock poisoned: {}", e))
}

/// Owns the repositories and the audit log
pub struct Storage {
    paths: BudgetPaths,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create the storage, making sure its directories exist
    ///
    /// Nothing is read until [`Storage::load_all`] is called.
    pub fn new(paths: BudgetPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create the storage and load everything from disk
    pub fn open(paths: BudgetPaths) -> BudgetResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> BudgetResult<()> {
        self.categories.load()?;
        self.budgets.load()?;
        self.transactions.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> BudgetResult<()> {
        self.categories.save()?;
        self.budgets.save()?;
        self.transactions.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> BudgetResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

impl DataSource for Storage {
    fn fetch_categories(&self) -> BudgetResult<Vec<Category>> {
        self.categories.get_all()
    }

    fn fetch_budgets(&self) -> BudgetResult<Vec<Budget>> {
        self.budgets.get_all()
    }

    fn fetch_transactions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<CategoryId>,
    ) -> BudgetResult<Vec<Transaction>> {
        let filter = TransactionFilter {
            start: Some(start),
            end: Some(end),
            category_id: category,
        };
        self.transactions.find(&filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").is_dir());
        assert!(storage.fetch_categories().unwrap().is_empty());
    }

    #[test]
    fn test_data_source_filters_window() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(BudgetPaths::with_base_dir(temp_dir.path())).unwrap();

        for (day, category) in [(1, 1), (15, 2), (31, 1)] {
            let id = storage.transactions.allocate_id();
            storage
                .transactions
                .upsert(Transaction::new(
                    id,
                    CategoryId::new(category),
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    Money::from_cents(-100),
                    TransactionType::Expense,
                ))
                .unwrap();
        }

        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        assert_eq!(storage.fetch_transactions(start, end, None).unwrap().len(), 2);
        let only_one = storage
            .fetch_transactions(start, end, Some(CategoryId::new(1)))
            .unwrap();
        assert_eq!(only_one.len(), 1);
        assert_eq!(only_one[0].date.to_string(), "2025-01-31");
    }
}

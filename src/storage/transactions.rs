//! Transaction repository
//!
//! Persists transactions to `transactions.json`, newest first.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BudgetError;
use crate::models::{CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionData {
    #[serde(default)]
    next_id: i64,
    transactions: Vec<Transaction>,
}

/// Filter for listing transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Earliest date, inclusive
    pub start: Option<NaiveDate>,
    /// Latest date, inclusive
    pub end: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
}

impl TransactionFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            category_id: None,
        }
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.start.map_or(true, |s| txn.date >= s)
            && self.end.map_or(true, |e| txn.date <= e)
            && self.category_id.map_or(true, |c| txn.category_id == c)
    }
}

pub struct TransactionRepository {
    path: PathBuf,
    transactions: RwLock<BTreeMap<TransactionId, Transaction>>,
    next_id: AtomicI64,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transactions: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut transactions = self.transactions.write().map_err(lock_error)?;

        transactions.clear();
        for txn in file_data.transactions {
            transactions.insert(txn.id, txn);
        }

        let after_max = transactions
            .keys()
            .next_back()
            .map_or(1, |id| id.value() + 1);
        self.next_id
            .store(file_data.next_id.max(after_max), Ordering::SeqCst);

        tracing::debug!(count = transactions.len(), "loaded transactions");
        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        let mut list: Vec<Transaction> = transactions.values().cloned().collect();
        sort_newest_first(&mut list);

        let file_data = TransactionData {
            next_id: self.next_id.load(Ordering::SeqCst),
            transactions: list,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn allocate_id(&self) -> TransactionId {
        TransactionId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, BudgetError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        Ok(transactions.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, BudgetError> {
        self.find(&TransactionFilter::default())
    }

    /// Transactions matching `filter`, newest first
    pub fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, BudgetError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        let mut list: Vec<Transaction> = transactions
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        sort_newest_first(&mut list);
        Ok(list)
    }

    pub fn count_by_category(&self, category_id: CategoryId) -> Result<usize, BudgetError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        Ok(transactions
            .values()
            .filter(|t| t.category_id == category_id)
            .count())
    }

    pub fn upsert(&self, txn: Transaction) -> Result<(), BudgetError> {
        let mut transactions = self.transactions.write().map_err(lock_error)?;
        transactions.insert(txn.id, txn);
        Ok(())
    }

    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, BudgetError> {
        let mut transactions = self.transactions.write().map_err(lock_error)?;
        Ok(transactions.remove(&id))
    }
}

fn sort_newest_first(list: &mut [Transaction]) {
    list.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> (TransactionRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));

        let rows = [
            (1, ymd(2025, 1, 5), -1000),
            (2, ymd(2025, 1, 20), -2000),
            (1, ymd(2025, 2, 1), -3000),
            (2, ymd(2025, 1, 20), -400),
        ];
        for (category, date, cents) in rows {
            let id = repo.allocate_id();
            repo.upsert(Transaction::new(
                id,
                CategoryId::new(category),
                date,
                Money::from_cents(cents),
                TransactionType::Expense,
            ))
            .unwrap();
        }

        (repo, temp_dir)
    }

    #[test]
    fn test_newest_first_with_id_tiebreak() {
        let (repo, _temp) = seeded();
        let ids: Vec<i64> = repo.get_all().unwrap().iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_find_by_window_and_category() {
        let (repo, _temp) = seeded();

        let january = TransactionFilter::between(ymd(2025, 1, 1), ymd(2025, 1, 31));
        assert_eq!(repo.find(&january).unwrap().len(), 3);

        let january_cat1 = january.category(CategoryId::new(1));
        let found = repo.find(&january_cat1).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, Money::from_cents(-1000));

        // bounds are inclusive
        let single_day = TransactionFilter::between(ymd(2025, 2, 1), ymd(2025, 2, 1));
        assert_eq!(repo.find(&single_day).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (repo, temp) = seeded();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp.path().join("transactions.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.get_all().unwrap(), repo.get_all().unwrap());
        assert_eq!(reloaded.allocate_id(), TransactionId::new(5));
        assert_eq!(reloaded.count_by_category(CategoryId::new(2)).unwrap(), 2);
    }
}

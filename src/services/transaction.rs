//! Transaction service
//!
//! Amounts are stored with the conventional sign for their type: expenses
//! negative, income positive. Reports do not depend on this.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Money, Transaction, TransactionId, TransactionType};
use crate::storage::{Storage, TransactionFilter};

pub struct TransactionService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub category_id: CategoryId,
    pub amount: Money,
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub kind: Option<TransactionType>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateTransactionInput) -> BudgetResult<Transaction> {
        self.require_category(input.category_id)?;
        check_amount(input.amount)?;

        let mut txn = Transaction::new(
            self.storage.transactions.allocate_id(),
            input.category_id,
            input.date,
            input.amount,
            input.kind,
        );
        txn.description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        txn.normalize_sign();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            txn.description.clone(),
            &txn,
        )?;

        tracing::info!(
            id = %txn.id,
            kind = %txn.kind,
            amount = txn.amount.cents(),
            "recorded transaction"
        );
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> BudgetResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Transactions matching `filter`, newest first, at most `limit` of them
    pub fn list(
        &self,
        filter: &TransactionFilter,
        limit: Option<usize>,
    ) -> BudgetResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.find(filter)?;
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> BudgetResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;
        let before = txn.clone();

        if let Some(category_id) = input.category_id {
            self.require_category(category_id)?;
            txn.category_id = category_id;
        }
        if let Some(amount) = input.amount {
            check_amount(amount)?;
            txn.amount = amount;
        }
        if let Some(kind) = input.kind {
            txn.kind = kind;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(description) = input.description {
            let description = description.trim();
            txn.description = (!description.is_empty()).then(|| description.to_string());
        }
        txn.normalize_sign();
        txn.updated_at = Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            txn.description.clone(),
            &before,
            &txn,
        )?;

        tracing::info!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    pub fn delete(&self, id: TransactionId) -> BudgetResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            txn.description.clone(),
            &txn,
        )?;

        tracing::info!(id = %txn.id, "deleted transaction");
        Ok(txn)
    }

    fn require_category(&self, id: CategoryId) -> BudgetResult<()> {
        self.storage
            .categories
            .get(id)?
            .map(|_| ())
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }
}

/// Keeps every stored amount far enough below `i64::MAX` that window totals stay exact
fn check_amount(amount: Money) -> BudgetResult<()> {
    if amount.exceeds_limit() {
        return Err(BudgetError::Validation(format!(
            "Transaction amount {} exceeds the maximum of {}",
            amount,
            Money::MAX_AMOUNT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::Category;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, Storage, CategoryId) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(BudgetPaths::with_base_dir(temp_dir.path())).unwrap();
        let id = storage.categories.allocate_id();
        storage.categories.upsert(Category::new(id, "Groceries")).unwrap();
        (temp_dir, storage, id)
    }

    fn input(category_id: CategoryId, cents: i64, kind: TransactionType) -> CreateTransactionInput {
        CreateTransactionInput {
            category_id,
            amount: Money::from_cents(cents),
            kind,
            date: ymd(2025, 1, 15),
            description: None,
        }
    }

    #[test]
    fn test_sign_normalization_on_create() {
        let (_temp, storage, category) = setup();
        let service = TransactionService::new(&storage);

        let expense = service
            .create(input(category, 4250, TransactionType::Expense))
            .unwrap();
        assert_eq!(expense.amount, Money::from_cents(-4250));

        let income = service
            .create(input(category, -200000, TransactionType::Income))
            .unwrap();
        assert_eq!(income.amount, Money::from_cents(200000));

        let transfer = service
            .create(input(category, 1000, TransactionType::Transfer))
            .unwrap();
        assert_eq!(transfer.amount, Money::from_cents(1000));
    }

    #[test]
    fn test_amount_above_limit_rejected() {
        let (_temp, storage, category) = setup();
        let service = TransactionService::new(&storage);

        let err = service
            .create(input(category, 5_000_000_000_000_000_000, TransactionType::Expense))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(storage.transactions.get_all().unwrap().is_empty());

        let at_limit = service
            .create(input(category, Money::MAX_AMOUNT.cents(), TransactionType::Expense))
            .unwrap();
        let err = service
            .update(
                at_limit.id,
                UpdateTransactionInput {
                    amount: Some(Money::from_cents(i64::MIN)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            service.get(at_limit.id).unwrap().unwrap().amount,
            -Money::MAX_AMOUNT
        );
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let (_temp, storage, _) = setup();
        let service = TransactionService::new(&storage);

        let err = service
            .create(input(CategoryId::new(7), -100, TransactionType::Expense))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(storage.transactions.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_renormalizes() {
        let (_temp, storage, category) = setup();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(category, -500, TransactionType::Expense))
            .unwrap();
        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionType::Income),
                    description: Some("Refund".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, Money::from_cents(500));
        assert_eq!(updated.description.as_deref(), Some("Refund"));
    }

    #[test]
    fn test_list_with_filter_and_limit() {
        let (_temp, storage, category) = setup();
        let service = TransactionService::new(&storage);

        for day in [3, 10, 20, 28] {
            let mut i = input(category, -100 * day as i64, TransactionType::Expense);
            i.date = ymd(2025, 1, day);
            service.create(i).unwrap();
        }

        let filter = TransactionFilter::between(ymd(2025, 1, 5), ymd(2025, 1, 31));
        let all = service.list(&filter, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, ymd(2025, 1, 28));

        let limited = service.list(&filter, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_delete_is_audited() {
        let (_temp, storage, category) = setup();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(category, -100, TransactionType::Expense))
            .unwrap();
        service.delete(txn.id).unwrap();

        assert!(service.get(txn.id).unwrap().is_none());
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }
}

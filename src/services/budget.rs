//! Budget service

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money};
use crate::storage::Storage;

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category_id: CategoryId,
    pub amount: Money,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDate>,
    /// `Some(None)` clears the end date
    pub end_date: Option<Option<NaiveDate>>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateBudgetInput) -> BudgetResult<Budget> {
        let category = self.require_category(input.category_id)?;

        let mut budget = Budget::new(
            BudgetId::new(0),
            input.category_id,
            input.amount,
            input.period,
            input.start_date,
        );
        budget.end_date = input.end_date;

        budget
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        budget.id = self.storage.budgets.allocate_id();

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(format!("{} {}", category, budget.period)),
            &budget,
        )?;

        tracing::info!(
            id = %budget.id,
            category = %category,
            amount = budget.amount.cents(),
            "created budget"
        );
        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> BudgetResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    pub fn list(&self) -> BudgetResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    pub fn update(&self, id: BudgetId, input: UpdateBudgetInput) -> BudgetResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))?;
        let before = budget.clone();

        if let Some(category_id) = input.category_id {
            self.require_category(category_id)?;
            budget.category_id = category_id;
        }
        if let Some(amount) = input.amount {
            budget.amount = amount;
        }
        if let Some(period) = input.period {
            budget.period = period;
        }
        if let Some(start_date) = input.start_date {
            budget.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            budget.end_date = end_date;
        }

        budget
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        budget.updated_at = Utc::now();

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            None,
            &before,
            &budget,
        )?;

        tracing::info!(id = %budget.id, "updated budget");
        Ok(budget)
    }

    pub fn delete(&self, id: BudgetId) -> BudgetResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))?;
        self.storage.budgets.save()?;

        self.storage
            .log_delete(EntityType::Budget, budget.id.to_string(), None, &budget)?;

        tracing::info!(id = %budget.id, "deleted budget");
        Ok(budget)
    }

    fn require_category(&self, id: CategoryId) -> BudgetResult<String> {
        self.storage
            .categories
            .get(id)?
            .map(|c| c.name)
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }
}

//! Category model
//!
//! Categories label transactions and budgets. Color and icon are carried for
//! presentation only; nothing in the aggregation engine reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::CategoryId;

/// Color used when a category does not specify one
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

/// Label shown for transactions whose category cannot be resolved
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (unique, case-insensitive)
    pub name: String,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display color as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    /// Optional icon reference (emoji or icon name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with the default color
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: None,
            color: default_color(),
            icon: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Identity-keyed lookup over a category snapshot
///
/// Transactions and budgets reference categories by id only; this is the
/// explicit join, with [`UNCATEGORIZED_LABEL`] as the fallback for ids that
/// no longer resolve.
#[derive(Debug, Clone)]
pub struct CategoryLookup<'a> {
    by_id: HashMap<CategoryId, &'a Category>,
}

impl<'a> CategoryLookup<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: CategoryId) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    /// Display label for a category id
    pub fn label(&self, id: CategoryId) -> &'a str {
        self.get(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// Display color for a category id
    pub fn color(&self, id: CategoryId) -> &'a str {
        self.get(id)
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}

/// Starter categories created by `budgetwatch init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Groceries,
    Transportation,
    Utilities,
    Entertainment,
    Healthcare,
    Income,
}

impl DefaultCategory {
    /// Get all default categories in order
    pub fn all() -> &'static [Self] {
        &[
            Self::Groceries,
            Self::Transportation,
            Self::Utilities,
            Self::Entertainment,
            Self::Healthcare,
            Self::Income,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Income => "Income",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Groceries => "Food and household items",
            Self::Transportation => "Gas, public transport, car maintenance",
            Self::Utilities => "Electricity, water, internet",
            Self::Entertainment => "Movies, dining out, hobbies",
            Self::Healthcare => "Medical expenses, insurance",
            Self::Income => "Salary and other income",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Groceries => "#3B82F6",
            Self::Transportation | Self::Income => "#10B981",
            Self::Utilities => "#F59E0B",
            Self::Entertainment => "#EF4444",
            Self::Healthcare => "#8B5CF6",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Groceries => "🛒",
            Self::Transportation => "🚗",
            Self::Utilities => "💡",
            Self::Entertainment => "🎬",
            Self::Healthcare => "🏥",
            Self::Income => "💰",
        }
    }

    /// Build the category with the given id
    pub fn to_category(&self, id: CategoryId) -> Category {
        Category::new(id, self.name())
            .with_description(self.description())
            .with_color(self.color())
            .with_icon(self.icon())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}', expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

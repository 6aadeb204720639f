//! First-run setup

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::{CategoryId, DefaultCategory};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Create the data directories and seed the starter categories
///
/// Returns `true` if categories were seeded. An existing categories file is
/// never overwritten.
pub fn initialize_storage(paths: &BudgetPaths) -> Result<bool, BudgetError> {
    paths.ensure_directories()?;

    if paths.categories_file().exists() {
        return Ok(false);
    }

    let categories: Vec<_> = DefaultCategory::all()
        .iter()
        .zip(1..)
        .map(|(default, id)| default.to_category(CategoryId::new(id)))
        .collect();

    let data = CategoryData {
        next_id: categories.len() as i64 + 1,
        categories,
    };
    write_json_atomic(paths.categories_file(), &data)?;

    tracing::info!(count = data.categories.len(), "seeded default categories");
    Ok(true)
}

//! Input validation helpers
//!
//! Centralized limits for checkout inputs. SQLite enforces none of these,
//! so commit and preview check them before work starts.

use crate::utils::AppError;

/// Upper bound on distinct SKUs in a single commit request.
pub const MAX_SKUS_PER_ORDER: usize = 100;

/// Upper bound on the quantity of a single cart line.
pub const MAX_LINE_QUANTITY: i64 = 9999;

/// Validate a caller-supplied SKU id list: non-empty, bounded, no duplicates.
pub fn validate_sku_ids(sku_ids: &[i64]) -> Result<(), AppError> {
    if sku_ids.is_empty() {
        return Err(AppError::validation("sku_ids must not be empty"));
    }
    if sku_ids.len() > MAX_SKUS_PER_ORDER {
        return Err(AppError::validation(format!(
            "too many skus in one order ({}, max {MAX_SKUS_PER_ORDER})",
            sku_ids.len()
        )));
    }
    let mut seen = std::collections::HashSet::with_capacity(sku_ids.len());
    for id in sku_ids {
        if !seen.insert(*id) {
            return Err(AppError::validation(format!("duplicate sku id {id}")));
        }
    }
    Ok(())
}

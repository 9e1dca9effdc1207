//! Shared helpers for Diesel repository implementations.
//!
//! Error mapping from pool and Diesel failures into the repository error
//! enums, LIKE-pattern escaping for search, and affected-row inspection for
//! guarded updates.

use tracing::debug;

use crate::domain::ports::{CatalogRepositoryError, OrderRepositoryError, UpdateStatus};

use super::pool::PoolError;

/// Extract a readable message from a pool error.
fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Map pool errors to catalog repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> CatalogRepositoryError {
    CatalogRepositoryError::connection(pool_error_message(error))
}

/// Map pool errors to order repository connection errors.
pub(crate) fn map_order_pool_error(error: PoolError) -> OrderRepositoryError {
    OrderRepositoryError::connection(pool_error_message(error))
}

/// Classify a Diesel error and emit debug context.
///
/// Closed connections surface as connection failures so the service layer
/// reports the backend as unavailable; everything else is a query failure.
fn diesel_error_message(error: diesel::result::Error) -> (bool, String) {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            let is_connection = matches!(kind, DatabaseErrorKind::ClosedConnection);
            (is_connection, info.message().to_owned())
        }
        other => {
            debug!(
                error_type = %std::any::type_name_of_val(other),
                "diesel operation failed"
            );
            (false, error.to_string())
        }
    }
}

/// Map Diesel errors to catalog repository errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> CatalogRepositoryError {
    let (is_connection, message) = diesel_error_message(error);
    if is_connection {
        CatalogRepositoryError::connection(message)
    } else {
        CatalogRepositoryError::query(message)
    }
}

/// Map Diesel errors to order repository errors.
pub(crate) fn map_order_diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    let (is_connection, message) = diesel_error_message(error);
    if is_connection {
        OrderRepositoryError::connection(message)
    } else {
        OrderRepositoryError::query(message)
    }
}

/// Escape LIKE metacharacters so a search term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build a `%term%` containment pattern with metacharacters escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Translate an affected-row count into an [`UpdateStatus`].
pub(crate) fn update_status(updated_rows: usize) -> UpdateStatus {
    if updated_rows == 0 {
        UpdateStatus::ZeroRows
    } else {
        UpdateStatus::Applied
    }
}

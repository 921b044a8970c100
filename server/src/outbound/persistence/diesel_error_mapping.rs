//! Translation of Diesel and pool failures into repository error variants.
//!
//! All three adapters classify low-level failures through this module so
//! identical causes surface with identical messages.

use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryFailure {
    /// The statement was rejected or produced no usable result.
    Query(&'static str),
    /// The connection itself is unusable.
    Connection(&'static str),
}

/// Underlying message of a pool checkout or build failure.
///
/// Pool failures always indicate connection trouble, so callers wrap the
/// returned text in their connection variant.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging the underlying cause at debug level.
///
/// Only a closed connection counts as a connection failure. `NotFound`,
/// query-builder problems, and other database errors stay query failures.
pub(crate) fn classify_diesel_error(error: &diesel::result::Error) -> QueryFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => QueryFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => QueryFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            QueryFailure::Connection("database connection error")
        }
        _ => QueryFailure::Query("database error"),
    }
}

/// Constraint classes that write paths translate into domain-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    /// A unique index rejected the write.
    Unique,
    /// A foreign key reference no longer exists.
    ForeignKey,
}

/// Identify constraint violations that adapters handle specially.
pub(crate) fn constraint_violation(error: &diesel::result::Error) -> Option<ConstraintViolation> {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Some(ConstraintViolation::Unique)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            Some(ConstraintViolation::ForeignKey)
        }
        _ => None,
    }
}

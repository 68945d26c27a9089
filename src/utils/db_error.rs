//! Mapping of `sqlx` failures onto the storage variants of [`AppError`].

use crate::error::AppError;

/// Returns a mapper turning a failed read into [`AppError::StorageRead`].
///
/// A closed pool is reported as [`AppError::StorageClosed`] instead.
pub fn read_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::PoolClosed => AppError::StorageClosed { operation },
        source => AppError::StorageRead { operation, source },
    }
}

/// Returns a mapper turning a failed write into [`AppError::StorageWrite`].
///
/// A closed pool is reported as [`AppError::StorageClosed`] instead.
pub fn write_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::PoolClosed => AppError::StorageClosed { operation },
        source => AppError::StorageWrite { operation, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_closed_maps_to_storage_closed() {
        let err = read_error("list_quotes")(sqlx::Error::PoolClosed);
        assert!(matches!(
            err,
            AppError::StorageClosed {
                operation: "list_quotes"
            }
        ));

        let err = write_error("add_quote")(sqlx::Error::PoolClosed);
        assert!(matches!(
            err,
            AppError::StorageClosed {
                operation: "add_quote"
            }
        ));
    }

    #[test]
    fn test_other_errors_keep_operation() {
        let err = read_error("stats")(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::StorageRead { operation: "stats", .. }));

        let err = write_error("delete_quote")(sqlx::Error::PoolTimedOut);
        assert!(matches!(
            err,
            AppError::StorageWrite {
                operation: "delete_quote",
                ..
            }
        ));
    }
}

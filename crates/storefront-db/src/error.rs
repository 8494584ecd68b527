use storefront_core::AppError;

/// Map a sqlx error onto the application error taxonomy.
///
/// Postgres surfaces constraint failures as driver errors; matching on the
/// message keeps this layer free of compile-time checked macros while still
/// letting handlers answer with precise statuses.
pub fn classify_sqlx_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::RowNotFound => AppError::NotFound,
        sqlx::Error::Database(db) if db.message().contains("duplicate key") => {
            AppError::Duplicate {
                constraint: db.constraint().unwrap_or("unknown").to_string(),
            }
        }
        sqlx::Error::Database(db) if db.message().contains("violates foreign key constraint") => {
            AppError::ForeignKeyViolation(db.message().to_string())
        }
        sqlx::Error::Database(db) if db.message().contains("invalid input syntax") => {
            AppError::InvalidInput(db.message().to_string())
        }
        other => AppError::DatabaseError(other.to_string()),
    }
}

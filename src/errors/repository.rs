use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(SqlxError),

    /// Unique constraint violation, e.g. an active record already owns the hash
    #[error("Conflict error: {0}")]
    Conflict(String),

    /// Invalid input data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::Database(db_err) => {
                // PostgreSQL error codes for the constraints on shortened_urls
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => {
                            return Self::Conflict("Hash is already used by an active URL".to_string())
                        }
                        "23514" => {
                            return Self::InvalidData("Data violates constraints".to_string())
                        }
                        _ => {}
                    }
                }
                Self::Database(SqlxError::Database(db_err))
            }
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_stay_database_errors() {
        for source in [SqlxError::PoolTimedOut, SqlxError::RowNotFound] {
            let err = RepositoryError::from(source);
            assert!(matches!(err, RepositoryError::Database(_)));
            assert!(err.to_string().starts_with("Database error:"));
        }
    }
}

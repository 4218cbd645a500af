//! Tool-level error type

use thiserror::Error;

use crate::db::DbError;
use crate::nutrition::InsufficientFoodsError;

#[derive(Debug, Error)]
pub enum FnaError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("at least 2 foods are required for comparison, found {found} of {requested} requested")]
    InsufficientFoods { found: usize, requested: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("chart error: {0}")]
    Chart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FnaError {
    /// NotFound, InsufficientFoods and InvalidInput are caused by the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FnaError::NotFound(_) | FnaError::InsufficientFoods { .. } | FnaError::InvalidInput(_)
        )
    }

    /// A comparison that resolved too few of the `requested` names
    pub fn insufficient_foods(e: InsufficientFoodsError, requested: usize) -> Self {
        FnaError::InsufficientFoods {
            found: e.found,
            requested,
        }
    }
}

impl From<rusqlite::Error> for FnaError {
    fn from(e: rusqlite::Error) -> Self {
        FnaError::Database(DbError::Sqlite(e))
    }
}

pub type FnaResult<T> = Result<T, FnaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(FnaError::NotFound("Food 'x'".into()).is_client_error());
        assert!(FnaError::InvalidInput("bad".into()).is_client_error());
        assert!(FnaError::InsufficientFoods { found: 1, requested: 3 }.is_client_error());
        assert!(!FnaError::Chart("no font".into()).is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(FnaError::NotFound("Food 'tempe'".into()).to_string(), "Food 'tempe' not found");
        assert_eq!(
            FnaError::InsufficientFoods { found: 1, requested: 3 }.to_string(),
            "at least 2 foods are required for comparison, found 1 of 3 requested"
        );
    }

    #[test]
    fn test_insufficient_foods_keeps_requested_count() {
        let err = FnaError::insufficient_foods(InsufficientFoodsError { found: 1 }, 3);
        assert!(matches!(err, FnaError::InsufficientFoods { found: 1, requested: 3 }));
        assert_eq!(
            err.to_string(),
            "at least 2 foods are required for comparison, found 1 of 3 requested"
        );
    }
}

/// Error types for listing-service
///
/// Every user-facing failure maps to a fixed catalog message; raw driver
/// errors are wrapped at the store call site and never leak their text
/// past the service boundary.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid identifier provided!")]
    InvalidIdentifier,

    #[error("No data found!")]
    NoDataFound,

    #[error("Create failed!")]
    CreateFailed,

    #[error("Update failed!")]
    UpdateFailed,

    #[error("Remove failed!")]
    RemoveFailed,

    #[error("Bad Request!")]
    BadRequest,

    #[error("Not Allowed Request!")]
    NotAllowed,

    #[error("Self subscription is denied!")]
    SelfSubscriptionDenied,

    #[error("Something went wrong!")]
    SomethingWentWrong,

    /// Store-driver failure with no nearer domain kind.
    #[error("Database error: {0}")]
    Database(String),
}

impl ServiceError {
    /// Wrap a driver error where no more specific kind applies.
    pub fn database(err: impl std::fmt::Display) -> Self {
        ServiceError::Database(err.to_string())
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

use thiserror::Error;

/// Errors from repository operations (used by trait definitions in ada-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Outcomes of bearer-token verification.
///
/// The variants exist for diagnostics only; callers treat every variant
/// uniformly as "unauthorized".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token provided")]
    Missing,

    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token has been revoked")]
    Revoked,

    #[error("token is invalid: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::Missing.to_string(), "no bearer token provided");
        assert_eq!(AuthError::Expired.to_string(), "token has expired");
    }
}

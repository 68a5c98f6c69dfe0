//! Failures the interface layer maps to client-facing statuses.
//!
//! Services return `anyhow::Result`; these variants travel inside it and
//! are recovered with `downcast_ref`. Anything else is an internal error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> anyhow::Error {
        DomainError::NotFound(what.into()).into()
    }

    pub fn validation(message: impl Into<String>) -> anyhow::Error {
        DomainError::Validation(message.into()).into()
    }

    pub fn conflict(message: impl Into<String>) -> anyhow::Error {
        DomainError::Conflict(message.into()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_through_anyhow() {
        let err = DomainError::not_found("Participant p1");
        assert_eq!(err.to_string(), "Participant p1 not found");
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }
}

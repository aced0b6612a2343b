use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised by the typed reads over an options document.
///
/// Absent keys are never errors; only a present value of the wrong JSON
/// type is.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("expected {expected} at '{key}', found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("options document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

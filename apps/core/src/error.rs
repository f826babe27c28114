use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// An unexpected failure while extracting an intent or building a response.
    /// Never reaches the chat caller: the assistant absorbs it into a generic reply.
    #[error("Classification error: {0}")]
    Classification(String),

    /// Represents data validation errors (e.g., a chat request without a message).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON input (requests or workspace snapshots).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// `serde_json::Error` is not `Clone`; a cloned `Json` error keeps only its text, as `Validation`.
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Classification(s) => AppError::Classification(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Json(e) => AppError::Validation(format!("JSON error: {}", e)),
        }
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Classification(format!("Pattern compilation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_keeps_owned_variants() {
        let err = AppError::Config("bad value".to_string());
        assert!(matches!(err.clone(), AppError::Config(ref s) if s == "bad value"));

        let err = AppError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        match err.clone() {
            AppError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_clone_of_json_error_becomes_validation() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, AppError::Json(_)));
        match err.clone() {
            AppError::Validation(msg) => assert!(msg.starts_with("JSON error: "), "{}", msg),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_regex_error_is_classification() {
        let err: AppError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, AppError::Classification(_)));
        assert!(err.to_string().starts_with("Classification error"));
    }
}

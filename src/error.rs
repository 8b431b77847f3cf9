use serde::Serialize;
use std::io;
use thiserror::Error;

pub const EMPTY_QUERY_MESSAGE: &str = "Enter a username to search";
pub const TRANSPORT_MESSAGE: &str = "Unable to reach the lookup service right now";
pub const NOT_FOUND_MESSAGE: &str = "Player not found";

#[derive(Error, Debug)]
pub enum AppError {
    /// The query was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The lookup service could not be reached or answered with garbage.
    #[error("{0}")]
    Transport(String),

    /// The service answered but did not return a player.
    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl AppError {
    pub fn empty_query() -> Self {
        AppError::Validation(EMPTY_QUERY_MESSAGE.to_string())
    }

    pub fn transport() -> Self {
        AppError::Transport(TRANSPORT_MESSAGE.to_string())
    }

    /// Builds a not-found error from the envelope message, falling back to the generic text.
    pub fn not_found(message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(NOT_FOUND_MESSAGE);
        AppError::NotFound(message.to_string())
    }
}

#[derive(Serialize, Debug)]
pub struct CommandError {
    pub message: String,
    pub kind: String,
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        CommandError {
            message: error.to_string(),
            kind: format!("{:?}", error),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_uses_envelope_message() {
        let err = AppError::not_found(Some("Unknown Steam ID"));
        assert_eq!(err.to_string(), "Unknown Steam ID");
    }

    #[test]
    fn test_not_found_keeps_message_verbatim() {
        let err = AppError::not_found(Some("  Player not found.  "));
        assert!(matches!(err, AppError::NotFound(ref m) if m == "  Player not found.  "));
    }

    #[test]
    fn test_not_found_falls_back_on_blank_message() {
        assert_eq!(AppError::not_found(None).to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(AppError::not_found(Some("   ")).to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_command_error_keeps_message() {
        let command_error: CommandError = AppError::empty_query().into();
        assert_eq!(command_error.message, EMPTY_QUERY_MESSAGE);
        assert!(command_error.kind.starts_with("Validation"));
    }
}

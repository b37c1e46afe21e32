use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Output,
    Transport,
    Auth,
    Validation,
    MalformedResponse,
    Service,
    InvalidInput,
    Config,
    Other,
}

#[derive(Error, Debug)]
pub enum NovaError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("authorization error: {0}")]
    Auth(String),

    #[error("request rejected by service: {0}")]
    Validation(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl NovaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NovaError::Io {
            path: path.into(),
            source,
        }
    }

    /// Classifies an opaque failure by the text of its message.
    ///
    /// Only used for errors that carry no structured category.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if message.contains("ValidationException") || lower.contains("invalid") {
            NovaError::Validation(message)
        } else if mentions_credentials(&message) {
            NovaError::Auth(message)
        } else {
            NovaError::Other(message)
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NovaError::Io { .. } => ErrorCategory::Io,
            NovaError::Output(_) => ErrorCategory::Output,
            NovaError::Transport(_) => ErrorCategory::Transport,
            NovaError::Auth(_) => ErrorCategory::Auth,
            NovaError::Validation(_) => ErrorCategory::Validation,
            NovaError::MalformedResponse(_) => ErrorCategory::MalformedResponse,
            NovaError::Service(_) => ErrorCategory::Service,
            NovaError::InvalidInput(_) => ErrorCategory::InvalidInput,
            NovaError::Config(_) => ErrorCategory::Config,
            NovaError::Other(_) => ErrorCategory::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, NovaError>;

pub(crate) fn mentions_credentials(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("credentials") || lower.contains("auth")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_validation_messages() {
        let err = NovaError::from_message("ValidationException: model not enabled");
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err = NovaError::from_message("The provided model identifier is INVALID");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn should_classify_credential_messages() {
        let err = NovaError::from_message("no Credentials in the provider chain");
        assert_eq!(err.category(), ErrorCategory::Auth);

        let err = NovaError::from_message("not authorized to perform bedrock:InvokeModel");
        assert_eq!(err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn should_prefer_validation_over_auth_when_both_match() {
        let err = NovaError::from_message("invalid auth header");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn should_fall_back_to_other_for_unknown_messages() {
        let err = NovaError::from_message("connection reset by peer");
        assert_eq!(err.category(), ErrorCategory::Other);
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[test]
    fn should_name_path_in_io_error() {
        let err = NovaError::io(
            "images/missing.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().contains("images/missing.png"));
    }

    #[test]
    fn should_keep_output_failures_apart_from_input_files() {
        let err = NovaError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "Broken pipe",
        ));
        assert_eq!(err.category(), ErrorCategory::Output);
        assert!(err.to_string().starts_with("failed to write output"));
    }
}

// Error taxonomy shared by the signing, storage and session layers

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or missing input. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("{path} failed: {status}")]
    UpstreamSigning { path: String, status: u16 },

    #[error("Upload failed: {status}")]
    UploadFailed { status: u16 },

    /// The signed GET resolved but storage had nothing playable behind it yet.
    #[error("Audio not available: {status}")]
    PlaybackNotReady { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Whether the error was raised before anything went over the wire.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::UpstreamSigning {
            path: "/sign-put?key=input%2Fstory.txt".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "/sign-put?key=input%2Fstory.txt failed: 500");

        let err = AppError::UploadFailed { status: 403 };
        assert_eq!(err.to_string(), "Upload failed: 403");

        let err = AppError::validation("Filename must end with .txt");
        assert_eq!(err.to_string(), "Filename must end with .txt");
        assert!(err.is_validation());
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("fetch failed for {site}: {source}")]
    Fetch {
        site: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("parse failed for {site}: {message}")]
    Parse { site: String, message: String },

    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("notification dispatch failed: {0}")]
    Notify(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_parse_error_display() {
        let err = AppError::Parse {
            site: "falabella".to_string(),
            message: "no product blocks matched".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parse failed for falabella: no product blocks matched"
        );
    }

    #[test]
    fn test_notify_error_display() {
        let err = AppError::Notify("telegram returned 502 Bad Gateway".to_string());
        assert_eq!(
            err.to_string(),
            "notification dispatch failed: telegram returned 502 Bad Gateway"
        );
    }
}

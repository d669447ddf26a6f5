// Error types for sqlprobe
// Configuration and I/O errors surface to the CLI; transport errors are
// mostly swallowed by the prober and only logged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A target-list line could not be turned into a request descriptor
    #[error("Target list line {line}: {reason}")]
    TargetParse { line: usize, reason: String },

    #[error("Payload catalog error: {0}")]
    PayloadParse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse_error_display() {
        let error = ScanError::TargetParse { line: 3, reason: "missing '|'".to_string() };
        assert_eq!(error.to_string(), "Target list line 3: missing '|'");
    }

    #[test]
    fn test_config_error_display() {
        let error = ScanError::Config("concurrency must be at least 1".to_string());
        assert_eq!(error.to_string(), "Configuration error: concurrency must be at least 1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "targets.txt");
        let scan_error: ScanError = io_error.into();
        assert!(matches!(scan_error, ScanError::Io(_)));
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let parse_error = url::Url::parse("not a url").unwrap_err();
        let scan_error: ScanError = parse_error.into();
        assert!(matches!(scan_error, ScanError::Url(_)));
    }
}

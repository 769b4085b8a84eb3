use thiserror::Error;

/// Result type for promgrep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for promgrep operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parsing errors when processing source code
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Metric option extraction errors
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A matcher could not evaluate a declaration
    #[error("Match error: {0}")]
    Match(String),

    /// The scan root could not be walked
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Creates a match error
    pub fn matching(msg: impl Into<String>) -> Self {
        Self::Match(msg.into())
    }

    /// Creates a discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error is confined to a single file or node.
    ///
    /// File-scoped errors are reported and skipped by the scan driver; all
    /// other errors abort the scan.
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Match(_) | Self::Extraction(_))
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("pkg/metrics.go", "expected 'package'");
        assert_eq!(
            err.to_string(),
            "Parse error in pkg/metrics.go: expected 'package'"
        );
    }

    #[test]
    fn test_file_scoped_classification() {
        assert!(Error::parse("a.go", "bad").is_file_scoped());
        assert!(Error::matching("zero denominator").is_file_scoped());
        assert!(!Error::discovery("cannot walk").is_file_scoped());
        assert!(!Error::config("bad glob").is_file_scoped());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!Error::from(io).is_file_scoped());
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("Failed to read main.go").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read main.go: denied");
    }
}

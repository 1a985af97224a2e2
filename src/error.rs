//! Error types for the autotagger.
//!
//! This module defines all error types that can occur while analyzing,
//! rewriting, and tagging a document.

/// Result type alias for autotagger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during tagging.
///
/// Only document-level failures (open, save, missing pages) surface through
/// this type; per-item and per-table problems are logged and skipped at the
/// smallest possible scope so a best-effort tagged document is still produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the document object model
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Input file or arguments are unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Page index outside the document
    #[error("Page {0} not found in document")]
    MissingPage(usize),

    /// Layout analysis failed for the whole document
    #[error("Layout analysis failed: {0}")]
    Layout(String),

    /// Sidecar serialization error
    #[error("Sidecar serialization error: {0}")]
    Sidecar(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = Error::InvalidInput("not a PDF".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid input"));
        assert!(msg.contains("not a PDF"));
    }

    #[test]
    fn test_missing_page_error() {
        let err = Error::MissingPage(7);
        let msg = format!("{}", err);
        assert!(msg.contains("Page 7"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

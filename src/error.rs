//! Error types for page generation
//!
//! Only fatal conditions are errors. A component or nested model whose type
//! matches no model is logged and dropped by the converter, never raised.

use thiserror::Error;

/// Main error type for document creation
#[derive(Error, Debug)]
pub enum PageError {
    /// The text-generation service could not be reached or gave no usable response
    #[error("Layout generation failed: {0}")]
    Generation(#[source] anyhow::Error),

    /// No JSON layout could be located in the generated text
    #[error("Layout parse error: {reason}")]
    Parse { reason: String },

    /// A field spec declares a kind the converter does not handle
    #[error("Unsupported field kind '{kind}' for field '{field}'")]
    UnsupportedFieldKind { field: String, kind: String },

    /// The wrapped content source failed
    #[error("Content source error: {0}")]
    Persistence(#[source] anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PageError {
    pub fn parse(reason: impl Into<String>) -> Self {
        PageError::Parse {
            reason: reason.into(),
        }
    }
}

pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PageError::UnsupportedFieldKind {
            field: "attachment".into(),
            kind: "file".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported field kind 'file' for field 'attachment'"
        );
        assert_eq!(
            PageError::parse("no JSON object found").to_string(),
            "Layout parse error: no JSON object found"
        );
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckbuildError {
    // IO errors
    #[error("READ_ERROR: failed to read '{}'", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WRITE_ERROR: failed to {operation} '{}'", path.display())]
    WriteError {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse '{}': {reason}", path.display())]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Recipe errors
    #[error("RECIPE_NOT_FOUND: recipe '{0}' is not defined")]
    RecipeNotFound(String),
}

impl DeckbuildError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckbuildError::ReadError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        DeckbuildError::WriteError {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DeckbuildError::ConfigInvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckbuildError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_display_has_code_and_path() {
        let err = DeckbuildError::read(
            "pandoc/templates/merged_template.latex",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("READ_ERROR:"), "got: {}", msg);
        assert!(msg.contains("pandoc/templates/merged_template.latex"));
    }

    #[test]
    fn test_write_error_keeps_source() {
        let err = DeckbuildError::write(
            "rename temporary file onto",
            "make_deck",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("WRITE_ERROR: failed to rename"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_leaves_io_message_to_source_chain() {
        let err = DeckbuildError::read(
            "make_deck",
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );
        assert!(!err.to_string().contains("Permission denied"), "got: {}", err);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Permission denied");
    }
}

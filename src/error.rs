use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
///
/// Discovery and assembly never produce these; malformed router input degrades to
/// "no routes". The variants cover the adapter contract and the file-facing helpers.
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    SerializationError(String),
    InvalidArgument(String),
    InvalidDocument { file: PathBuf, message: String },
    /// An adapter was asked to convert a schema its own `detect` rejects.
    AdapterMismatch { adapter: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidDocument { file, message } => {
                write!(f, "Invalid document {}: {}", file.display(), message)
            }
            Error::AdapterMismatch { adapter } => write!(
                f,
                "Schema adapter '{}' cannot convert a schema it does not detect",
                adapter
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_mismatch_message_names_adapter() {
        let err = Error::AdapterMismatch {
            adapter: "joi".to_string(),
        };
        assert!(err.to_string().contains("'joi'"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_json_error_converts_to_serialization_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::SerializationError(_)));
    }
}

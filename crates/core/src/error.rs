// Central Error Types for cmdenv

use thiserror::Error;

/// Filesystem capability errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Is a directory: {0}")]
    IsADirectory(String),

    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid open flags for {path}: {reason}")]
    InvalidFlags { path: String, reason: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FsError {
    /// Classify an OS error for `path`, keeping the path for the common kinds
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_string()),
            _ => FsError::Io(err),
        }
    }
}

/// Result type alias for filesystem operations
pub type FsResult<T> = std::result::Result<T, FsError>;

/// Errors raised while reading the process environment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Malformed environment entry (missing '='): {0:?}")]
    MalformedEntry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_keeps_path_for_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let fs_err = FsError::from_io("a/b.txt", err);
        assert!(matches!(fs_err, FsError::NotFound(ref p) if p == "a/b.txt"));
    }

    #[test]
    fn test_from_io_passes_other_kinds_through() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(FsError::from_io("x", err), FsError::Io(_)));
    }
}

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MongoLogError>;

/// 错误类别：调用方按类别决定退出码与日志文案。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IoFailure,
    InvalidMode,
    Configuration,
}

#[derive(Debug, Error)]
pub enum MongoLogError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (looks like {detected})", path.display())]
    Encoding { path: PathBuf, detected: String },

    #[error("invalid parse mode '{0}', expected 'cluster' or 'database'")]
    InvalidMode(String),

    #[error("invalid pattern for field {field}: {pattern} - {reason}")]
    Pattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MongoLogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MongoLogError::NotFound { .. } => ErrorKind::NotFound,
            MongoLogError::FileAccess { .. }
            | MongoLogError::Encoding { .. }
            | MongoLogError::Csv(_)
            | MongoLogError::Io(_) => ErrorKind::IoFailure,
            MongoLogError::InvalidMode(_) => ErrorKind::InvalidMode,
            MongoLogError::Pattern { .. } => ErrorKind::Configuration,
        }
    }

    /// Map an `io::Error` raised while touching `path`, keeping NotFound distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            MongoLogError::NotFound { path }
        } else {
            MongoLogError::FileAccess { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found_kind() {
        let err = MongoLogError::from_io(
            "missing.log",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("missing.log"));

        let err = MongoLogError::from_io(
            "locked.log",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn invalid_mode_message_names_value() {
        let err = MongoLogError::InvalidMode("foo".into());
        assert_eq!(err.kind(), ErrorKind::InvalidMode);
        assert!(err.to_string().contains("'foo'"));
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for logsift-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while scanning and classifying
#[derive(Debug)]
pub enum Error {
    /// The input file could not be opened
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO operation failed mid-scan
    Io(std::io::Error),

    /// A line that looked like JSON failed to parse
    Json(serde_json::Error),

    /// A matcher or timestamp error from the types layer
    Field(logsift_types::Error),

    /// A per-line failure, wrapped with the file and 0-based line number
    AtLine {
        path: PathBuf,
        line: usize,
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn at_line(path: &Path, line: usize, source: Error) -> Self {
        Error::AtLine {
            path: path.to_path_buf(),
            line,
            source: Box::new(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open { path, source } => write!(f, "opening {}: {}", path.display(), source),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "invalid JSON: {}", err),
            Error::Field(err) => write!(f, "{}", err),
            Error::AtLine { path, line, source } => {
                write!(f, "error parsing {} on line {}: {}", path.display(), line, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Field(err) => Some(err),
            Error::AtLine { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<logsift_types::Error> for Error {
    fn from(err: logsift_types::Error) -> Self {
        Error::Field(err)
    }
}

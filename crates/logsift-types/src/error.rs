use std::fmt;

/// Result type for logsift-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A rule pattern failed to compile
    Regex(regex::Error),

    /// An entry timestamp was missing or malformed
    Timestamp(String),

    /// Two rules in a table share an identifier
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Regex(err) => write!(f, "invalid regex: {}", err),
            Error::Timestamp(msg) => write!(f, "{}", msg),
            Error::DuplicateId { id, first, second } => {
                write!(
                    f,
                    "duplicate rule id {} at indices {} and {}",
                    id, second, first
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Regex(err) => Some(err),
            Error::Timestamp(_) | Error::DuplicateId { .. } => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

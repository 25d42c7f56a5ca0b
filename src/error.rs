use core::fmt;

/// Result alias for `major_match`.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] values.
///
/// Callers that only care whether a request was malformed (as opposed to a
/// broken configuration or an unreadable dataset) can match on this instead
/// of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was unusable (empty batch, ragged rows, bad profile).
    InvalidInput,
    /// The configuration table is malformed.
    InvalidConfig,
    /// The reference dataset could not be read.
    Dataset,
}

/// Errors returned by the encoding, clustering and recommendation primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input batch was empty.
    EmptyInput,

    /// Feature vectors of differing length in one batch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// A submitted profile failed validation.
    InvalidProfile(String),

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A session action is not allowed on the current page.
    InvalidTransition {
        /// Page the session was on.
        from: &'static str,
        /// Action that was attempted.
        action: &'static str,
    },

    /// Configuration could not be parsed.
    Config(String),

    /// Reference dataset could not be read or parsed.
    Dataset(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput
            | Error::DimensionMismatch { .. }
            | Error::InvalidClusterCount { .. }
            | Error::InvalidProfile(_)
            | Error::InvalidTransition { .. } => ErrorKind::InvalidInput,
            Error::InvalidParameter { .. } | Error::Config(_) => ErrorKind::InvalidConfig,
            Error::Dataset(_) => ErrorKind::Dataset,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::InvalidProfile(msg) => write!(f, "invalid profile: {msg}"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::InvalidTransition { from, action } => {
                write!(f, "cannot {action} from the {from} page")
            }
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Dataset(msg) => write!(f, "dataset error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Dataset(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            Error::DimensionMismatch {
                expected: 3,
                found: 2
            }
            .kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            Error::InvalidParameter {
                name: "k",
                message: "must be positive".into()
            }
            .kind(),
            ErrorKind::InvalidConfig
        );
        assert_eq!(Error::Dataset("x".into()).kind(), ErrorKind::Dataset);
    }

    #[test]
    fn test_display() {
        let e = Error::InvalidClusterCount {
            requested: 0,
            n_items: 4,
        };
        assert_eq!(e.to_string(), "cannot create 0 clusters from 4 items");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: Error = err.into();
        assert_eq!(e.kind(), ErrorKind::InvalidConfig);
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StripeError>;

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Received event with API version {event}, but expected API version {expected}")]
    ApiVersionMismatch { event: String, expected: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Path(#[from] PathError),
}

impl From<serde_json::Error> for StripeError {
    fn from(err: serde_json::Error) -> Self {
        StripeError::Parse(err.to_string())
    }
}

/// A path that does not fit the shape of the value it walks.
///
/// The display text is the panic message of [`crate::get_value`], so callers
/// matching on it get the same string either way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Cannot access nested slice element with non-integer key: {0}")]
    NonIntegerIndex(String),

    #[error("Cannot descend into non-map non-slice object with key: {0}")]
    NotDescendable(String),

    #[error("index out of range [{index}] with length {len}")]
    IndexOutOfRange { index: i64, len: usize },
}

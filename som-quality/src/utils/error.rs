#[cfg(test)]
#[path = "../../tests/unit/utils/error_test.rs"]
mod error_test;

/// A basic error type which, essentially, a wrapper on String type.
#[derive(Clone, Debug)]
pub struct GenericError(String);

/// A type alias for result type with `GenericError`.
pub type GenericResult<T> = Result<T, GenericError>;

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl<'a> From<&'a str> for GenericError {
    fn from(value: &'a str) -> Self {
        Self(value.to_string())
    }
}

impl From<std::io::Error> for GenericError {
    fn from(value: std::io::Error) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<Self> for GenericError {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

/// Specifies an error which can happen while computing quality measures.
#[derive(Clone, Debug, PartialEq)]
pub enum QualityError {
    /// Requested measure key is not registered.
    UnknownMeasure(String),
    /// Requested output is not provided by a measure.
    NotFound {
        /// A measure key.
        measure: String,
        /// A requested output name.
        name: String,
    },
    /// A metric cannot be applied to given vectors, e.g. dimensions differ.
    Metric(String),
    /// A measure parameter is out of its valid range.
    InvalidParameter(String),
    /// Input data or map state cannot be used by a measure.
    InvalidData(String),
}

/// A type alias for result type with `QualityError`.
pub type QualityResult<T> = Result<T, QualityError>;

impl QualityError {
    /// Creates a not found error for the given measure and output name.
    pub fn not_found(measure: &str, name: &str) -> Self {
        Self::NotFound { measure: measure.to_string(), name: name.to_string() }
    }

    /// Returns true if error is recoverable, i.e. caller can skip the measure and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownMeasure(_) | Self::NotFound { .. } | Self::InvalidParameter(_))
    }
}

impl std::fmt::Display for QualityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMeasure(key) => write!(f, "unknown quality measure: '{key}'"),
            Self::NotFound { measure, name } => {
                write!(f, "output '{name}' is not found in quality measure '{measure}'")
            }
            Self::Metric(msg) => write!(f, "metric error: {msg}"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for QualityError {}

impl From<QualityError> for GenericError {
    fn from(value: QualityError) -> Self {
        Self(value.to_string())
    }
}

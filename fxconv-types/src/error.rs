//! Error types for the currency converter.

/// Failure of a single rate fetch.
///
/// The conversion service treats every variant the same way; the split only
/// exists so logs and adapters can say what went wrong.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Exchange rate API returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Exchange rate API error: {0}")]
    Api(String),

    #[error("Malformed response from exchange rate API: {0}")]
    MalformedResponse(String),
}

/// Coarse classification used by the console and HTTP layers to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the core refuses to compute with.
    InvalidInput,
    /// No rate could be obtained right now; trying again later may succeed.
    Unavailable,
}

/// Errors raised by the conversion service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Exchange rate cannot be zero")]
    ZeroRate,

    #[error("Failed to fetch exchange rate for {pair}: {source}")]
    FetchFailed {
        pair: String,
        #[source]
        source: FetchError,
    },
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidArgument(_) | ConversionError::ZeroRate => {
                ErrorKind::InvalidInput
            }
            ConversionError::FetchFailed { .. } => ErrorKind::Unavailable,
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid currency code: {code}")]
    InvalidCurrency {
        code: String,
        supported: Vec<&'static str>,
    },

    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidArgument(msg) => AppError::BadRequest(msg),
            // A zero rate coming back from upstream is not the caller's fault.
            ConversionError::ZeroRate => AppError::Internal(ConversionError::ZeroRate.to_string()),
            e @ ConversionError::FetchFailed { .. } => AppError::ServiceUnavailable(e.to_string()),
        }
    }
}

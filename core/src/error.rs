//! Error types for the conversion core.
//!
//! # Design
//! Errors are split by where they arise. `ApiError` describes a single
//! upstream request. `RateError` is the "rate unavailable" category the
//! resolver reports once its fallbacks are exhausted. `InputError` covers user
//! input and is always raised before any network access. `ConvertError` joins
//! the last two for the conversion entry point.

use thiserror::Error;

use crate::currency::CurrencyCode;

/// A currency code failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("'{0}' is not a three-letter currency code")]
    Malformed(String),

    #[error("currency {0} is not supported")]
    Unsupported(CurrencyCode),
}

/// Returned by host transports when a request could not be completed at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Errors from one upstream "latest rates" request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The body was not one of the accepted JSON shapes.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The body parsed but held no usable rates.
    #[error("no usable rates for base {base}")]
    EmptyRates { base: CurrencyCode },
}

/// A rate could not be produced from the cache, the network, or the USD pivot.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("no rates for {from} and no USD table to pivot through")]
    NoPivotTable {
        from: CurrencyCode,
        #[source]
        source: ApiError,
    },

    #[error("no rate from {from} to {to}")]
    MissingRate { from: CurrencyCode, to: CurrencyCode },
}

/// Problems with what the user typed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Please enter an amount")]
    MissingAmount,

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount(f64),

    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

/// Errors from `convert`.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Rate(#[from] RateError),
}

impl ConvertError {
    /// Text shown to the user. Rate failures collapse to one generic message.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Input(e) => e.to_string(),
            ConvertError::Rate(_) => CONVERSION_FAILED.to_string(),
        }
    }
}

pub const CONVERSION_FAILED: &str = "Conversion failed. Please try again.";

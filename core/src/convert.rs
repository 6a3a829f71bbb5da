//! Input validation and the conversion entry point.
//!
//! Everything the user typed is validated before the resolver is consulted,
//! so bad input never costs a network round-trip.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::RatesClient;
use crate::currency::{parse_supported, CurrencyCode};
use crate::error::{ConvertError, InputError};
use crate::format::{format_money, format_rate};
use crate::http::Transport;
use crate::resolver::{resolve_quote, source_entry, ConverterState};
use crate::types::{Derivation, RateQuote};

/// Parse a strictly positive, finite amount.
pub fn parse_amount(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingAmount);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidAmount(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(InputError::InvalidAmount(trimmed.to_string()));
    }
    if amount <= 0.0 {
        return Err(InputError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// A validated conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionRequest {
    pub fn parse(amount: &str, from: &str, to: &str) -> Result<Self, InputError> {
        Ok(Self {
            amount: parse_amount(amount)?,
            from: parse_supported(from)?,
            to: parse_supported(to)?,
        })
    }
}

/// The converter's form fields as the user left them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionForm {
    pub amount: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl Default for ConversionForm {
    fn default() -> Self {
        Self {
            amount: "1".to_string(),
            from: CurrencyCode::USD,
            to: CurrencyCode::EUR,
        }
    }
}

impl ConversionForm {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn to_request(&self) -> Result<ConversionRequest, InputError> {
        Ok(ConversionRequest {
            amount: parse_amount(&self.amount)?,
            from: self.from,
            to: self.to,
        })
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
    pub derivation: Derivation,
    /// Fetch time of the table the rate came from; `None` for identity.
    pub rates_as_of: Option<DateTime<Utc>>,
}

impl Conversion {
    pub fn rate_line(&self) -> String {
        format_rate(self.rate, self.from, self.to)
    }

    pub fn updated_line(&self) -> Option<String> {
        self.rates_as_of
            .map(|at| format!("Last updated: {}", at.format("%Y-%m-%d %H:%M:%S UTC")))
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            format_money(self.amount, self.from),
            format_money(self.converted, self.to)
        )
    }
}

/// Convert a validated request, fetching rates as needed.
pub fn convert<T: Transport + ?Sized>(
    state: &mut ConverterState,
    client: &RatesClient,
    transport: &mut T,
    request: &ConversionRequest,
) -> Result<Conversion, ConvertError> {
    let quote = if request.from == request.to {
        RateQuote::identity()
    } else {
        resolve_quote(state, client, transport, request.from, request.to)?
    };
    let rates_as_of = source_entry(&state.cache, &quote, request.from, request.to).map(|entry| entry.fetched_at);
    Ok(Conversion {
        from: request.from,
        to: request.to,
        amount: request.amount,
        rate: quote.rate,
        converted: request.amount * quote.rate,
        derivation: quote.derivation,
        rates_as_of,
    })
}

/// Validate the form, then convert.
pub fn convert_form<T: Transport + ?Sized>(
    state: &mut ConverterState,
    client: &RatesClient,
    transport: &mut T,
    form: &ConversionForm,
) -> Result<Conversion, ConvertError> {
    let request = form.to_request()?;
    convert(state, client, transport, &request)
}

//! Currency conversion core with endpoint fallback.
//!
//! # Overview
//! Resolves exchange rates from a primary "latest rates" endpoint, a
//! secondary endpoint, and a built-in USD table, caching one table per base
//! currency for the life of a `ConverterState`. The crate never touches the
//! network: the host supplies a `Transport` that executes the plain-data
//! `HttpRequest`s the core builds.
//!
//! # Design
//! - `RatesClient` is stateless. It only builds requests and parses responses.
//! - `ConverterState` is explicit and passed by `&mut` to the resolver and
//!   conversion functions, so they are testable without a UI or a network.
//! - Currency codes are validated into `CurrencyCode` at every boundary.

pub mod cache;
pub mod client;
pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod fallback;
pub mod format;
pub mod http;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod testing;

pub use cache::{CachedTable, RateCache};
pub use client::RatesClient;
pub use config::Endpoints;
pub use convert::{convert, convert_form, parse_amount, Conversion, ConversionForm, ConversionRequest};
pub use currency::{CurrencyCode, CATALOGUE};
pub use error::{ApiError, ConvertError, CurrencyError, InputError, RateError, TransportError};
pub use format::{format_money, format_rate};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use resolver::{load_initial_rates, resolve_quote, resolve_rate, source_entry, ConverterState, StartupReport};
pub use types::{Derivation, RateOrigin, RateQuote, RateTable};

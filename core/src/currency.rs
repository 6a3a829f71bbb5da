//! Validated currency codes and the supported-currency catalogue.
//!
//! # Design
//! `CurrencyCode` stores three upper-case ASCII letters inline, so it is
//! `Copy` and can key maps without allocation. Upstream rate tables contain
//! far more codes than the catalogue, so parsing only checks the shape;
//! membership in the catalogue is enforced where user input enters the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// An ISO-4217-shaped currency code: exactly three ASCII letters, upper case.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");
    pub const EUR: CurrencyCode = CurrencyCode(*b"EUR");
    pub const GBP: CurrencyCode = CurrencyCode(*b"GBP");
    pub const JPY: CurrencyCode = CurrencyCode(*b"JPY");

    /// Parse and normalise a code. Surrounding whitespace is ignored and
    /// lower-case letters are accepted.
    pub fn parse(input: &str) -> Result<Self, CurrencyError> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(CurrencyError::Malformed(trimmed.to_string()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Display name from the catalogue, if this code is supported.
    pub fn name(&self) -> Option<&'static str> {
        CATALOGUE
            .iter()
            .find(|(code, _)| code == self)
            .map(|(_, name)| *name)
    }

    pub fn is_supported(&self) -> bool {
        self.name().is_some()
    }

    /// Number of minor-unit digits shown when formatting amounts. The won,
    /// like the yen, has no minor unit in circulation.
    pub fn decimal_places(&self) -> usize {
        match &self.0 {
            b"JPY" | b"KRW" => 0,
            _ => 2,
        }
    }

    pub fn symbol(&self) -> Option<&'static str> {
        match &self.0 {
            b"USD" => Some("$"),
            b"EUR" => Some("€"),
            b"GBP" => Some("£"),
            b"JPY" => Some("¥"),
            b"INR" => Some("₹"),
            b"TRY" => Some("₺"),
            b"RUB" => Some("₽"),
            _ => None,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// Currencies offered to users, in display order.
pub const CATALOGUE: &[(CurrencyCode, &str)] = &[
    (CurrencyCode(*b"USD"), "US Dollar"),
    (CurrencyCode(*b"EUR"), "Euro"),
    (CurrencyCode(*b"GBP"), "British Pound Sterling"),
    (CurrencyCode(*b"JPY"), "Japanese Yen"),
    (CurrencyCode(*b"AUD"), "Australian Dollar"),
    (CurrencyCode(*b"CAD"), "Canadian Dollar"),
    (CurrencyCode(*b"CHF"), "Swiss Franc"),
    (CurrencyCode(*b"CNY"), "Chinese Yuan"),
    (CurrencyCode(*b"SEK"), "Swedish Krona"),
    (CurrencyCode(*b"NZD"), "New Zealand Dollar"),
    (CurrencyCode(*b"MXN"), "Mexican Peso"),
    (CurrencyCode(*b"SGD"), "Singapore Dollar"),
    (CurrencyCode(*b"HKD"), "Hong Kong Dollar"),
    (CurrencyCode(*b"NOK"), "Norwegian Krone"),
    (CurrencyCode(*b"INR"), "Indian Rupee"),
    (CurrencyCode(*b"TRY"), "Turkish Lira"),
    (CurrencyCode(*b"RUB"), "Russian Ruble"),
    (CurrencyCode(*b"KRW"), "South Korean Won"),
    (CurrencyCode(*b"BRL"), "Brazilian Real"),
    (CurrencyCode(*b"ZAR"), "South African Rand"),
];

/// Parse a user-entered code and require it to be in the catalogue.
pub fn parse_supported(input: &str) -> Result<CurrencyCode, CurrencyError> {
    let code = CurrencyCode::parse(input)?;
    if !code.is_supported() {
        return Err(CurrencyError::Unsupported(code));
    }
    Ok(code)
}

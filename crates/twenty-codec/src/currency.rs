//! CURRENCY values.
//!
//! The wire stores amounts as integer micros (`amount * 1_000_000`) next to
//! an ISO 4217 code. Some server versions send `amountMicros` as a string, so
//! both forms are accepted; encode always emits a number.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// CURRENCY: `amountMicros`, `currencyCode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    #[serde(default, deserialize_with = "micros")]
    pub amount_micros: Option<i64>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

fn micros<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("amountMicros out of range: {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("amountMicros is not numeric: {s:?}")))
        }
        Some(other) => Err(D::Error::custom(format!(
            "amountMicros must be a number, got {other}"
        ))),
    }
}

impl Currency {
    /// Build from a decimal amount. Micros are rounded half away from zero.
    pub fn from_amount(amount: f64, currency_code: impl Into<String>) -> Self {
        Self {
            amount_micros: Some((amount * MICROS_PER_UNIT as f64).round() as i64),
            currency_code: Some(currency_code.into()),
        }
    }

    pub fn from_micros(amount_micros: i64, currency_code: impl Into<String>) -> Self {
        Self {
            amount_micros: Some(amount_micros),
            currency_code: Some(currency_code.into()),
        }
    }

    /// Decimal amount, `None` when the micros are missing.
    pub fn amount(&self) -> Option<f64> {
        self.amount_micros
            .map(|micros| micros as f64 / MICROS_PER_UNIT as f64)
    }

    pub fn code(&self) -> &str {
        self.currency_code.as_deref().unwrap_or("")
    }

    /// Display symbol for common codes; empty for anything else.
    pub fn symbol(&self) -> &'static str {
        match self.code().to_ascii_uppercase().as_str() {
            "USD" | "CAD" | "AUD" | "NZD" | "MXN" | "SGD" | "HKD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" | "CNY" => "¥",
            "INR" => "₹",
            "KRW" => "₩",
            "CHF" => "CHF",
            "BRL" => "R$",
            "RUB" => "₽",
            _ => "",
        }
    }

    /// `"$1234.50"`, or `"1234.50 XYZ"` when the code has no symbol.
    pub fn format(&self) -> String {
        let Some(amount) = self.amount() else {
            return String::new();
        };
        match self.symbol() {
            "" if self.code().is_empty() => format!("{amount:.2}"),
            "" => format!("{amount:.2} {}", self.code()),
            symbol => format!("{symbol}{amount:.2}"),
        }
    }
}

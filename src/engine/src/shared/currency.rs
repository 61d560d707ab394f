use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyValue {
    pub amount: f64,
    pub currency: Currency,
}

impl CurrencyValue {
    pub fn new(amount: f64, currency: Currency) -> Self {
        CurrencyValue { amount, currency }
    }

    pub fn zero() -> Self {
        CurrencyValue::new(0.0, Currency::Usd)
    }

    /// Parses market values as they appear in player exports: `$0`, `$1,234`,
    /// `€500K`, `$1.2M`, `1.500.000`.
    ///
    /// A `.` is read as a thousands separator when every group after the first
    /// has exactly three digits and no K/M suffix is present, otherwise as a
    /// decimal point. A single dot followed by three digits (`1.500`) fits both
    /// readings; it is parsed as thousands and marked `ambiguous`.
    pub fn parse(text: &str) -> Result<ParsedValue, ValueParseError> {
        let trimmed = text.trim();

        let mut currency = Currency::Usd;
        let mut cleaned = String::with_capacity(trimmed.len());

        for ch in trimmed.chars() {
            match ch {
                '$' => currency = Currency::Usd,
                '€' => currency = Currency::Eur,
                '£' => currency = Currency::Gbp,
                ',' => {}
                c if c.is_whitespace() => {}
                c => cleaned.push(c),
            }
        }

        if cleaned.is_empty()
            || cleaned == "0"
            || cleaned.eq_ignore_ascii_case("n/a")
            || cleaned.eq_ignore_ascii_case("unknown")
        {
            return Ok(ParsedValue::exact(CurrencyValue::new(0.0, currency)));
        }

        let multiplier = match cleaned.chars().last() {
            Some('k') | Some('K') => Some(1_000.0),
            Some('m') | Some('M') => Some(1_000_000.0),
            _ => None,
        };

        if let Some(multiplier) = multiplier {
            cleaned.pop();

            let number: f64 = cleaned
                .parse()
                .map_err(|_| ValueParseError::InvalidNumber(text.to_string()))?;

            if !number.is_finite() {
                return Err(ValueParseError::InvalidNumber(text.to_string()));
            }

            return Ok(ParsedValue::exact(CurrencyValue::new(
                number * multiplier,
                currency,
            )));
        }

        let groups: Vec<&str> = cleaned.split('.').collect();

        let dotted_thousands = groups.len() > 1
            && !groups[0].is_empty()
            && groups[0].chars().all(|c| c.is_ascii_digit())
            && groups[1..]
                .iter()
                .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));

        if dotted_thousands {
            let digits: String = groups.concat();
            let amount: f64 = digits
                .parse()
                .map_err(|_| ValueParseError::InvalidNumber(text.to_string()))?;

            return Ok(ParsedValue {
                value: CurrencyValue::new(amount, currency),
                ambiguous: groups.len() == 2,
            });
        }

        let amount: f64 = cleaned
            .parse()
            .map_err(|_| ValueParseError::InvalidNumber(text.to_string()))?;

        if !amount.is_finite() {
            return Err(ValueParseError::InvalidNumber(text.to_string()));
        }

        Ok(ParsedValue::exact(CurrencyValue::new(amount, currency)))
    }
}

impl Default for CurrencyValue {
    fn default() -> Self {
        CurrencyValue::zero()
    }
}

impl Display for CurrencyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{:.0}", self.currency.symbol(), self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedValue {
    pub value: CurrencyValue,
    /// The text also reads as a decimal number (`1.500` could be 1.5).
    pub ambiguous: bool,
}

impl ParsedValue {
    fn exact(value: CurrencyValue) -> Self {
        ParsedValue {
            value,
            ambiguous: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueParseError {
    #[error("invalid market value: {0:?}")]
    InvalidNumber(String),
}

/// Lenient variant used by loaders: unparseable text counts as zero.
pub fn parse_value(text: &str) -> f64 {
    CurrencyValue::parse(text)
        .map(|parsed| parsed.value.amount)
        .unwrap_or(0.0)
}

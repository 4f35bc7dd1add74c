use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Philippine Peso (2 decimal places)
    PHP,
    /// US Dollar (2 decimal places)
    USD,
    /// Indonesian Rupiah (no decimal places)
    IDR,
}

impl Currency {
    /// Returns the decimal scale for this currency
    /// - PHP/USD: 2 (2 decimal places)
    /// - IDR: 0 (no decimals)
    pub fn scale(&self) -> u32 {
        match self {
            Currency::PHP | Currency::USD => 2,
            Currency::IDR => 0,
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Validates that a decimal value has the correct scale for this currency
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), String> {
        let scale = amount.scale();
        let expected_scale = self.scale();

        if scale > expected_scale {
            return Err(format!(
                "{} amounts must have at most {} decimal places, got {}",
                self, expected_scale, scale
            ));
        }

        if amount < Decimal::ZERO {
            return Err(format!("{} amount cannot be negative", self));
        }

        Ok(())
    }

    /// Returns the smallest unit for this currency
    pub fn smallest_unit(&self) -> Decimal {
        match self {
            Currency::PHP | Currency::USD => Decimal::new(1, 2), // 0.01
            Currency::IDR => Decimal::ONE,
        }
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.scale();
        if scale == 0 {
            format!("{} {}", self, amount.round_dp(0))
        } else {
            format!("{} {:.width$}", self, amount, width = scale as usize)
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::PHP
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::PHP => write!(f, "PHP"),
            Currency::USD => write!(f, "USD"),
            Currency::IDR => write!(f, "IDR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PHP" => Ok(Currency::PHP),
            "USD" => Ok(Currency::USD),
            "IDR" => Ok(Currency::IDR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

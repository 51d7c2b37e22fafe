//! Service configuration
//!
//! Read from the process environment (after `.env` is loaded). Parsing goes
//! through a lookup closure so tests can feed a plain map.

use std::collections::HashMap;
use validator::Validate;

use crate::domain::value_objects::CurrencyFormat;
use crate::{EngineError, Result};

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// What the engine needs to render variants: the gallery placeholder and
/// the money format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySettings {
    pub placeholder_image: String,
    pub currency: CurrencyFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(), currency: CurrencyFormat::default() }
    }
}

#[derive(Clone, Debug, Validate)]
pub struct EngineConfig {
    pub port: u16,
    #[validate(length(min = 1))]
    pub placeholder_image: String,
    #[validate(length(min = 1, max = 8))]
    pub currency_symbol: String,
    #[validate(length(max = 1))]
    pub thousands_separator: String,
    #[validate(length(equal = 1))]
    pub decimal_separator: String,
    #[validate(range(max = 4))]
    pub fraction_digits: u32,
}

impl EngineConfig {
    /// Load `.env`, then read the environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());
        let parse_num = |var: &str, default: &str| -> Result<u64> {
            or_default(var, default).trim().parse::<u64>().map_err(|e| EngineError::Config {
                var: var.to_string(),
                reason: e.to_string(),
            })
        };

        let port = u16::try_from(parse_num("PORT", "8084")?).map_err(|e| EngineError::Config {
            var: "PORT".to_string(),
            reason: e.to_string(),
        })?;
        let fraction_digits = u32::try_from(parse_num("FRACTION_DIGITS", "0")?).map_err(|e| EngineError::Config {
            var: "FRACTION_DIGITS".to_string(),
            reason: e.to_string(),
        })?;

        let config = Self {
            port,
            placeholder_image: or_default("PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE),
            currency_symbol: or_default("CURRENCY_SYMBOL", "$"),
            thousands_separator: or_default("THOUSANDS_SEPARATOR", "."),
            decimal_separator: or_default("DECIMAL_SEPARATOR", ","),
            fraction_digits,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn display(&self) -> DisplaySettings {
        DisplaySettings {
            placeholder_image: self.placeholder_image.clone(),
            currency: CurrencyFormat {
                symbol: self.currency_symbol.clone(),
                thousands_separator: self.thousands_separator.clone(),
                decimal_separator: self.decimal_separator.clone(),
                fraction_digits: self.fraction_digits,
            },
        }
    }
}

use blackjack_strategy::{CardCount, Shoe, StrategyError, TableStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config value: {0}")]
    Value(#[from] serde::de::value::Error),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    #[error("Cannot find home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shoe: ConfigShoe,
    #[serde(default)]
    pub strategy_table: ConfigStrategyTable,
}

/// Relative weights of `A, 2, ..., 9, T`. When `remaining` is given, the shoe
/// is weighted by those card counts instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigShoe {
    #[serde(default = "infinite_shoe_weights")]
    pub weights: Vec<f64>,
    #[serde(default)]
    pub remaining: Option<Vec<u8>>,
}

fn infinite_shoe_weights() -> Vec<f64> {
    vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 4.0]
}

impl Default for ConfigShoe {
    fn default() -> Self {
        ConfigShoe {
            weights: infinite_shoe_weights(),
            remaining: None,
        }
    }
}

impl TryInto<Shoe> for ConfigShoe {
    type Error = StrategyError;

    fn try_into(self) -> Result<Shoe, Self::Error> {
        match self.remaining {
            Some(remaining) => {
                let counts: [u8; 10] = remaining.as_slice().try_into().map_err(|_| {
                    StrategyError::InvalidDistribution(format!(
                        "expected 10 remaining counts, got {}",
                        remaining.len()
                    ))
                })?;
                Shoe::from_card_count(&CardCount::new(&counts))
            }
            None => Shoe::from_weights(&self.weights),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStrategyTable {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub show_deviations: bool,
}

fn default_style() -> String {
    String::from("Boxed")
}

impl Default for ConfigStrategyTable {
    fn default() -> Self {
        ConfigStrategyTable {
            style: default_style(),
            show_deviations: false,
        }
    }
}

impl ConfigStrategyTable {
    pub fn table_style(&self) -> Result<TableStyle, serde::de::value::Error> {
        self.style.parse()
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, DriverError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config_from_str(&file_content)
}

pub fn parse_config_from_str(content: &str) -> Result<Config, DriverError> {
    Ok(serde_yaml::from_str(content)?)
}

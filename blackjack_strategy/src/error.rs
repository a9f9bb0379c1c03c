use thiserror::Error;

use crate::Variable;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Variable {0} not found in provided values")]
    UnboundVariable(Variable),
    #[error("Cannot reduce an empty {0}")]
    EmptyReduction(&'static str),
    #[error("Invalid shoe distribution: {0}")]
    InvalidDistribution(String),
    #[error("Invalid equation key: {0}")]
    InvalidKey(String),
}

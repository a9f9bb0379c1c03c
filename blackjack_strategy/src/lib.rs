pub mod calculation;
mod cardcount;
mod error;
pub mod expression;
pub mod shoe;
pub mod simulation;
pub mod strategy;
mod variables;

pub use blackjack_strategy_macros::ActionExpectation;
pub use calculation::{ActionExpectation, Calculator};
pub use cardcount::{Card, CardCount, HandValue};
pub use error::StrategyError;
pub use expression::{Expression, Operation};
pub use shoe::Shoe;
pub use strategy::{Deviation, StrategyRow, StrategyTable, TableStyle};
pub use variables::{EquationKey, Measure, ValueTable, Variable};

use strum_macros::Display;

/// Highest total a hand can have without busting.
pub const BLACKJACK: u8 = 21;

/// One decision symbol of the strategy grid.
///
/// Hand cells hold `Stand`, `Hit` or `Double`; pair cells hold `Split` or
/// `NoSplit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Decision {
    #[strum(serialize = "S")]
    Stand,
    #[strum(serialize = "H")]
    Hit,
    #[strum(serialize = "D")]
    Double,
    #[strum(serialize = "Y")]
    Split,
    #[strum(serialize = "N")]
    NoSplit,
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{Card, HandValue, StrategyError, BLACKJACK};

/// Which expected value an expectation variable holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measure {
    /// Standing.
    Stand,
    /// Best of hitting and standing.
    HitStand,
    /// Best of doubling, hitting and standing.
    DoubleHitStand,
    /// Best of every action, splitting included.
    Split,
}

impl Measure {
    pub fn prefix(self) -> &'static str {
        match self {
            Measure::Stand => "est",
            Measure::HitStand => "ehi",
            Measure::DoubleHitStand => "edo",
            Measure::Split => "esp",
        }
    }
}

/// A (player hand, dealer up-card) cell, printed as `16_T` or `s18_A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EquationKey {
    pub hand: HandValue,
    pub up_card: Card,
}

impl EquationKey {
    pub fn new(hand: HandValue, up_card: Card) -> Self {
        EquationKey { hand, up_card }
    }

    pub fn hard(total: u8, up_card: Card) -> Self {
        Self::new(HandValue::hard(total), up_card)
    }

    pub fn soft(total: u8, up_card: Card) -> Self {
        Self::new(HandValue::soft(total), up_card)
    }
}

impl fmt::Display for EquationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.hand, self.up_card.symbol())
    }
}

impl FromStr for EquationKey {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StrategyError::InvalidKey(s.to_owned());
        let (hand, up_card) = s.split_once('_').ok_or_else(invalid)?;
        let (soft, total) = match hand.strip_prefix('s') {
            Some(total) => (true, total),
            None => (false, hand),
        };
        let total: u8 = total.parse().map_err(|_| invalid())?;
        let lowest = if soft { 12 } else { 2 };
        if total < lowest || total > BLACKJACK {
            return Err(invalid());
        }
        let up_card: Card = up_card.parse().map_err(|_| invalid())?;
        let hand = HandValue { total, soft };
        Ok(EquationKey { hand, up_card })
    }
}

/// A named quantity an expression can refer to.
///
/// Expectation variables are the edges of the dependency graph between
/// equations: an equation can only be evaluated once every expectation it
/// mentions has been bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// Probability of drawing the card next.
    Probability(Card),
    Expectation(Measure, EquationKey),
}

impl Variable {
    pub fn expectation(measure: Measure, hand: HandValue, up_card: Card) -> Self {
        Variable::Expectation(measure, EquationKey::new(hand, up_card))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Probability(card) => write!(f, "p_{}", card.symbol()),
            Variable::Expectation(measure, key) => write!(f, "{}_{}", measure.prefix(), key),
        }
    }
}

/// Values bound to variables during one solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    values: BTreeMap<Variable, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, variable: Variable, value: f64) {
        self.values.insert(variable, value);
    }

    pub fn get(&self, variable: &Variable) -> Option<f64> {
        self.values.get(variable).copied()
    }

    /// Like `get`, but a missing variable is an error.
    pub fn value(&self, variable: &Variable) -> Result<f64, StrategyError> {
        self.get(variable)
            .ok_or(StrategyError::UnboundVariable(*variable))
    }

    pub fn expectation(&self, measure: Measure, key: EquationKey) -> Result<f64, StrategyError> {
        self.value(&Variable::Expectation(measure, key))
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.values.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &f64)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_names() {
        assert_eq!(Variable::Probability(Card::Ace).to_string(), "p_A");
        assert_eq!(
            Variable::expectation(Measure::Stand, HandValue::hard(17), Card::Ten).to_string(),
            "est_17_T"
        );
        assert_eq!(
            Variable::expectation(Measure::HitStand, HandValue::soft(18), Card::Ace).to_string(),
            "ehi_s18_A"
        );
        assert_eq!(
            Variable::expectation(Measure::Split, HandValue::hard(8), Card::Six).to_string(),
            "esp_8_6"
        );
    }

    #[test]
    fn parse_equation_key() {
        assert_eq!(
            "16_T".parse::<EquationKey>().unwrap(),
            EquationKey::hard(16, Card::Ten)
        );
        assert_eq!(
            "s18_A".parse::<EquationKey>().unwrap(),
            EquationKey::soft(18, Card::Ace)
        );
        assert_eq!(EquationKey::soft(13, Card::Five).to_string(), "s13_5");
    }

    #[test]
    fn reject_invalid_equation_keys() {
        for text in ["16", "22_T", "s11_A", "1_2", "16_X", "x_5", ""] {
            assert_eq!(
                text.parse::<EquationKey>(),
                Err(StrategyError::InvalidKey(text.to_owned())),
                "{}",
                text
            );
        }
    }

    #[test]
    fn missing_value_is_unbound() {
        let mut values = ValueTable::new();
        let p_ace = Variable::Probability(Card::Ace);
        assert_eq!(
            values.value(&p_ace),
            Err(StrategyError::UnboundVariable(p_ace))
        );
        values.bind(p_ace, 0.25);
        assert_eq!(values.value(&p_ace), Ok(0.25));
        assert_eq!(values.len(), 1);
    }
}

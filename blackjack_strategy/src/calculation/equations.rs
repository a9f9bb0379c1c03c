use std::collections::BTreeMap;

use log::debug;
use strum::IntoEnumIterator;

use super::DealerDraws;
use crate::{
    Card, Decision, EquationKey, Expression, HandValue, Measure, StrategyError, Variable,
    BLACKJACK,
};

/// The symbolic stand, hit, double and split equation of every cell: hard
/// totals 2 to 21 and soft totals 12 to 21, against every up-card.
///
/// Equations only mention card probabilities and the expectations of other
/// cells, so one set serves every shoe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquationSet {
    stand: BTreeMap<EquationKey, Expression>,
    hit: BTreeMap<EquationKey, Expression>,
    double: BTreeMap<EquationKey, Expression>,
    split: BTreeMap<EquationKey, Expression>,
}

impl EquationSet {
    pub fn build() -> Result<EquationSet, StrategyError> {
        let mut set = EquationSet::default();
        for up_card in Card::iter() {
            let draws = DealerDraws::enumerate(up_card);
            for total in 2..=BLACKJACK {
                // Hard and soft hands of one total stand the same way.
                let stand = stand_equation(&draws, total)?;
                if total >= 12 {
                    let key = EquationKey::soft(total, up_card);
                    set.stand.insert(key, stand.clone());
                    set.hit.insert(key, soft_hit_equation(total, up_card)?);
                    set.double.insert(key, soft_double_equation(total, up_card)?);
                    set.split.insert(key, soft_split_equation(total, up_card)?);
                }
                let key = EquationKey::hard(total, up_card);
                set.stand.insert(key, stand);
                set.hit.insert(key, hard_hit_equation(total, up_card)?);
                set.double.insert(key, hard_double_equation(total, up_card)?);
                set.split.insert(key, hard_split_equation(total, up_card)?);
            }
        }
        debug!("built {} equations per action", set.stand.len());
        Ok(set)
    }

    /// The equation behind an action in one cell. `NoSplit` has none.
    pub fn equation(&self, decision: Decision, key: &EquationKey) -> Option<&Expression> {
        match decision {
            Decision::Stand => self.stand.get(key),
            Decision::Hit => self.hit.get(key),
            Decision::Double => self.double.get(key),
            Decision::Split => self.split.get(key),
            Decision::NoSplit => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &EquationKey> {
        self.stand.keys()
    }

    pub fn len(&self) -> usize {
        self.stand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stand.is_empty()
    }
}

fn p(card: Card) -> Expression {
    Expression::variable(Variable::Probability(card))
}

fn expectation(measure: Measure, hand: HandValue, up_card: Card) -> Expression {
    Expression::variable(Variable::expectation(measure, hand, up_card))
}

fn ehi(hand: HandValue, up_card: Card) -> Expression {
    expectation(Measure::HitStand, hand, up_card)
}

fn est(hand: HandValue, up_card: Card) -> Expression {
    expectation(Measure::Stand, hand, up_card)
}

fn weighted(weight: f64, card: Card) -> Expression {
    Expression::constant(weight) * p(card)
}

/// Divides by the probability that the hole card is not the blackjack card.
fn exclude_hole_card(expression: Expression, up_card: Card) -> Expression {
    match DealerDraws::excluded_hole_card(up_card) {
        Some(card) => expression / (Expression::constant(1.0) - p(card)),
        None => expression,
    }
}

fn stand_equation(draws: &DealerDraws, total: u8) -> Result<Expression, StrategyError> {
    let terms = draws
        .outcome_weights(total)
        .iter()
        .map(|(drawn, weight)| -> Result<Expression, StrategyError> {
            let probability = Expression::product(drawn.cards().map(p).collect())?;
            Ok(Expression::constant(*weight as f64) * probability)
        })
        .collect::<Result<Vec<_>, StrategyError>>()?;
    Ok(exclude_hole_card(Expression::sum(terms)?, draws.up_card()))
}

fn hard_hit_equation(total: u8, up_card: Card) -> Result<Expression, StrategyError> {
    let terms = Card::iter()
        .map(|card| {
            let next = total + card.value(true);
            match card {
                Card::Ace if next == 32 => weighted(-1.0, card),
                Card::Ace if next > BLACKJACK => p(card) * ehi(HandValue::hard(total + 1), up_card),
                Card::Ace => p(card) * ehi(HandValue::soft(next), up_card),
                _ if next > BLACKJACK => weighted(-1.0, card),
                _ => p(card) * ehi(HandValue::hard(next), up_card),
            }
        })
        .collect();
    Expression::sum(terms)
}

fn soft_hit_equation(total: u8, up_card: Card) -> Result<Expression, StrategyError> {
    let terms = Card::iter()
        .map(|card| {
            let next = total + card.value(false);
            if next > BLACKJACK {
                p(card) * ehi(HandValue::hard(next - 10), up_card)
            } else {
                p(card) * ehi(HandValue::soft(next), up_card)
            }
        })
        .collect();
    Expression::sum(terms)
}

fn hard_double_equation(total: u8, up_card: Card) -> Result<Expression, StrategyError> {
    let terms = Card::iter()
        .map(|card| {
            let mut next = total + card.value(true);
            if card == Card::Ace && next > BLACKJACK {
                next -= 10;
            }
            if next > BLACKJACK {
                weighted(-2.0, card)
            } else {
                weighted(2.0, card) * est(HandValue::hard(next), up_card)
            }
        })
        .collect();
    Expression::sum(terms)
}

fn soft_double_equation(total: u8, up_card: Card) -> Result<Expression, StrategyError> {
    let terms = Card::iter()
        .map(|card| {
            let next = total + card.value(false);
            if next > BLACKJACK {
                weighted(2.0, card) * est(HandValue::hard(next - 10), up_card)
            } else {
                weighted(2.0, card) * est(HandValue::soft(next), up_card)
            }
        })
        .collect();
    Expression::sum(terms)
}

/// Each of the two hands gets a second card other than the pair card, so the
/// sum is renormalised by the probability of drawing anything else.
fn split_equation(terms: Vec<Expression>, pair_card: Card) -> Result<Expression, StrategyError> {
    Ok((Expression::sum(terms)? * Expression::constant(2.0))
        / (Expression::constant(1.0) - p(pair_card)))
}

fn hard_split_equation(total: u8, up_card: Card) -> Result<Expression, StrategyError> {
    if total % 2 == 1 {
        return Ok(Expression::constant(0.0));
    }
    let half = total / 2;
    let pair_card = Card::from_value(half)
        .ok_or_else(|| StrategyError::InvalidKey(EquationKey::hard(total, up_card).to_string()))?;
    let terms = Card::iter()
        .filter(|card| card.value(false) != half)
        .map(|card| match card {
            Card::Ace => p(card) * ehi(HandValue::soft(half + 11), up_card),
            _ => p(card) * ehi(HandValue::hard(half + card.value(false)), up_card),
        })
        .collect();
    split_equation(terms, pair_card)
}

/// Only A/A splits among the soft hands.
fn soft_split_equation(total: u8, up_card: Card) -> Result<Expression, StrategyError> {
    if total != 12 {
        return Ok(Expression::constant(0.0));
    }
    let terms = Card::iter()
        .filter(|card| *card != Card::Ace)
        .map(|card| p(card) * ehi(HandValue::soft(11 + card.value(false)), up_card))
        .collect();
    split_equation(terms, Card::Ace)
}

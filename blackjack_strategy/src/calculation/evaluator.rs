use log::debug;
use strum::IntoEnumIterator;

use super::{ActionExpectation, DealerDraws, EquationSet, HandExpectation, PairExpectation};
use crate::{
    Card, Decision, EquationKey, HandValue, Measure, Shoe, StrategyError, ValueTable, Variable,
    BLACKJACK,
};

/// Evaluates the equation set against a shoe.
///
/// Every equation only refers to cells with a higher total, or to hard cells
/// once soft totals are reached, so the cells are solved in this order: hard 21
/// down to 12, soft 21 down to 12, hard 11 down to 3, then the pairs.
///
/// Fails with `InvalidDistribution` when the shoe holds nothing but a
/// blackjack hole card, since no hand against that up-card can be dealt.
pub fn solve(equations: &EquationSet, shoe: &Shoe) -> Result<ValueTable, StrategyError> {
    for up_card in Card::iter() {
        if let Some(excluded) = DealerDraws::excluded_hole_card(up_card) {
            shoe.without(excluded)?;
        }
    }

    let mut values = ValueTable::new();
    for (card, probability) in shoe.odds() {
        values.bind(Variable::Probability(card), probability);
    }

    for total in (12..=BLACKJACK).rev() {
        solve_hands(equations, HandValue::hard(total), &mut values)?;
    }
    debug!("solved hard totals 21 to 12");
    for total in (12..=BLACKJACK).rev() {
        solve_hands(equations, HandValue::soft(total), &mut values)?;
    }
    debug!("solved soft totals");
    for total in (3..=11).rev() {
        solve_hands(equations, HandValue::hard(total), &mut values)?;
    }
    debug!("solved hard totals 11 to 3");

    for total in (4..=20).step_by(2) {
        solve_pairs(equations, HandValue::hard(total), &mut values)?;
    }
    solve_pairs(equations, HandValue::soft(12), &mut values)?;
    debug!("solved {} values", values.len());

    Ok(values)
}

fn evaluate(
    equations: &EquationSet,
    decision: Decision,
    key: &EquationKey,
    values: &ValueTable,
) -> Result<f64, StrategyError> {
    let value = equations
        .equation(decision, key)
        .ok_or_else(|| StrategyError::InvalidKey(key.to_string()))?
        .evaluate(values)?;
    if !value.is_finite() {
        return Err(StrategyError::InvalidDistribution(format!(
            "{} of {} is {}",
            decision, key, value
        )));
    }
    Ok(value)
}

fn solve_hands(
    equations: &EquationSet,
    hand: HandValue,
    values: &mut ValueTable,
) -> Result<(), StrategyError> {
    for up_card in Card::iter() {
        let key = EquationKey::new(hand, up_card);
        let mut ex = HandExpectation::default();

        ex.set_stand(evaluate(equations, Decision::Stand, &key, values)?);
        values.bind(Variable::Expectation(Measure::Stand, key), ex.stand());

        ex.set_hit(evaluate(equations, Decision::Hit, &key, values)?);
        values.bind(
            Variable::Expectation(Measure::HitStand, key),
            ex.get_max_expectation().0,
        );

        ex.set_double(evaluate(equations, Decision::Double, &key, values)?);
        values.bind(
            Variable::Expectation(Measure::DoubleHitStand, key),
            ex.get_max_expectation().0,
        );
    }
    Ok(())
}

fn solve_pairs(
    equations: &EquationSet,
    hand: HandValue,
    values: &mut ValueTable,
) -> Result<(), StrategyError> {
    for up_card in Card::iter() {
        let key = EquationKey::new(hand, up_card);
        let mut ex = PairExpectation::default();
        ex.set_double(values.expectation(Measure::DoubleHitStand, key)?);
        ex.set_split(evaluate(equations, Decision::Split, &key, values)?);
        values.bind(
            Variable::Expectation(Measure::Split, key),
            ex.get_max_expectation().0,
        );
    }
    Ok(())
}

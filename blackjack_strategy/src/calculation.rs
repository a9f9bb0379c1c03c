pub mod dealer_outcomes;
pub mod equations;
pub mod evaluator;

use blackjack_strategy_macros::ActionExpectation as DeriveActionExpectation;

pub use dealer_outcomes::{dealer_outcomes, DealerDraws, DealerLeaf};
pub use equations::EquationSet;
pub use evaluator::solve;

use crate::{Decision, Shoe, StrategyError, StrategyTable, ValueTable};

/// Expectations of the actions available in one cell of the grid.
///
/// Derive it with `#[derive(ActionExpectation)]` on a struct whose fields are
/// named after the actions it offers.
pub trait ActionExpectation {
    fn stand(&self) -> f64;
    fn hit(&self) -> f64;
    fn double(&self) -> f64;
    fn split(&self) -> f64;
    fn set_stand(&mut self, val: f64);
    fn set_hit(&mut self, val: f64);
    fn set_double(&mut self, val: f64);
    fn set_split(&mut self, val: f64);

    /// The best expectation and its action. An action only replaces an earlier
    /// one when it is strictly better, so ties resolve to stand, hit, double,
    /// then split.
    fn get_max_expectation(&self) -> (f64, Decision) {
        let mut max_ex = self.stand();
        let mut max_decision = Decision::Stand;
        if max_ex < self.hit() {
            max_ex = self.hit();
            max_decision = Decision::Hit;
        }
        if max_ex < self.double() {
            max_ex = self.double();
            max_decision = Decision::Double;
        }
        if max_ex < self.split() {
            max_ex = self.split();
            max_decision = Decision::Split;
        }
        (max_ex, max_decision)
    }
}

/// Stand, hit and double expectations of a hand against one up-card.
#[derive(Debug, Clone, PartialEq, DeriveActionExpectation)]
pub struct HandExpectation {
    pub stand: f64,
    pub hit: f64,
    pub double: f64,
}

/// A pair against one up-card: `double` holds the best of playing it as a
/// single hand, `split` the expectation of splitting it.
#[derive(Debug, Clone, PartialEq, DeriveActionExpectation)]
pub struct PairExpectation {
    pub double: f64,
    pub split: f64,
}

/// Owns the equations, which depend on no shoe, and solves them for any number
/// of shoes.
#[derive(Debug, Clone)]
pub struct Calculator {
    equations: EquationSet,
}

impl Calculator {
    pub fn new() -> Result<Calculator, StrategyError> {
        Ok(Calculator {
            equations: EquationSet::build()?,
        })
    }

    pub fn equations(&self) -> &EquationSet {
        &self.equations
    }

    pub fn solve(&self, shoe: &Shoe) -> Result<ValueTable, StrategyError> {
        solve(&self.equations, shoe)
    }

    pub fn strategy_table(&self, shoe: &Shoe) -> Result<StrategyTable, StrategyError> {
        StrategyTable::from_values(&self.solve(shoe)?)
    }

    /// The basic strategy of the infinite shoe.
    pub fn baseline(&self) -> Result<StrategyTable, StrategyError> {
        self.strategy_table(&Shoe::infinite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, EquationKey, Measure};

    #[test]
    fn ties_prefer_earlier_actions() {
        let mut ex = HandExpectation::default();
        assert_eq!(ex.get_max_expectation(), (-f64::INFINITY, Decision::Stand));

        ex.set_stand(-0.5);
        ex.set_hit(-0.5);
        assert_eq!(ex.get_max_expectation(), (-0.5, Decision::Stand));

        ex.set_hit(-0.25);
        ex.set_double(-0.25);
        assert_eq!(ex.get_max_expectation(), (-0.25, Decision::Hit));

        ex.set_double(0.1);
        assert_eq!(ex.get_max_expectation(), (0.1, Decision::Double));
        assert_eq!(ex.split(), -f64::INFINITY);
    }

    #[test]
    fn pair_expectation() {
        let mut ex = PairExpectation::default();
        ex.set_double(0.2);
        ex.set_split(0.2);
        assert_eq!(ex.get_max_expectation(), (0.2, Decision::Double));
        ex.set_split(0.3);
        assert_eq!(ex.get_max_expectation(), (0.3, Decision::Split));
        assert_eq!(ex.stand(), -f64::INFINITY);
        assert_eq!(ex.hit(), -f64::INFINITY);
    }

    #[test]
    #[should_panic]
    fn hand_cannot_split() {
        let mut ex = HandExpectation::default();
        ex.set_split(0.0);
    }

    #[test]
    fn calculator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Calculator>();
    }

    #[test]
    fn calculator_reuses_equations() {
        let calculator = Calculator::new().unwrap();
        let infinite = calculator.solve(&Shoe::infinite()).unwrap();
        let again = calculator.solve(&Shoe::default()).unwrap();
        assert_eq!(infinite, again);

        let ten_rich = Shoe::new([1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 8.0]).unwrap();
        let rich = calculator.solve(&ten_rich).unwrap();
        let key = EquationKey::hard(20, Card::Six);
        assert!(
            rich.expectation(Measure::Stand, key).unwrap()
                > infinite.expectation(Measure::Stand, key).unwrap()
        );
    }
}

use blackjack_strategy::calculation::EquationSet;
use blackjack_strategy::simulation::simulate_stand_expectation;
use blackjack_strategy::{
    Card, Decision, Deviation, EquationKey, Measure, Shoe, StrategyError, ValueTable, Variable,
};
use rand::Rng;
use strum::IntoEnumIterator;

const ACTIONS: [(Decision, &str); 4] = [
    (Decision::Stand, "stand"),
    (Decision::Hit, "hit"),
    (Decision::Double, "double"),
    (Decision::Split, "split"),
];

const MEASURES: [Measure; 4] = [
    Measure::Stand,
    Measure::HitStand,
    Measure::DoubleHitStand,
    Measure::Split,
];

/// The equations of one cell followed by its solved values.
pub fn explain(
    equations: &EquationSet,
    values: &ValueTable,
    key: &EquationKey,
) -> Result<String, StrategyError> {
    let mut report = String::new();
    for (decision, name) in ACTIONS {
        let equation = equations
            .equation(decision, key)
            .ok_or_else(|| StrategyError::InvalidKey(key.to_string()))?;
        report.push_str(&format!("{} {} = {}\n", name, key, equation.render()));
    }
    for measure in MEASURES {
        let variable = Variable::Expectation(measure, *key);
        match values.get(&variable) {
            Some(value) => report.push_str(&format!("{} = {:.6}\n", variable, value)),
            None => report.push_str(&format!("{} is not solved\n", variable)),
        }
    }
    Ok(report)
}

/// Exact and simulated stand expectations of `player_total` against every
/// up-card.
pub fn simulate<R: Rng + ?Sized>(
    shoe: &Shoe,
    values: &ValueTable,
    player_total: u8,
    hands: u32,
    rng: &mut R,
) -> Result<String, StrategyError> {
    let mut report = format!("{:<4}{:>10}{:>11}\n", "D", "exact", "simulated");
    for up_card in Card::iter() {
        let exact = values.expectation(Measure::Stand, EquationKey::hard(player_total, up_card))?;
        let simulated = simulate_stand_expectation(shoe, player_total, up_card, hands, rng)?;
        report.push_str(&format!(
            "{:<4}{:>10.4}{:>11.4}\n",
            up_card.symbol(),
            exact,
            simulated
        ));
    }
    Ok(report)
}

pub fn deviations(deviations: &[Deviation]) -> String {
    if deviations.is_empty() {
        return String::from("No deviations from the infinite shoe\n");
    }
    let mut report = format!("{} deviations from the infinite shoe:\n", deviations.len());
    for deviation in deviations {
        report.push_str(&format!("  {}\n", deviation));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_strategy::Calculator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn explain_lists_equations_and_values() {
        let calculator = Calculator::new().unwrap();
        let values = calculator.solve(&Shoe::infinite()).unwrap();
        let key: EquationKey = "16_T".parse().unwrap();
        let report = explain(calculator.equations(), &values, &key).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("stand 16_T = "));
        assert!(lines[3].starts_with("split 16_T = "));
        assert_eq!(lines[4], "est_16_T = -0.540430");
        assert_eq!(lines[7], "esp_16_T = -0.450342");
    }

    #[test]
    fn explain_unsolved_cell() {
        let calculator = Calculator::new().unwrap();
        let values = calculator.solve(&Shoe::infinite()).unwrap();
        let report = explain(calculator.equations(), &values, &EquationKey::hard(17, Card::Two))
            .unwrap();
        assert!(report.ends_with("esp_17_2 is not solved\n"));
    }

    #[test]
    fn simulate_every_up_card() {
        let calculator = Calculator::new().unwrap();
        let shoe = Shoe::infinite();
        let values = calculator.solve(&shoe).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let report = simulate(&shoe, &values, 18, 1_000, &mut rng).unwrap();
        assert_eq!(report.lines().count(), 11);
        assert!(report.lines().nth(1).unwrap().starts_with("A "));

        assert!(matches!(
            simulate(&shoe, &values, 25, 10, &mut rng),
            Err(StrategyError::UnboundVariable(_))
        ));
    }

    #[test]
    fn deviation_report() {
        assert_eq!(deviations(&[]), "No deviations from the infinite shoe\n");
        let report = deviations(&[Deviation {
            label: String::from("16"),
            up_card: Card::Ten,
            baseline: Decision::Hit,
            current: Decision::Stand,
        }]);
        assert_eq!(report, "1 deviations from the infinite shoe:\n  16 vs T: H -> S\n");
    }
}

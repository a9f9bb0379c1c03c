use std::fmt;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum::IntoEnumIterator;

use crate::calculation::{ActionExpectation, HandExpectation, PairExpectation};
use crate::{Card, Decision, EquationKey, HandValue, Measure, StrategyError, ValueTable, BLACKJACK};

/// How `StrategyTable::render` lays the grid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum TableStyle {
    /// Bordered cells.
    Boxed,
    /// Label then space separated symbols.
    Plain,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle::Boxed
    }
}

/// One line of the grid: a decision per up-card, in card order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRow {
    pub label: String,
    pub decisions: [Decision; 10],
}

impl StrategyRow {
    pub fn decision(&self, up_card: Card) -> Decision {
        self.decisions[up_card.index()]
    }
}

/// A cell whose decision differs from the baseline table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deviation {
    pub label: String,
    pub up_card: Card,
    pub baseline: Decision,
    pub current: Decision,
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {}: {} -> {}",
            self.label,
            self.up_card.symbol(),
            self.baseline,
            self.current
        )
    }
}

/// The decision grid: hard 21 down to 3, soft 21 down to 13, then the pairs
/// A/A and 2/2 up to T/T.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTable {
    rows: Vec<StrategyRow>,
}

impl StrategyTable {
    pub fn from_values(values: &ValueTable) -> Result<StrategyTable, StrategyError> {
        let mut rows = Vec::with_capacity(38);
        for total in (3..=BLACKJACK).rev() {
            rows.push(hand_row(values, HandValue::hard(total))?);
        }
        for total in (13..=BLACKJACK).rev() {
            rows.push(hand_row(values, HandValue::soft(total))?);
        }
        for card in Card::iter() {
            let hand = match card {
                Card::Ace => HandValue::soft(12),
                _ => HandValue::hard(card.value(false) * 2),
            };
            let label = format!("{}/{}", card.symbol(), card.symbol());
            rows.push(pair_row(values, label, hand)?);
        }
        Ok(StrategyTable { rows })
    }

    pub fn rows(&self) -> &[StrategyRow] {
        &self.rows
    }

    pub fn row(&self, label: &str) -> Option<&StrategyRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    pub fn decision(&self, label: &str, up_card: Card) -> Option<Decision> {
        self.row(label).map(|row| row.decision(up_card))
    }

    /// Every cell that differs from `baseline`, in row then column order.
    pub fn deviations(&self, baseline: &StrategyTable) -> Vec<Deviation> {
        let mut deviations = Vec::new();
        for (row, baseline_row) in self.rows.iter().zip(&baseline.rows) {
            for up_card in Card::iter() {
                let current = row.decision(up_card);
                let baseline = baseline_row.decision(up_card);
                if current != baseline {
                    deviations.push(Deviation {
                        label: row.label.clone(),
                        up_card,
                        baseline,
                        current,
                    });
                }
            }
        }
        deviations
    }

    pub fn render(&self, style: TableStyle) -> String {
        match style {
            TableStyle::Boxed => self.render_boxed(),
            TableStyle::Plain => self.render_plain(),
        }
    }

    fn lines(&self) -> Vec<Vec<String>> {
        let header: Vec<String> = std::iter::once(String::from("P"))
            .chain(Card::iter().map(|card| card.symbol().to_string()))
            .collect();
        let body = self.rows.iter().map(|row| -> Vec<String> {
            std::iter::once(row.label.clone())
                .chain(row.decisions.iter().map(Decision::to_string))
                .collect()
        });
        std::iter::once(header).chain(body).collect()
    }

    fn render_boxed(&self) -> String {
        let lines = self.lines();
        let mut widths = vec![0; lines[0].len()];
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.len());
            }
        }
        let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        let separator = format!("+{}+\n", separator.join("+"));
        let format_line = |line: &Vec<String>| {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect();
            format!("|{}|\n", cells.join("|"))
        };

        let mut rendered = separator.clone();
        rendered.push_str(&format_line(&lines[0]));
        rendered.push_str(&separator);
        for line in &lines[1..] {
            rendered.push_str(&format_line(line));
        }
        rendered.push_str(&separator);
        rendered
    }

    fn render_plain(&self) -> String {
        let mut rendered = String::new();
        for line in self.lines() {
            rendered.push_str(&format!("{:<4}{}\n", line[0], line[1..].join(" ")));
        }
        rendered
    }
}

fn hand_row(values: &ValueTable, hand: HandValue) -> Result<StrategyRow, StrategyError> {
    let mut decisions = [Decision::Stand; 10];
    for up_card in Card::iter() {
        let key = EquationKey::new(hand, up_card);
        let ex = HandExpectation {
            stand: values.expectation(Measure::Stand, key)?,
            hit: values.expectation(Measure::HitStand, key)?,
            double: values.expectation(Measure::DoubleHitStand, key)?,
        };
        decisions[up_card.index()] = ex.get_max_expectation().1;
    }
    Ok(StrategyRow {
        label: hand.to_string(),
        decisions,
    })
}

fn pair_row(
    values: &ValueTable,
    label: String,
    hand: HandValue,
) -> Result<StrategyRow, StrategyError> {
    let mut decisions = [Decision::NoSplit; 10];
    for up_card in Card::iter() {
        let key = EquationKey::new(hand, up_card);
        let ex = PairExpectation {
            double: values.expectation(Measure::DoubleHitStand, key)?,
            split: values.expectation(Measure::Split, key)?,
        };
        if ex.get_max_expectation().1 == Decision::Split {
            decisions[up_card.index()] = Decision::Split;
        }
    }
    Ok(StrategyRow { label, decisions })
}

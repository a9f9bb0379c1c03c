use rand::Rng;
use strum::IntoEnumIterator;

use crate::{Card, CardCount, StrategyError};

/// Ace and 2 to 9 once each, and the four ten-valued ranks.
const INFINITE_SHOE_WEIGHTS: [f64; 10] = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 4.0];

/// The distribution of the next card, as relative weights per denomination.
///
/// Draws never deplete the shoe, so the probabilities stay constant for a
/// whole solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Shoe {
    weights: [f64; 10],
    total: f64,
}

impl Shoe {
    /// Fails unless every weight is finite and non-negative and at least one
    /// weight is positive.
    pub fn new(weights: [f64; 10]) -> Result<Shoe, StrategyError> {
        for card in Card::iter() {
            let weight = weights[card.index()];
            if !weight.is_finite() || weight < 0.0 {
                return Err(StrategyError::InvalidDistribution(format!(
                    "weight of {} is {}",
                    card.symbol(),
                    weight
                )));
            }
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(StrategyError::InvalidDistribution(String::from(
                "weights must sum to a positive value",
            )));
        }
        Ok(Shoe { weights, total })
    }

    /// Same as `new`, for weights given in card order `A, 2, ..., 9, T`.
    pub fn from_weights(weights: &[f64]) -> Result<Shoe, StrategyError> {
        let weights: [f64; 10] = weights.try_into().map_err(|_| {
            StrategyError::InvalidDistribution(format!(
                "expected 10 weights, got {}",
                weights.len()
            ))
        })?;
        Self::new(weights)
    }

    /// A shoe weighted by the cards remaining in a finite shoe.
    pub fn from_card_count(cards: &CardCount) -> Result<Shoe, StrategyError> {
        let mut weights = [0.0; 10];
        for card in Card::iter() {
            weights[card.index()] = cards[card] as f64;
        }
        Self::new(weights)
    }

    /// The same shoe with `card` removed. Fails when nothing else is left.
    pub fn without(&self, card: Card) -> Result<Shoe, StrategyError> {
        let mut weights = self.weights;
        weights[card.index()] = 0.0;
        Self::new(weights)
    }

    pub fn infinite() -> Shoe {
        Shoe {
            weights: INFINITE_SHOE_WEIGHTS,
            total: INFINITE_SHOE_WEIGHTS.iter().sum(),
        }
    }

    pub fn weight(&self, card: Card) -> f64 {
        self.weights[card.index()]
    }

    pub fn probability(&self, card: Card) -> f64 {
        self.weight(card) / self.total
    }

    /// Every card with its probability, in card order.
    pub fn odds(&self) -> impl Iterator<Item = (Card, f64)> + '_ {
        Card::iter().map(move |card| (card, self.probability(card)))
    }

    /// Draws a card with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Card {
        let target = rng.gen::<f64>() * self.total;
        let mut cumulative = 0.0;
        let mut last_drawable = Card::Ace;
        for card in Card::iter() {
            let weight = self.weight(card);
            if weight == 0.0 {
                continue;
            }
            cumulative += weight;
            last_drawable = card;
            if target < cumulative {
                return card;
            }
        }
        // Only reachable through rounding at the very top of the range.
        last_drawable
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Shoe::infinite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn infinite_shoe_probabilities() {
        let shoe = Shoe::infinite();
        assert!((shoe.probability(Card::Ten) - 4.0 / 13.0).abs() < 1e-15);
        assert!((shoe.probability(Card::Ace) - 1.0 / 13.0).abs() < 1e-15);
        let total: f64 = shoe.odds().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn one_deck_matches_infinite_shoe() {
        let one_deck = CardCount::new(&[4, 4, 4, 4, 4, 4, 4, 4, 4, 16]);
        let shoe = Shoe::from_card_count(&one_deck).unwrap();
        for card in Card::iter() {
            assert!((shoe.probability(card) - Shoe::infinite().probability(card)).abs() < 1e-15);
        }
    }

    #[test]
    fn invalid_distributions() {
        assert!(matches!(
            Shoe::new([0.0; 10]),
            Err(StrategyError::InvalidDistribution(_))
        ));

        let mut negative = INFINITE_SHOE_WEIGHTS;
        negative[3] = -1.0;
        assert!(matches!(
            Shoe::new(negative),
            Err(StrategyError::InvalidDistribution(_))
        ));

        let mut not_a_number = INFINITE_SHOE_WEIGHTS;
        not_a_number[0] = f64::NAN;
        assert!(Shoe::new(not_a_number).is_err());

        assert!(matches!(
            Shoe::from_weights(&[1.0, 2.0]),
            Err(StrategyError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn draws_follow_weights() {
        let mut weights = INFINITE_SHOE_WEIGHTS;
        weights[Card::Five.index()] = 0.0;
        let shoe = Shoe::new(weights).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let draws = 24_000;
        let mut tens = 0;
        for _ in 0..draws {
            let card = shoe.draw(&mut rng);
            assert_ne!(card, Card::Five);
            if card == Card::Ten {
                tens += 1;
            }
        }
        let frequency = tens as f64 / draws as f64;
        assert!((frequency - shoe.probability(Card::Ten)).abs() < 0.02);
    }
}

use std::cmp::Ordering;

use rand::Rng;

use crate::calculation::DealerDraws;
use crate::{Card, CardCount, HandValue, Shoe, StrategyError};

/// Plays one dealer hand from `up_card`, drawing with replacement.
///
/// The dealer has already checked for blackjack, so the hole card is drawn
/// from the shoe without the card that would complete one.
pub fn play_dealer<R: Rng + ?Sized>(
    shoe: &Shoe,
    up_card: Card,
    rng: &mut R,
) -> Result<HandValue, StrategyError> {
    let mut hand = CardCount::default();
    hand.add_card(up_card);
    let hole_card = match DealerDraws::excluded_hole_card(up_card) {
        Some(excluded) => shoe.without(excluded)?.draw(rng),
        None => shoe.draw(rng),
    };
    hand.add_card(hole_card);

    while hand.hand_value().dealer_should_draw() {
        hand.add_card(shoe.draw(rng));
    }
    Ok(hand.hand_value())
}

/// Monte Carlo estimate of standing on `player_total` against `up_card`: the
/// mean of +1 for a win, -1 for a loss and 0 for a push over `hands` hands.
/// Zero hands estimate 0.
pub fn simulate_stand_expectation<R: Rng + ?Sized>(
    shoe: &Shoe,
    player_total: u8,
    up_card: Card,
    hands: u32,
    rng: &mut R,
) -> Result<f64, StrategyError> {
    if hands == 0 {
        return Ok(0.0);
    }
    let mut net: i64 = 0;
    for _ in 0..hands {
        let dealer = play_dealer(shoe, up_card, rng)?;
        if dealer.is_bust() {
            net += 1;
            continue;
        }
        match player_total.cmp(&dealer.total) {
            Ordering::Greater => net += 1,
            Ordering::Less => net -= 1,
            Ordering::Equal => {}
        }
    }
    Ok(net as f64 / hands as f64)
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::trace;
use strum::IntoEnumIterator;

use crate::{Card, CardCount, HandValue};

/// How the dealer finishes after drawing one multiset of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerLeaf {
    /// Number of draw orders reaching this multiset.
    pub orderings: u32,
    /// The dealer's final hand, up-card included.
    pub value: HandValue,
}

/// Every way the dealer can finish from one up-card when drawing with
/// replacement, keyed by the multiset of drawn cards.
///
/// A single walk serves every player total.
#[derive(Debug, Clone)]
pub struct DealerDraws {
    up_card: Card,
    leaves: BTreeMap<CardCount, DealerLeaf>,
}

impl DealerDraws {
    pub fn enumerate(up_card: Card) -> DealerDraws {
        let mut leaves = BTreeMap::new();
        let mut drawn = CardCount::default();
        let mut visits = 0;
        walk_dealer_draws(
            up_card,
            Self::excluded_hole_card(up_card),
            &mut drawn,
            &mut leaves,
            &mut visits,
        );
        trace!(
            "dealer {}: {} draw sequences, {} final multisets",
            up_card.symbol(),
            visits,
            leaves.len()
        );
        DealerDraws { up_card, leaves }
    }

    /// The hole card that would complete a dealer blackjack. Those hands are
    /// settled before the player acts, so the first draw never takes it.
    pub fn excluded_hole_card(up_card: Card) -> Option<Card> {
        match up_card {
            Card::Ace => Some(Card::Ten),
            Card::Ten => Some(Card::Ace),
            _ => None,
        }
    }

    pub fn up_card(&self) -> Card {
        self.up_card
    }

    pub fn leaves(&self) -> impl Iterator<Item = (&CardCount, &DealerLeaf)> {
        self.leaves.iter()
    }

    pub fn leaf(&self, drawn: &CardCount) -> Option<&DealerLeaf> {
        self.leaves.get(drawn)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Net result for a player standing on `player_total`, per drawn multiset:
    /// +1 for every ordering the player wins and -1 for every ordering the
    /// dealer wins. Multisets that only push are left out.
    pub fn outcome_weights(&self, player_total: u8) -> BTreeMap<CardCount, i32> {
        self.leaves
            .iter()
            .filter_map(|(drawn, leaf)| {
                let weight = outcome_sign(player_total, leaf.value) * leaf.orderings as i32;
                (weight != 0).then_some((*drawn, weight))
            })
            .collect()
    }
}

/// Shorthand for one player total against one up-card.
pub fn dealer_outcomes(up_card: Card, player_total: u8) -> BTreeMap<CardCount, i32> {
    DealerDraws::enumerate(up_card).outcome_weights(player_total)
}

fn walk_dealer_draws(
    up_card: Card,
    excluded: Option<Card>,
    drawn: &mut CardCount,
    leaves: &mut BTreeMap<CardCount, DealerLeaf>,
    visits: &mut u64,
) {
    *visits += 1;
    let hard_sum = drawn.get_sum() + up_card.value(false) as u16;
    let value = HandValue::from_hard_sum(hard_sum, drawn.has_ace() || up_card == Card::Ace);
    if !value.dealer_should_draw() {
        leaves
            .entry(*drawn)
            .or_insert(DealerLeaf {
                orderings: 0,
                value,
            })
            .orderings += 1;
        return;
    }

    for card in Card::iter() {
        if excluded == Some(card) {
            continue;
        }
        drawn.add_card(card);
        walk_dealer_draws(up_card, None, drawn, leaves, visits);
        drawn.remove_card(card);
    }
}

fn outcome_sign(player_total: u8, dealer: HandValue) -> i32 {
    if dealer.is_bust() {
        return 1;
    }
    match player_total.cmp(&dealer.total) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

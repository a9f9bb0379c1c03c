use std::fmt;
use std::ops::Index;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::BLACKJACK;

const SYMBOLS: [char; 10] = ['A', '2', '3', '4', '5', '6', '7', '8', '9', 'T'];

/// A card denomination. `Ten` stands for 10, J, Q and K alike.
///
/// The declaration order is the column order of every strategy grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum Card {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "T")]
    Ten,
}

impl Card {
    /// Blackjack value of the card. An Ace is 11 only when `can_be_soft`.
    pub fn value(self, can_be_soft: bool) -> u8 {
        match self {
            Card::Ace => {
                if can_be_soft {
                    11
                } else {
                    1
                }
            }
            Card::Ten => 10,
            card => card as u8 + 1,
        }
    }

    pub fn symbol(self) -> char {
        SYMBOLS[self.index()]
    }

    /// Finds the card whose hard value is `value`, if any.
    pub fn from_value(value: u8) -> Option<Card> {
        Card::iter().find(|card| card.value(false) == value)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// The value of a hand: its best total and whether an Ace is counted as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue {
    pub total: u8,
    pub soft: bool,
}

impl HandValue {
    pub const fn hard(total: u8) -> Self {
        HandValue { total, soft: false }
    }

    pub const fn soft(total: u8) -> Self {
        HandValue { total, soft: true }
    }

    /// Counts at most one Ace as 11, and only while that does not bust the hand.
    pub fn from_hard_sum(hard_sum: u16, has_ace: bool) -> Self {
        if has_ace && hard_sum + 10 <= BLACKJACK as u16 {
            HandValue::soft((hard_sum + 10) as u8)
        } else {
            HandValue::hard(u8::try_from(hard_sum).unwrap_or(u8::MAX))
        }
    }

    pub fn is_bust(&self) -> bool {
        self.total > BLACKJACK
    }

    /// The house rule: the dealer draws below 17 and hits soft 17.
    pub fn dealer_should_draw(&self) -> bool {
        self.total < 17 || (self.soft && self.total < 18)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.soft {
            write!(f, "s{}", self.total)
        } else {
            write!(f, "{}", self.total)
        }
    }
}

/// The numbers of each card denomination in a group of cards.
///
/// Ordered and hashable, so that a multiset of cards can be used as a map key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardCount {
    counts: [u8; 10],
    sum: u16,
    total: u16,
}

impl CardCount {
    pub fn new(counts: &[u8; 10]) -> CardCount {
        let mut card_count = CardCount {
            counts: *counts,
            sum: 0,
            total: 0,
        };

        card_count.propagate_counts();

        card_count
    }

    pub fn add_card(&mut self, card: Card) {
        self.counts[card.index()] += 1;
        self.sum += card.value(false) as u16;
        self.total += 1;
    }

    /// Remove a card of given denomination.
    ///
    /// Note that this method won't check if the number of the given card is
    /// already 0.
    pub fn remove_card(&mut self, card: Card) {
        self.counts[card.index()] -= 1;
        self.sum -= card.value(false) as u16;
        self.total -= 1;
    }

    /// Note that this method treats Ace as 1.
    pub fn get_sum(&self) -> u16 {
        self.sum
    }

    pub fn get_total(&self) -> u16 {
        self.total
    }

    pub fn has_ace(&self) -> bool {
        self.counts[Card::Ace.index()] > 0
    }

    pub fn hand_value(&self) -> HandValue {
        HandValue::from_hard_sum(self.sum, self.has_ace())
    }

    /// Every card in the group, repeated by multiplicity, in denomination order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::iter().flat_map(move |card| std::iter::repeat(card).take(self[card] as usize))
    }

    fn propagate_counts(&mut self) {
        self.sum = 0;
        self.total = 0;
        for card in Card::iter() {
            let count = self.counts[card.index()] as u16;
            self.sum += card.value(false) as u16 * count;
            self.total += count;
        }
    }
}

impl Index<Card> for CardCount {
    type Output = u8;
    fn index(&self, index: Card) -> &Self::Output {
        &self.counts[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(cards: &[Card]) -> CardCount {
        let mut card_count = CardCount::default();
        for card in cards {
            card_count.add_card(*card);
        }
        card_count
    }

    #[test]
    fn card_values_and_symbols() {
        assert_eq!(Card::Ace.value(true), 11);
        assert_eq!(Card::Ace.value(false), 1);
        assert_eq!(Card::Seven.value(true), 7);
        assert_eq!(Card::Ten.value(false), 10);
        let symbols: String = Card::iter().map(Card::symbol).collect();
        assert_eq!(symbols, "A23456789T");
        assert_eq!(Card::from_value(10), Some(Card::Ten));
        assert_eq!(Card::from_value(1), Some(Card::Ace));
        assert_eq!(Card::from_value(11), None);
    }

    #[test]
    fn card_parses_from_symbol() {
        assert_eq!("T".parse::<Card>().unwrap(), Card::Ten);
        assert_eq!("7".parse::<Card>().unwrap(), Card::Seven);
        assert!("X".parse::<Card>().is_err());
    }

    #[test]
    fn at_most_one_ace_is_soft() {
        assert_eq!(hand(&[Card::Ace, Card::Ace]).hand_value(), HandValue::soft(12));
        assert_eq!(
            hand(&[Card::Ace, Card::Five, Card::Ace]).hand_value(),
            HandValue::soft(17)
        );
        assert_eq!(
            hand(&[Card::Ace, Card::Ten, Card::Five]).hand_value(),
            HandValue::hard(16)
        );
        assert_eq!(hand(&[Card::Ace, Card::Ten]).hand_value(), HandValue::soft(21));
        assert!(hand(&[Card::Ten, Card::Nine, Card::Five]).hand_value().is_bust());
    }

    #[test]
    fn dealer_hits_soft_17() {
        assert!(HandValue::hard(16).dealer_should_draw());
        assert!(HandValue::soft(17).dealer_should_draw());
        assert!(!HandValue::hard(17).dealer_should_draw());
        assert!(!HandValue::soft(18).dealer_should_draw());
    }

    #[test]
    fn add_and_remove() {
        let original = CardCount::new(&[1, 0, 2, 0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(original.get_total(), 6);
        assert_eq!(original.get_sum(), 37);

        let mut card_count = original;
        card_count.add_card(Card::Four);
        assert_eq!(card_count[Card::Four], 1);
        assert_eq!(card_count.get_sum(), 41);
        card_count.remove_card(Card::Four);
        assert_eq!(card_count, original);
    }

    #[test]
    fn cards_repeat_by_multiplicity() {
        let card_count = hand(&[Card::Ten, Card::Two, Card::Ten]);
        let cards: Vec<Card> = card_count.cards().collect();
        assert_eq!(cards, vec![Card::Two, Card::Ten, Card::Ten]);
    }

    #[test]
    fn hand_value_display() {
        assert_eq!(HandValue::soft(18).to_string(), "s18");
        assert_eq!(HandValue::hard(9).to_string(), "9");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Calculate the value of a blackjack hand.
///
/// Aces start at 11 and are downgraded to 1 one at a time while the total
/// is over 21. At most one ace ends up counting as 11, and only when the
/// total stays at or under 21; otherwise every ace counts as 1.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total = total.saturating_add(card.value());
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Check if a hand is soft (an ace is still counted as 11).
///
/// No table rule here depends on softness; this exists for hand
/// inspection and logging by callers of the crate.
pub fn is_soft_hand(cards: &[Card]) -> bool {
    if !cards.iter().any(Card::is_ace) {
        return false;
    }
    let hard: u8 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() })
        .sum();
    hard + 10 == hand_value(cards)
}

/// Check if a hand is busted.
pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards) > 21
}

/// Cards held by one participant during a round.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl fmt::Display for Hand {
    /// Cards separated by spaces, the way the table log prints them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

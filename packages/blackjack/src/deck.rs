use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank, Suit};
use crate::error::GameError;

/// A single 52-card deck. Cards are drawn from the front and never
/// returned; the table swaps in a fresh deck once too few remain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Build all 52 cards in deterministic, unshuffled order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Shuffle the remaining cards a random number of times, in [10, 50).
    /// Each pass is a full Fisher-Yates shuffle.
    pub fn shuffle(&mut self, rng: &mut impl Rng) -> u32 {
        let passes = rng.gen_range(10..50);
        for _ in 0..passes {
            self.cards.shuffle(rng);
        }
        passes
    }

    /// Remove and return the first card of the deck.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        Ok(self.cards.remove(0))
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// True when the deck cannot guarantee 5 cards for each active player
    /// plus the dealer; the next round must start from a fresh deck.
    pub fn needs_replacement(&self, active_players: usize) -> bool {
        self.remaining() < (active_players + 1) * 5
    }
}

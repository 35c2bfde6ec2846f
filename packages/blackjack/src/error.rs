use thiserror::Error;

use crate::Chips;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("Bet cannot be negative: {0}")]
    NegativeBet(Chips),
    #[error("Bet of {bet} exceeds available chips ({chips})")]
    BetTooLarge { bet: Chips, chips: Chips },
    #[error("Deck has no cards left")]
    EmptyDeck,
    #[error("Hand is already finished for this round")]
    HandOver,
    #[error("No player at seat {0}")]
    NoSuchSeat(usize),
}

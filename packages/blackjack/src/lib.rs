mod card;
mod deck;
mod error;
mod hand;
mod round;
mod settlement;
mod table;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use error::GameError;
pub use hand::{hand_value, is_busted, is_soft_hand, Hand};
pub use round::{Action, Table, TurnState};
pub use settlement::{settle, PlayerOutcome, PlayerResult, Settlement};
pub use table::{Chips, Dealer, Participant, Player, Roster};

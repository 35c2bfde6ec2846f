use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::hand::Hand;
use crate::round::TurnState;

/// Chip balance. Signed: player balances never go below zero (bets are
/// capped at placement) but the dealer's bankroll may run into debt when
/// several players win at once, as the house plays on credit.
pub type Chips = i64;

/// Capabilities shared by the dealer and the players.
pub trait Participant {
    fn name(&self) -> &str;
    fn hand(&self) -> &Hand;

    /// Display string for prompts and the table log:
    /// just the name before any card is dealt, then
    /// `name [cards] - total` with a flag when the total hits 21.
    fn display_name(&self) -> String {
        if self.hand().is_empty() {
            return self.name().to_string();
        }
        let total = self.hand().value();
        let flag = if total == 21 { " BLACKJACK !!!" } else { "" };
        format!("{} [{}] - {}{}", self.name(), self.hand(), total, flag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dealer {
    pub chips: Chips,
    pub hand: Hand,
    pub lost: bool,
}

impl Dealer {
    pub fn new(chips: Chips) -> Self {
        Self {
            chips,
            hand: Hand::new(),
            lost: false,
        }
    }

    pub fn bet_won(&mut self, amount: Chips) {
        self.chips += amount;
    }

    pub fn bet_lost(&mut self, amount: Chips) {
        self.chips -= amount;
    }

    pub fn reset_for_new_round(&mut self) {
        self.hand.clear();
        self.lost = false;
    }
}

impl Participant for Dealer {
    fn name(&self) -> &str {
        "dealer"
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub surname: String,
    pub age: u8,
    pub nationality: String,
    pub chips: Chips,
    pub bet: Chips,
    pub hand: Hand,
    pub turn: TurnState,
    pub lost: bool,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        age: u8,
        nationality: impl Into<String>,
        chips: Chips,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            age,
            nationality: nationality.into(),
            chips,
            bet: 0,
            hand: Hand::new(),
            turn: TurnState::AwaitingAction,
            lost: false,
        }
    }

    /// Take the bet out of the player's chips. Rejected when negative or
    /// larger than the chips the player has left.
    pub fn place_bet(&mut self, amount: Chips) -> Result<(), GameError> {
        if amount < 0 {
            return Err(GameError::NegativeBet(amount));
        }
        if amount > self.chips {
            return Err(GameError::BetTooLarge {
                bet: amount,
                chips: self.chips,
            });
        }
        self.chips -= amount;
        self.bet = amount;
        Ok(())
    }

    /// 1:1 payout: the bet comes back together with the matched amount.
    pub fn bet_won(&mut self) {
        self.chips += 2 * self.bet;
    }

    /// Push: only the wagered amount comes back.
    pub fn bet_returned(&mut self) {
        self.chips += self.bet;
    }

    pub fn is_broke(&self) -> bool {
        self.chips == 0
    }

    pub fn reset_for_new_round(&mut self) {
        self.hand.clear();
        self.bet = 0;
        self.turn = TurnState::AwaitingAction;
        self.lost = false;
    }
}

impl Participant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }
}

/// The active players at the table plus the ones that already went broke
/// (kept for the end-of-round report only).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    pub players: Vec<Player>,
    pub broke: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            broke: Vec::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.players.len()
    }

    pub fn all_players_lost(&self) -> bool {
        self.players.iter().all(|p| p.lost)
    }

    /// Move players with no chips left out of the game. Two phases:
    /// indices are collected first, then removed back to front, so the
    /// roster is never mutated while it is being scanned.
    pub fn sweep_broke(&mut self) -> Vec<String> {
        let broke_seats: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_broke())
            .map(|(seat, _)| seat)
            .collect();

        let mut names = Vec::with_capacity(broke_seats.len());
        for seat in broke_seats.into_iter().rev() {
            let player = self.players.remove(seat);
            names.push(player.name.clone());
            self.broke.push(player);
        }
        names.reverse();
        names
    }

    pub fn reset_for_new_round(&mut self) {
        for player in &mut self.players {
            player.reset_for_new_round();
        }
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck::Deck;
use crate::error::GameError;
use crate::settlement::{self, Settlement};
use crate::table::{Chips, Dealer, Player, Roster};


/// The two actions a participant can take during their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

/// Per-participant turn state. `Standing` and `Busted` are terminal for
/// the round; a total of exactly 21 stays `AwaitingAction` (it is only
/// flagged for display, never auto-stood).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingAction,
    Standing,
    Busted,
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::AwaitingAction
    }
}

/// Everything on the table: the deck, the dealer, the player roster and
/// the pot of placed bets. Drives one round at a time; the client owns
/// all prompting and presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub deck: Deck,
    pub dealer: Dealer,
    pub roster: Roster,
    /// Sum of placed, unsettled bets.
    pub pot: Chips,
    pub rounds_played: u32,
}

impl Table {
    pub fn new(players: Vec<Player>, dealer_chips: Chips, rng: &mut impl Rng) -> Self {
        let mut deck = Deck::standard();
        deck.shuffle(rng);
        Self {
            deck,
            dealer: Dealer::new(dealer_chips),
            roster: Roster::new(players),
            pot: 0,
            rounds_played: 0,
        }
    }

    pub fn players_in_game(&self) -> usize {
        self.roster.active_count()
    }

    /// Start a new round. Swaps in a fresh shuffled deck when the old one
    /// cannot cover 5 cards per participant; returns true when it did.
    pub fn begin_round(&mut self, rng: &mut impl Rng) -> bool {
        self.rounds_played += 1;
        if self.deck.needs_replacement(self.players_in_game()) {
            self.deck = Deck::standard();
            self.deck.shuffle(rng);
            true
        } else {
            false
        }
    }

    pub fn player(&self, seat: usize) -> Result<&Player, GameError> {
        self.roster.players.get(seat).ok_or(GameError::NoSuchSeat(seat))
    }

    fn player_mut(&mut self, seat: usize) -> Result<&mut Player, GameError> {
        self.roster
            .players
            .get_mut(seat)
            .ok_or(GameError::NoSuchSeat(seat))
    }

    /// Place a validated bet for one seat and add it to the pot.
    pub fn place_bet(&mut self, seat: usize, amount: Chips) -> Result<(), GameError> {
        self.player_mut(seat)?.place_bet(amount)?;
        self.pot += amount;
        Ok(())
    }

    /// Opening deal: first card to every player, one card to the dealer,
    /// then the second card to every player.
    pub fn deal_opening(&mut self) -> Result<(), GameError> {
        for seat in 0..self.roster.players.len() {
            let card = self.deck.draw()?;
            self.roster.players[seat].hand.add_card(card);
        }
        let card = self.deck.draw()?;
        self.dealer.hand.add_card(card);
        for seat in 0..self.roster.players.len() {
            let card = self.deck.draw()?;
            self.roster.players[seat].hand.add_card(card);
        }
        Ok(())
    }

    /// One hit for the given seat. Going over 21 busts the hand and marks
    /// the player lost for the round; 21 stays playable. A finished hand
    /// cannot hit again.
    pub fn player_hit(&mut self, seat: usize) -> Result<Card, GameError> {
        if self.player(seat)?.turn != TurnState::AwaitingAction {
            return Err(GameError::HandOver);
        }
        let card = self.deck.draw()?;
        let player = self.player_mut(seat)?;
        player.hand.add_card(card);
        if player.hand.value() > 21 {
            player.turn = TurnState::Busted;
            player.lost = true;
        }
        Ok(card)
    }

    /// Stand: terminal for the round. Returns the final total.
    pub fn player_stand(&mut self, seat: usize) -> Result<u8, GameError> {
        if self.player(seat)?.turn != TurnState::AwaitingAction {
            return Err(GameError::HandOver);
        }
        let player = self.player_mut(seat)?;
        player.turn = TurnState::Standing;
        Ok(player.hand.value())
    }

    /// The dealer's automatic turn: hit while the total is 17 or less,
    /// stand strictly above 17. When every player already busted the
    /// dealer stands without drawing; there is nothing left to beat.
    pub fn dealer_turn(&mut self) -> Result<Vec<Card>, GameError> {
        if self.roster.all_players_lost() {
            return Ok(Vec::new());
        }
        let mut drawn = Vec::new();
        while self.dealer.hand.value() <= 17 {
            let card = self.deck.draw()?;
            self.dealer.hand.add_card(card);
            drawn.push(card);
        }
        self.dealer.lost = self.dealer.hand.value() > 21;
        Ok(drawn)
    }

    /// Settle all bets for the round.
    pub fn settle(&mut self) -> Settlement {
        settlement::settle(&mut self.dealer, &mut self.roster, &mut self.pot)
    }

    /// Remove players left with no chips; returns their names.
    pub fn sweep_broke(&mut self) -> Vec<String> {
        self.roster.sweep_broke()
    }

    /// Clear hands, bets and per-round flags for the next round.
    pub fn reset_round(&mut self) {
        self.roster.reset_for_new_round();
        self.dealer.reset_for_new_round();
    }

    /// All chips on the table, wherever they currently sit. Constant
    /// across bet placement and settlement.
    pub fn total_chips(&self) -> Chips {
        let players: Chips = self.roster.players.iter().map(|p| p.chips).sum();
        let broke: Chips = self.roster.broke.iter().map(|p| p.chips).sum();
        self.dealer.chips + players + broke + self.pot
    }
}

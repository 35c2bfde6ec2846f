use serde::{Deserialize, Serialize};

use crate::table::{Chips, Dealer, Roster};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerOutcome {
    Win,
    Lose,
    Push,
}

/// One player's line in the round report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: String,
    pub total: u8,
    pub bet: Chips,
    pub outcome: PlayerOutcome,
}

/// Outcome of a settled round, for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub dealer_total: u8,
    pub dealer_busted: bool,
    /// Dealer and every player busted: all bets were refunded.
    pub everyone_lost: bool,
    pub results: Vec<PlayerResult>,
}

/// Reconcile all bets between the dealer and the players.
///
/// Exactly one branch applies per round:
/// - every player busted and the dealer too: each bet is refunded;
/// - every player busted, dealer stood at 21 or less: the pot is the
///   dealer's;
/// - dealer busted with at least one survivor: every survivor wins 1:1,
///   no comparison of totals is made;
/// - nobody busted: each survivor's total is compared to the dealer's,
///   lower loses the bet, higher wins 1:1, equal pushes.
///
/// Bets forfeited by busted players stay in the pot until the final sweep
/// to the dealer, which always leaves the pot at zero. Total chips across
/// dealer, players and pot are the same before and after.
pub fn settle(dealer: &mut Dealer, roster: &mut Roster, pot: &mut Chips) -> Settlement {
    let dealer_total = dealer.hand.value();
    let dealer_busted = dealer_total > 21;
    let everyone_lost = roster.all_players_lost() && dealer_busted;

    let mut outcomes = Vec::with_capacity(roster.players.len());

    if roster.all_players_lost() {
        if dealer_busted {
            dealer.lost = true;
            for player in &mut roster.players {
                player.bet_returned();
                *pot -= player.bet;
                outcomes.push(PlayerOutcome::Push);
            }
        } else {
            dealer.bet_won(*pot);
            *pot = 0;
            outcomes.resize(roster.players.len(), PlayerOutcome::Lose);
        }
    } else if dealer_busted {
        dealer.lost = true;
        for player in &mut roster.players {
            if player.lost {
                // Forfeited bet stays in the pot for the final sweep.
                outcomes.push(PlayerOutcome::Lose);
            } else {
                player.bet_won();
                dealer.bet_lost(player.bet);
                *pot -= player.bet;
                outcomes.push(PlayerOutcome::Win);
            }
        }
    } else {
        for player in &mut roster.players {
            if player.lost {
                outcomes.push(PlayerOutcome::Lose);
                continue;
            }
            let total = player.hand.value();
            if total < dealer_total {
                player.lost = true;
                dealer.bet_won(player.bet);
                *pot -= player.bet;
                outcomes.push(PlayerOutcome::Lose);
            } else if total > dealer_total {
                player.bet_won();
                dealer.bet_lost(player.bet);
                *pot -= player.bet;
                outcomes.push(PlayerOutcome::Win);
            } else {
                player.bet_returned();
                *pot -= player.bet;
                outcomes.push(PlayerOutcome::Push);
            }
        }
    }

    // Any bets still sitting in the pot belong to the dealer.
    dealer.bet_won(*pot);
    *pot = 0;

    let results = roster
        .players
        .iter()
        .zip(outcomes)
        .map(|(player, outcome)| PlayerResult {
            name: player.name.clone(),
            total: player.hand.value(),
            bet: player.bet,
            outcome,
        })
        .collect();

    Settlement {
        dealer_total,
        dealer_busted,
        everyone_lost,
        results,
    }
}

use blackjack::{
    Action, Deck, GameError, Participant, Player, PlayerOutcome, Settlement, Table, TurnState,
};
use rand::Rng;

use crate::console::Console;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Why the game loop ended.
#[derive(Debug, PartialEq, Eq)]
pub enum GameEnd {
    /// Every player went broke.
    NoMorePlayers,
    /// The table answered "no" to another round.
    PlayerQuit,
    /// Input ended mid-game; the current round is discarded unsettled.
    Interrupted,
}

/// Drive round after round until the players stop or run out of chips.
pub fn run(table: &mut Table, console: &Console, rng: &mut impl Rng) -> GameEnd {
    loop {
        if table.players_in_game() == 0 {
            return GameEnd::NoMorePlayers;
        }
        let prompt = if table.rounds_played > 0 {
            "Fancy another round? (Y)es or (N)o: "
        } else {
            "Shall we begin a game?  (Y)es or (N)o: "
        };
        match console.ask_yes_no(prompt) {
            None => return GameEnd::Interrupted,
            Some(false) => return GameEnd::PlayerQuit,
            Some(true) => {}
        }

        if table.begin_round(rng) {
            console.say(" > Got a new fresh deck...");
            console.say(" > Shuffling the cards");
        }
        if run_round(table, console).is_none() {
            return GameEnd::Interrupted;
        }
    }
}

/// One full round. `None` means input ended and the round was abandoned
/// without settlement.
fn run_round(table: &mut Table, console: &Console) -> Option<()> {
    collect_bets(table, console)?;

    console.say("");
    console.say(" > Dealing cards");
    table
        .deal_opening()
        .expect("deck is replenished before every round");

    show_game_state(table, console);
    players_turns(table, console)?;
    dealer_turn(table, console);

    let settlement = table.settle();
    // Built before the broke sweep: the results line up with the seats
    // as they were when the round was settled.
    let player_lines = player_result_lines(&table.roster.players, &settlement);
    for name in table.sweep_broke() {
        console.say(&format!(" >> {name} is broke! :("));
    }
    show_round_result(table, console, &settlement, &player_lines);

    table.reset_round();
    Some(())
}

fn collect_bets(table: &mut Table, console: &Console) -> Option<()> {
    log::debug!("Setting bets...");
    for seat in 0..table.players_in_game() {
        loop {
            console.say("");
            let name = table.roster.players[seat].name.clone();
            let amount = console.ask_amount(&format!(" > {name} place your bet: "))?;
            match table.place_bet(seat, amount) {
                Ok(()) => break,
                Err(GameError::BetTooLarge { chips, .. }) => {
                    console.say(&format!(
                        " > You're not that rich!!! Please enter a bet lower than your total amount [{chips}] !!!"
                    ));
                }
                Err(GameError::NegativeBet(_)) => {
                    console.say(" > Really?! Try again!");
                }
                Err(err) => {
                    console.say(&format!(" > {err}"));
                }
            }
        }
    }
    Some(())
}

fn players_turns(table: &mut Table, console: &Console) -> Option<()> {
    for seat in 0..table.players_in_game() {
        log::debug!("player {} turn", table.roster.players[seat].name);
        loop {
            let prompt = format!(
                "{} : (h)it or (s)tand? ",
                table.roster.players[seat].display_name()
            );
            match console.ask_action(&prompt)? {
                Action::Hit => {
                    let card = table
                        .player_hit(seat)
                        .expect("deck is replenished before every round");
                    let player = &table.roster.players[seat];
                    console.say(&format!("\t\t>> {} drew a card - [{card}]", player.name));
                    if player.hand.value() == 21 {
                        console.say(&format!("\t\t>> {}", player.display_name()));
                    }
                    if player.turn == TurnState::Busted {
                        console.say(&format!("\t\t>> {} is done", player.display_name()));
                        break;
                    }
                }
                Action::Stand => {
                    let total = table.player_stand(seat).expect("hand is still playable");
                    console.say(&format!(
                        "\t\t>> {} stands [sum={total}]",
                        table.roster.players[seat].display_name()
                    ));
                    console.say(RULE);
                    break;
                }
            }
        }
    }
    Some(())
}

fn dealer_turn(table: &mut Table, console: &Console) {
    if table.roster.all_players_lost() {
        log::debug!("Dealer already won! [stands... and drops the mic]");
    }
    let drawn = table
        .dealer_turn()
        .expect("deck is replenished before every round");
    for card in drawn {
        console.say(&format!("\t\t>> dealer drew a card - [{card}]"));
    }
    if table.dealer.lost {
        console.say(&format!("\t\t>> {} is done", table.dealer.display_name()));
    }
    console.say(&format!(
        "\t\t>> {} stands [sum={}]",
        table.dealer.display_name(),
        table.dealer.hand.value()
    ));
    console.say(RULE);
}

fn log_deck(deck: &Deck) {
    log::debug!("Deck: [{} cards]", deck.remaining());
    for chunk in deck.cards.chunks(16) {
        let line: Vec<String> = chunk.iter().map(|c| c.to_string()).collect();
        log::debug!("{}", line.join(" "));
    }
}

fn show_game_state(table: &Table, console: &Console) {
    console.say("");
    log::debug!("{RULE}");
    log::debug!("-- GAME STATE");
    log_deck(&table.deck);

    console.say(&format!(
        " {:>12}[{:>4}$] : {:>24}",
        "dealer",
        table.dealer.chips,
        table.dealer.hand.to_string()
    ));
    for player in &table.roster.players {
        console.say(&format!(
            " {:>12}[{:>4}$] : {:>24}",
            player.name,
            player.chips,
            player.hand.to_string()
        ));
    }
    show_bankrupt_list(table, console);
    console.say("");
}

fn show_round_result(
    table: &Table,
    console: &Console,
    settlement: &Settlement,
    player_lines: &[String],
) {
    console.say("");
    log::debug!("{RULE}");
    log::debug!("-- ROUND RESULT");
    log_deck(&table.deck);

    if settlement.everyone_lost {
        console.say(&format!(
            " {:>12}[{:>4}$] LOST",
            "dealer", table.dealer.chips
        ));
    } else {
        console.say(&format!(
            " {:>12}[{:>4}$] : {:>24} | {:>2} | {:>5}",
            "dealer",
            table.dealer.chips,
            table.dealer.hand.to_string(),
            settlement.dealer_total,
            if settlement.dealer_busted {
                "LOSES"
            } else {
                "WINS"
            }
        ));
    }
    for line in player_lines {
        console.say(line);
    }
    show_bankrupt_list(table, console);
    console.say("");
}

/// One report line per seat. Results are paired with players by position:
/// settlement emits them in roster order, so names never have to be
/// unique.
fn player_result_lines(players: &[Player], settlement: &Settlement) -> Vec<String> {
    if settlement.everyone_lost {
        return players
            .iter()
            .map(|p| format!(" {:>12}[{:>4}$] LOST", p.name, p.chips))
            .collect();
    }
    players
        .iter()
        .zip(&settlement.results)
        .map(|(player, result)| {
            let verdict = match result.outcome {
                PlayerOutcome::Win => "WINS",
                PlayerOutcome::Lose => "LOSES",
                PlayerOutcome::Push => "PUSH",
            };
            format!(
                " {:>12}[{:>4}$] : {:>24} | {:>2} | {:>5} {:>4}$",
                result.name,
                player.chips,
                player.hand.to_string(),
                result.total,
                verdict,
                result.bet
            )
        })
        .collect()
}

fn show_bankrupt_list(table: &Table, console: &Console) {
    if table.roster.broke.is_empty() {
        return;
    }
    console.say("");
    console.say("Went bankrupt: ");
    for player in &table.roster.broke {
        console.say(&format!(" {:>12}[{:>4}$]", player.name, player.chips));
    }
}

#[cfg(test)]
mod tests {
    use blackjack::{Card, PlayerResult, Rank, Suit};

    use super::*;

    fn player_with_hand(name: &str, chips: i64, ranks: &[Rank]) -> Player {
        let mut player = Player::new(name, "Test", 30, "Romania", chips);
        for rank in ranks {
            player.hand.add_card(Card::new(*rank, Suit::Spades));
        }
        player
    }

    fn result(name: &str, total: u8, bet: i64, outcome: PlayerOutcome) -> PlayerResult {
        PlayerResult {
            name: name.to_string(),
            total,
            bet,
            outcome,
        }
    }

    #[test]
    fn test_result_lines_pair_by_seat_even_with_duplicate_names() {
        // Two Popescus at the table: each line must reflect that seat's
        // own outcome, not the first name match.
        let players = vec![
            player_with_hand("Popescu", 1050, &[Rank::Ten, Rank::Nine]),
            player_with_hand("Popescu", 770, &[Rank::Ten, Rank::Seven]),
        ];
        let settlement = Settlement {
            dealer_total: 18,
            dealer_busted: false,
            everyone_lost: false,
            results: vec![
                result("Popescu", 19, 50, PlayerOutcome::Win),
                result("Popescu", 17, 30, PlayerOutcome::Lose),
            ],
        };

        let lines = player_result_lines(&players, &settlement);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WINS"), "{}", lines[0]);
        assert!(lines[0].contains("1050$"), "{}", lines[0]);
        assert!(lines[1].contains("LOSES"), "{}", lines[1]);
        assert!(lines[1].contains(" 770$"), "{}", lines[1]);
    }

    #[test]
    fn test_result_lines_when_everyone_lost() {
        let players = vec![
            player_with_hand("Ion", 1000, &[Rank::Ten, Rank::Nine, Rank::Five]),
            player_with_hand("Maria", 800, &[Rank::King, Rank::Queen, Rank::Two]),
        ];
        let settlement = Settlement {
            dealer_total: 23,
            dealer_busted: true,
            everyone_lost: true,
            results: vec![
                result("Ion", 24, 50, PlayerOutcome::Push),
                result("Maria", 22, 70, PlayerOutcome::Push),
            ],
        };

        let lines = player_result_lines(&players, &settlement);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("LOST"), "{}", lines[0]);
        assert!(lines[1].contains("Maria"), "{}", lines[1]);
    }
}

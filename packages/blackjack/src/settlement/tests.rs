use super::*;
use crate::card::{Card, Rank, Suit};
use crate::round::TurnState;
use crate::table::Player;

fn ready_player(name: &str, chips: Chips, bet: Chips, ranks: &[Rank]) -> Player {
    let mut player = Player::new(name, "Test", 30, "Romania", chips);
    player.place_bet(bet).unwrap();
    for rank in ranks {
        player.hand.add_card(Card::new(*rank, Suit::Spades));
    }
    if player.hand.is_busted() {
        player.turn = TurnState::Busted;
        player.lost = true;
    }
    player
}

fn dealer_with(chips: Chips, ranks: &[Rank]) -> Dealer {
    let mut dealer = Dealer::new(chips);
    for rank in ranks {
        dealer.hand.add_card(Card::new(*rank, Suit::Hearts));
    }
    dealer
}

fn table_chips(dealer: &Dealer, roster: &Roster, pot: Chips) -> Chips {
    dealer.chips + roster.players.iter().map(|p| p.chips).sum::<Chips>() + pot
}

#[test]
fn test_equal_totals_push() {
    // Scenario A: player stood on 19, dealer drew to 19.
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::Nine]);
    let mut roster = Roster::new(vec![ready_player(
        "Ion",
        1000,
        50,
        &[Rank::Ten, Rank::Nine],
    )]);
    let mut pot = 50;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Push);
    assert_eq!(roster.players[0].chips, 1000);
    assert_eq!(dealer.chips, 1000);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_player_beats_dealer_one_to_one() {
    // Scenario B: player holds A + 10 for 21, dealer stands on 20.
    // No blackjack bonus exists: a plain 1:1 win.
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::King]);
    let mut roster = Roster::new(vec![ready_player(
        "Ion",
        1000,
        50,
        &[Rank::Ace, Rank::Ten],
    )]);
    let mut pot = 50;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(settlement.dealer_total, 20);
    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Win);
    assert_eq!(roster.players[0].chips, 1050);
    assert_eq!(dealer.chips, 950);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_lone_busted_player_forfeits_bet() {
    // Scenario C: the only player busted, so the dealer takes the pot
    // without playing out a hand.
    let mut dealer = dealer_with(1000, &[Rank::Ten]);
    let mut roster = Roster::new(vec![ready_player(
        "Ion",
        1000,
        50,
        &[Rank::Ten, Rank::Nine, Rank::Five],
    )]);
    let mut pot = 50;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Lose);
    assert!(!settlement.everyone_lost);
    assert_eq!(roster.players[0].chips, 950);
    assert_eq!(dealer.chips, 1050);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_everyone_busted_refunds_all_bets() {
    // Scenario D: both players busted and the dealer busted too; every
    // bet goes back where it came from.
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::Six, Rank::Seven]);
    let mut roster = Roster::new(vec![
        ready_player("Ion", 1000, 50, &[Rank::Ten, Rank::Nine, Rank::Five]),
        ready_player("Maria", 800, 70, &[Rank::King, Rank::Queen, Rank::Two]),
    ]);
    let mut pot = 120;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert!(settlement.everyone_lost);
    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Push);
    assert_eq!(settlement.results[1].outcome, PlayerOutcome::Push);
    assert_eq!(roster.players[0].chips, 1000);
    assert_eq!(roster.players[1].chips, 800);
    assert_eq!(dealer.chips, 1000);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_dealer_bust_pays_survivor_and_keeps_forfeits() {
    // Scenario E: dealer busts on 23; the survivor wins 1:1 while the
    // busted player's bet is swept to the dealer.
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::Six, Rank::Seven]);
    let mut roster = Roster::new(vec![
        ready_player("Ion", 1000, 50, &[Rank::Ten, Rank::Eight]),
        ready_player("Maria", 800, 60, &[Rank::King, Rank::Queen, Rank::Four]),
    ]);
    let mut pot = 110;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert!(settlement.dealer_busted);
    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Win);
    assert_eq!(settlement.results[1].outcome, PlayerOutcome::Lose);
    assert_eq!(roster.players[0].chips, 1050);
    assert_eq!(roster.players[1].chips, 740);
    // Dealer pays 50 to the winner and collects the forfeited 60.
    assert_eq!(dealer.chips, 1010);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_dealer_bust_every_survivor_wins_regardless_of_total() {
    // No tie-filtering among survivors when the dealer busts: a 12 wins
    // just like an 18.
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::Six, Rank::King]);
    let mut roster = Roster::new(vec![
        ready_player("Ion", 1000, 50, &[Rank::Ten, Rank::Eight]),
        ready_player("Maria", 800, 40, &[Rank::Ten, Rank::Two]),
    ]);
    let mut pot = 90;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Win);
    assert_eq!(settlement.results[1].outcome, PlayerOutcome::Win);
    assert_eq!(roster.players[0].chips, 1050);
    assert_eq!(roster.players[1].chips, 840);
    assert_eq!(dealer.chips, 910);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_mixed_comparison_round() {
    // Nobody busted: one player under the dealer, one over, one equal.
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::Eight]);
    let mut roster = Roster::new(vec![
        ready_player("Ion", 1000, 50, &[Rank::Ten, Rank::Seven]),
        ready_player("Maria", 800, 60, &[Rank::Ten, Rank::Nine]),
        ready_player("Andrei", 500, 30, &[Rank::Ten, Rank::Eight]),
    ]);
    let mut pot = 140;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Lose);
    assert_eq!(settlement.results[1].outcome, PlayerOutcome::Win);
    assert_eq!(settlement.results[2].outcome, PlayerOutcome::Push);
    assert_eq!(roster.players[0].chips, 950);
    assert!(roster.players[0].lost);
    assert_eq!(roster.players[1].chips, 860);
    assert_eq!(roster.players[2].chips, 500);
    assert_eq!(dealer.chips, 990);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_all_players_busted_dealer_keeps_pot() {
    let mut dealer = dealer_with(1000, &[Rank::Nine]);
    let mut roster = Roster::new(vec![
        ready_player("Ion", 1000, 100, &[Rank::Ten, Rank::Nine, Rank::Five]),
        ready_player("Maria", 800, 200, &[Rank::King, Rank::Queen, Rank::Two]),
    ]);
    let mut pot = 300;
    let before = table_chips(&dealer, &roster, pot);

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert!(!settlement.everyone_lost);
    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Lose);
    assert_eq!(settlement.results[1].outcome, PlayerOutcome::Lose);
    assert_eq!(dealer.chips, 1300);
    assert_eq!(pot, 0);
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_dealer_can_go_into_debt_but_players_never_negative() {
    let mut dealer = dealer_with(10, &[Rank::Ten, Rank::Six, Rank::Seven]);
    let mut roster = Roster::new(vec![ready_player(
        "Ion",
        1000,
        50,
        &[Rank::Ten, Rank::Eight],
    )]);
    let mut pot = 50;
    let before = table_chips(&dealer, &roster, pot);

    settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(dealer.chips, -40);
    assert_eq!(roster.players[0].chips, 1050);
    assert!(roster.players.iter().all(|p| p.chips >= 0));
    assert_eq!(table_chips(&dealer, &roster, pot), before);
}

#[test]
fn test_losing_everything_leaves_exactly_zero() {
    let mut dealer = dealer_with(1000, &[Rank::Ten, Rank::Nine]);
    let mut roster = Roster::new(vec![ready_player(
        "Ion",
        100,
        100,
        &[Rank::Ten, Rank::Seven],
    )]);
    let mut pot = 100;

    let settlement = settle(&mut dealer, &mut roster, &mut pot);

    assert_eq!(settlement.results[0].outcome, PlayerOutcome::Lose);
    assert_eq!(roster.players[0].chips, 0);
    assert!(roster.players[0].is_broke());
    assert_eq!(dealer.chips, 1100);
}

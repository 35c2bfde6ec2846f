mod console;
mod game;
mod logger;
mod roster;

use std::path::PathBuf;
use std::process::ExitCode;

use blackjack::{Chips, Table};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use console::Console;
use game::GameEnd;
use logger::FileLogger;
use roster::MAX_PLAYERS;

/// Console blackjack against a computer dealer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Tab-delimited file with the registered players.
    #[arg(long, default_value = "assets/players.tsv")]
    players_file: PathBuf,

    /// The dealer's starting bankroll.
    #[arg(long, default_value_t = 1000)]
    dealer_chips: Chips,

    /// Directory for the per-session log file.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match FileLogger::init(&cli.log_dir) {
        Ok(path) => println!(" > Logging this session to {}", path.display()),
        Err(err) => println!(" > Could not open a log file ({err}), playing without one"),
    }
    log::info!("-- Program started");

    let console = Console::new();
    let mut rng = ChaCha8Rng::from_entropy();

    let registered = match roster::load(&cli.players_file) {
        Ok(players) => players,
        Err(err) => {
            log::error!("FATAL ERROR - {err}");
            console.say(&format!("FATAL ERROR - {err}"));
            return ExitCode::from(1);
        }
    };
    if registered.is_empty() {
        console.say("No more players. Game stops!");
        return ExitCode::SUCCESS;
    }

    if registered.len() > MAX_PLAYERS {
        console.say(&format!(
            " > {} players registered but only {MAX_PLAYERS} seats at the table",
            registered.len()
        ));
        console.say(" > Drawing lots for the seats...");
    }
    let seated = roster::select_table(registered, &mut rng);
    for player in &seated {
        console.say(&format!(
            " > {} {} ({}, {}) takes a seat with {}$",
            player.name, player.surname, player.age, player.nationality, player.chips
        ));
    }

    let mut table = Table::new(seated, cli.dealer_chips, &mut rng);
    console.say(" > Got a new fresh deck...");
    console.say(" > Shuffling the cards");

    match game::run(&mut table, &console, &mut rng) {
        GameEnd::NoMorePlayers => console.say("No more players. Game stops!"),
        GameEnd::PlayerQuit | GameEnd::Interrupted => {
            console.say("Well that's sad. Please come again!")
        }
    }
    log::info!("-- Program finished after {} round(s)", table.rounds_played);
    ExitCode::SUCCESS
}

use std::fs;
use std::path::Path;

use blackjack::{Chips, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// At most this many players sit at the table.
pub const MAX_PLAYERS: usize = 4;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("File {path} not found: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("File {path} is not properly formatted: line {line}: {reason}")]
    Malformed {
        path: String,
        line: usize,
        reason: String,
    },
}

/// Load the registered players from a tab-delimited file, one per line:
/// `name<TAB>surname<TAB>age<TAB>nationality<TAB>chips`.
pub fn load(path: &Path) -> Result<Vec<Player>, RosterError> {
    let display_path = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| RosterError::Unreadable {
        path: display_path.clone(),
        source,
    })?;

    let mut players = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |reason: String| RosterError::Malformed {
            path: display_path.clone(),
            line: idx + 1,
            reason,
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 5 {
            return Err(malformed(format!(
                "expected 5 tab-separated fields, got {}",
                fields.len()
            )));
        }
        let age: u8 = fields[2]
            .trim()
            .parse()
            .map_err(|_| malformed(format!("bad age {:?}", fields[2])))?;
        let chips: Chips = fields[4]
            .trim()
            .parse()
            .map_err(|_| malformed(format!("bad chip count {:?}", fields[4])))?;
        if chips < 0 {
            return Err(malformed(format!("negative chip count {chips}")));
        }
        players.push(Player::new(
            fields[0].trim(),
            fields[1].trim(),
            age,
            fields[3].trim(),
            chips,
        ));
    }

    log::debug!("Player object list:");
    for player in &players {
        log::debug!(
            "nume={}; prenume={}; nationalitate={}; varsta={}; jetoane={}",
            player.name,
            player.surname,
            player.nationality,
            player.age,
            player.chips
        );
    }
    Ok(players)
}

/// Pick the players who get a seat: everyone when at most
/// [`MAX_PLAYERS`] registered, a random sample of [`MAX_PLAYERS`]
/// otherwise.
pub fn select_table(mut players: Vec<Player>, rng: &mut impl Rng) -> Vec<Player> {
    if players.len() > MAX_PLAYERS {
        players.shuffle(rng);
        players.truncate(MAX_PLAYERS);
    }
    players
}

use std::io::{self, BufRead, Write};

use blackjack::{Action, Chips};

/// The interactive surface of the game. Owns stdin and mirrors every
/// line shown at the table into the log file, so the session can be
/// replayed from the log alone.
pub struct Console {
    stdin: io::Stdin,
}

impl Console {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    /// Print one line and log it.
    pub fn say(&self, msg: &str) {
        println!("{msg}");
        log::info!("{msg}");
    }

    /// Prompt and read one line, trimmed. `None` means end of input:
    /// the player walked away from the table.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Keep asking until the answer is a clear yes or no.
    pub fn ask_yes_no(&self, prompt: &str) -> Option<bool> {
        loop {
            match self.read_line(prompt)?.to_lowercase().as_str() {
                "y" | "yes" => return Some(true),
                "n" | "no" => return Some(false),
                _ => continue,
            }
        }
    }

    /// Keep asking until the answer is one of the two table actions.
    pub fn ask_action(&self, prompt: &str) -> Option<Action> {
        loop {
            match parse_action(&self.read_line(prompt)?) {
                Some(action) => return Some(action),
                None => continue,
            }
        }
    }

    /// Keep asking until the line parses as a whole number. Range checks
    /// are the caller's job; they come from the rules crate.
    pub fn ask_amount(&self, prompt: &str) -> Option<Chips> {
        loop {
            match self.read_line(prompt)?.parse::<Chips>() {
                Ok(amount) => return Some(amount),
                Err(_) => {
                    self.say(" > Please enter only digits for the bet amount");
                }
            }
        }
    }
}

pub fn parse_action(input: &str) -> Option<Action> {
    match input.to_lowercase().as_str() {
        "h" | "hit" => Some(Action::Hit),
        "s" | "stand" => Some(Action::Stand),
        _ => None,
    }
}

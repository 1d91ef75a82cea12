//! Typed move grammars and side-channel commands.
//!
//! Patterns are searched, not anchored: `"put it at 2,3 please"` is a move.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};
use versus_rules::{Coord, GameKind};

static TICTACTOE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<x>[1-3])[, ]*(?P<y>[1-3])").expect("tic-tac-toe pattern compiles")
});

static CONNECT_FOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<x>[1-7])").expect("connect-four pattern compiles"));

static REVERSI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<x>[1-8])[, ]*(?P<y>[1-8])").expect("reversi pattern compiles")
});

static WEIQI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<x>1[0-9]|[1-9])[, ]*(?P<y>1[0-9]|[1-9])").expect("weiqi pattern compiles")
});

static BATTLESHIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<x>10|[1-9]|[A-Ja-j])[, ]*(?P<y>10|[1-9])").expect("battleship pattern compiles")
});

/// Replies that agree to an end request.
const AFFIRMATIVE: [&str; 5] = ["end", "yes", "y", "ok", "ye"];

/// What one chat message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A square in board coordinates.
    Coordinate(Coord),
    /// Clear chat clutter, keep waiting.
    Flush,
    /// Ask the opponent to end the game now.
    EndRequested,
    /// Anything else, including out-of-range numbers.
    Malformed,
}

/// Move grammar of one game.
#[derive(Debug, Clone, Copy)]
pub struct InputGrammar {
    kind: GameKind,
    pattern: &'static Lazy<Regex>,
    max: u8,
}

impl InputGrammar {
    /// The grammar players type moves in for `kind`.
    #[instrument]
    pub fn for_game(kind: GameKind) -> Self {
        let (pattern, max) = match kind {
            GameKind::TicTacToe => (&TICTACTOE, 3),
            GameKind::ConnectFour => (&CONNECT_FOUR, 7),
            GameKind::Reversi => (&REVERSI, 8),
            GameKind::Weiqi => (&WEIQI, 19),
            GameKind::Battleship => (&BATTLESHIP, 10),
        };
        Self { kind, pattern, max }
    }

    /// Classifies one message.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub fn parse(&self, text: &str) -> Command {
        let trimmed = text.trim().to_ascii_lowercase();
        if trimmed == "flush" {
            return Command::Flush;
        }
        if trimmed == "end" {
            return Command::EndRequested;
        }
        let Some(caps) = self.pattern.captures(text) else {
            debug!("No coordinate in message");
            return Command::Malformed;
        };
        let x = caps.name("x").and_then(|m| axis_value(m.as_str()));
        // Connect-four moves name a column only.
        let y = match caps.name("y") {
            Some(m) => axis_value(m.as_str()),
            None => Some(1),
        };
        match (x, y) {
            (Some(x), Some(y)) if (1..=self.max).contains(&x) && (1..=self.max).contains(&y) => {
                Command::Coordinate(Coord::new(x, y))
            }
            _ => Command::Malformed,
        }
    }
}

/// Number or letter (`A` = 1) of one axis.
fn axis_value(token: &str) -> Option<u8> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some(c.to_ascii_uppercase() as u8 - b'A' + 1)
        }
        _ => token.parse().ok(),
    }
}

/// True for replies agreeing to a question (`yes`, `y`, `ok`, ...).
pub fn is_affirmative(text: &str) -> bool {
    let reply = text.trim().to_ascii_lowercase();
    AFFIRMATIVE.contains(&reply.as_str())
}

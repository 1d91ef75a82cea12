//! Game selection and the per-game rules descriptor.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The five games.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum GameKind {
    /// 3x3, three in a row.
    #[strum(to_string = "tictactoe", serialize = "tic-tac-toe")]
    TicTacToe,
    /// 7x6 with gravity, four in a row.
    #[strum(to_string = "connectfour", serialize = "connect-four")]
    ConnectFour,
    /// 8x8 flanking captures, most discs wins.
    #[strum(to_string = "reversi", serialize = "othello")]
    Reversi,
    /// 19x19 go with liberties and territory.
    #[strum(to_string = "weiqi", serialize = "go")]
    Weiqi,
    /// Two hidden 10x10 oceans, sink every ship.
    #[strum(to_string = "battleship")]
    Battleship,
}

/// Static description of one game: board size, turn bound and the symbols
/// shown for each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Columns.
    pub width: u8,
    /// Rows.
    pub height: u8,
    /// Upper bound of loop iterations in a session.
    pub max_turns: u32,
    /// Display symbol for seat one and seat two.
    pub symbols: [&'static str; 2],
    /// Whether the session runs against a wall-clock limit.
    pub timed: bool,
}

impl GameKind {
    /// Rules descriptor for this game.
    #[instrument]
    pub fn rules(self) -> GameRules {
        match self {
            GameKind::TicTacToe => GameRules {
                width: 3,
                height: 3,
                max_turns: 9,
                symbols: ["X", "O"],
                timed: false,
            },
            GameKind::ConnectFour => GameRules {
                width: 7,
                height: 6,
                max_turns: 42,
                symbols: ["Yellow", "Red"],
                timed: false,
            },
            GameKind::Reversi => GameRules {
                width: 8,
                height: 8,
                max_turns: 64,
                symbols: ["Black", "White"],
                timed: true,
            },
            GameKind::Weiqi => GameRules {
                width: 19,
                height: 19,
                max_turns: 500,
                symbols: ["Black", "White"],
                timed: true,
            },
            GameKind::Battleship => GameRules {
                width: 10,
                height: 10,
                max_turns: 200,
                symbols: ["Red", "Blue"],
                timed: false,
            },
        }
    }

    /// Display title.
    #[instrument]
    pub fn title(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::ConnectFour => "Connect-Four",
            GameKind::Reversi => "Reversi",
            GameKind::Weiqi => "Weiqi",
            GameKind::Battleship => "Battleship",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(GameKind::from_str("go").unwrap(), GameKind::Weiqi);
        assert_eq!(GameKind::from_str("Othello").unwrap(), GameKind::Reversi);
        assert_eq!(GameKind::from_str("tic-tac-toe").unwrap(), GameKind::TicTacToe);
        assert!(GameKind::from_str("chess").is_err());
    }

    #[test]
    fn test_display_is_store_key() {
        assert_eq!(GameKind::ConnectFour.to_string(), "connectfour");
        assert_eq!(GameKind::Weiqi.to_string(), "weiqi");
    }

    #[test]
    fn test_turn_bounds() {
        assert_eq!(GameKind::TicTacToe.rules().max_turns, 9);
        assert_eq!(GameKind::ConnectFour.rules().max_turns, 42);
        assert_eq!(GameKind::Reversi.rules().max_turns, 64);
    }
}

//! The five games as session variants.

mod battleship;
mod connect_four;
mod reversi;
mod tictactoe;
mod weiqi;

use tracing::instrument;
use versus_rules::GameKind;

use crate::session::GameVariant;

pub use battleship::Battleship;
pub use connect_four::ConnectFour;
pub use reversi::Reversi;
pub use tictactoe::TicTacToe;
pub use weiqi::Weiqi;

/// Fresh variant with an empty board for `kind`.
#[instrument]
pub fn variant_for(kind: GameKind) -> Box<dyn GameVariant> {
    match kind {
        GameKind::TicTacToe => Box::new(TicTacToe::default()),
        GameKind::ConnectFour => Box::new(ConnectFour::default()),
        GameKind::Reversi => Box::new(Reversi::default()),
        GameKind::Weiqi => Box::new(Weiqi::default()),
        GameKind::Battleship => Box::new(Battleship::default()),
    }
}

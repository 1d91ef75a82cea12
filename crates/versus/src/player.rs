//! Chat members and their per-session roles.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use versus_rules::{GameKind, Seat};

/// Unique identifier of a chat member.
pub type PlayerId = String;

/// A chat member as the messenger knows them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new, derive_more::Display)]
#[display("{name}")]
pub struct Member {
    /// Stable identifier.
    id: PlayerId,
    /// Display name.
    name: String,
}

impl Member {
    /// A member whose id is their name, as on the console.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }
}

/// A member seated in one session: seat, symbol and colour name.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_more::Display)]
#[display("{member}")]
pub struct Player {
    member: Member,
    seat: Seat,
    #[getter(skip)]
    symbol: &'static str,
}

impl Player {
    /// Seats `member` in `seat` of a `kind` session.
    #[instrument(skip(member), fields(player_id = %member.id()))]
    pub fn seated(member: Member, kind: GameKind, seat: Seat) -> Self {
        let symbol = kind.rules().symbols[seat.index()];
        Self {
            member,
            seat,
            symbol,
        }
    }

    /// Both players of a session; `first` moves first.
    pub fn pair(kind: GameKind, first: Member, second: Member) -> [Player; 2] {
        [
            Player::seated(first, kind, Seat::One),
            Player::seated(second, kind, Seat::Two),
        ]
    }

    /// Colour or mark of the seat.
    pub fn symbol(&self) -> &&'static str {
        &self.symbol
    }

    /// Identifier of the member.
    pub fn id(&self) -> &str {
        self.member.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_follow_seat() {
        let [one, two] = Player::pair(GameKind::ConnectFour, Member::named("ann"), Member::named("bo"));
        assert_eq!(*one.symbol(), "Yellow");
        assert_eq!(*two.symbol(), "Red");
        assert_eq!(*two.seat(), Seat::Two);
        assert_eq!(one.to_string(), "ann");
    }
}

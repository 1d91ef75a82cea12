//! Weiqi (go): liberties, captures, prisoners and territory.
//!
//! Groups and territory regions are found with an explicit worklist over arena
//! indices. Neighbours come from [`Grid::neighbors`]; squares keep no links.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument};

use crate::{Board, Coord, GameKind, Grid, Marker, MoveEffect, Score, Seat, WinResult};

/// Side length of a standard board.
pub const SIZE: u8 = 19;

/// Capture passes after which the blocked set is cleared.
const KO_WINDOW: u8 = 3;

/// A maximal 4-connected set of squares holding the same marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Arena indices of the members.
    pub members: Vec<usize>,
    /// True when a member touches an empty square.
    pub has_liberty: bool,
}

/// Weiqi board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeiqiBoard {
    grid: Grid,
    unliberated: HashSet<usize>,
    passes_since_clear: u8,
    prisoners: [usize; 2],
}

impl WeiqiBoard {
    /// Creates an empty 19x19 board.
    pub fn new() -> Self {
        Self::with_size(SIZE)
    }

    /// Creates an empty square board of the given side length.
    #[instrument]
    pub fn with_size(size: u8) -> Self {
        Self {
            grid: Grid::new(size, size),
            unliberated: HashSet::new(),
            passes_since_clear: 0,
            prisoners: [0, 0],
        }
    }

    /// Writes a marker directly, without a capture pass. Used to seed positions.
    pub fn seed(&mut self, at: Coord, marker: Marker) {
        self.grid.set(at, marker);
    }

    /// Stones captured by `seat` so far.
    pub fn prisoners(&self, seat: Seat) -> usize {
        self.prisoners[seat.index()]
    }

    /// True when `at` is blocked by the ko window.
    pub fn is_blocked(&self, at: Coord) -> bool {
        self.grid
            .index(at)
            .is_some_and(|i| self.unliberated.contains(&i))
    }

    /// The group containing arena index `start`.
    pub fn group(&self, start: usize) -> Group {
        let marker = self.grid.at_index(start);
        let mut seen = HashSet::from([start]);
        let mut worklist = vec![start];
        let mut has_liberty = false;
        while let Some(index) = worklist.pop() {
            for next in self.grid.neighbors(index) {
                let m = self.grid.at_index(next);
                if m.is_empty() {
                    has_liberty = true;
                }
                if m == marker && seen.insert(next) {
                    worklist.push(next);
                }
            }
        }
        let mut members: Vec<usize> = seen.into_iter().collect();
        members.sort_unstable();
        Group {
            members,
            has_liberty,
        }
    }

    /// Every libertyless group on the board, both colours, from one scan.
    fn dead_groups(&self) -> Vec<(Seat, Group)> {
        let mut checked = HashSet::new();
        let mut dead = Vec::new();
        for index in 0..self.grid.len() {
            let Marker::Stone(owner) = self.grid.at_index(index) else {
                continue;
            };
            if checked.contains(&index) {
                continue;
            }
            let group = self.group(index);
            checked.extend(group.members.iter().copied());
            if !group.has_liberty {
                dead.push((owner, group));
            }
        }
        dead
    }

    /// Removes every libertyless group after a placement.
    ///
    /// Liberties are read from the board as it stands before anything is
    /// removed, so a capturing stone that has no liberty of its own dies with
    /// its victims. Each removed stone is a prisoner for the other colour.
    /// Removed squares join the ko set, which is cleared at the start of the
    /// pass once the window has elapsed.
    fn capture_pass(&mut self) -> Vec<Coord> {
        if self.passes_since_clear == KO_WINDOW {
            self.unliberated.clear();
            self.passes_since_clear = 0;
        }
        let mut captured = Vec::new();
        for (victim, group) in self.dead_groups() {
            for index in group.members {
                self.grid.set_index(index, Marker::Empty);
                self.unliberated.insert(index);
                self.prisoners[victim.other().index()] += 1;
                captured.push(self.grid.coord(index));
            }
        }
        captured.sort_unstable();
        self.passes_since_clear += 1;
        captured
    }

    /// Empty squares enclosed by exactly one colour, per seat.
    pub fn territory(&self) -> Score {
        let mut checked = HashSet::new();
        let mut score = Score::default();
        for start in 0..self.grid.len() {
            if !self.grid.at_index(start).is_empty() || !checked.insert(start) {
                continue;
            }
            let mut region = 1usize;
            let mut borders = [false, false];
            let mut worklist = vec![start];
            while let Some(index) = worklist.pop() {
                for next in self.grid.neighbors(index) {
                    match self.grid.at_index(next) {
                        Marker::Empty => {
                            if checked.insert(next) {
                                region += 1;
                                worklist.push(next);
                            }
                        }
                        Marker::Stone(seat) => borders[seat.index()] = true,
                        _ => {}
                    }
                }
            }
            match borders {
                [true, false] => score.one += region,
                [false, true] => score.two += region,
                _ => {}
            }
        }
        score
    }

    /// Stones on board plus territory plus prisoners, per seat.
    pub fn score(&self) -> Score {
        let territory = self.territory();
        Score {
            one: self.grid.count(Marker::Stone(Seat::One)) + territory.one + self.prisoners[0],
            two: self.grid.count(Marker::Stone(Seat::Two)) + territory.two + self.prisoners[1],
        }
    }
}

impl Default for WeiqiBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for WeiqiBoard {
    fn kind(&self) -> GameKind {
        GameKind::Weiqi
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn is_valid_square(&self, at: Coord, _seat: Seat) -> bool {
        self.grid.get(at) == Some(Marker::Empty) && !self.is_blocked(at)
    }

    #[instrument(skip(self))]
    fn set_square(&mut self, at: Coord, seat: Seat) -> MoveEffect {
        self.grid.set(at, Marker::Stone(seat));
        let captured = self.capture_pass();
        if !captured.is_empty() {
            debug!(count = captured.len(), "Stones captured");
        }
        MoveEffect::Captured { at, captured }
    }

    fn check_win(&self) -> WinResult {
        WinResult::Score(self.score())
    }
}

impl fmt::Display for WeiqiBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.render_with(
            f,
            |at, m| match m {
                Marker::Stone(Seat::One) => 'B',
                Marker::Stone(Seat::Two) => 'W',
                _ if self.is_blocked(at) => ',',
                _ => '+',
            },
            |x| (x % 10).to_string(),
        )
    }
}

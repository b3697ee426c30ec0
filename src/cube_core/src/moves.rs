//! Face turns and the quarter-turn tables that drive them.
//!
//! Every face has one clockwise quarter turn, described as a 4-cycle of
//! corner slots and a 4-cycle of edge slots together with the orientation
//! change picked up on each step of the cycle. Double and inverse turns are
//! the quarter turn applied two and three times.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cubie::Cube, face::Face};

/// How far a face is turned
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// A clockwise quarter turn, written without a suffix
    Clockwise,
    /// A half turn, written with a `2` suffix
    Double,
    /// A counterclockwise quarter turn, written with a `'` suffix
    CounterClockwise,
}

impl Turn {
    pub const ALL: [Self; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Double];

    /// The number of clockwise quarter turns equivalent to this turn
    pub fn quarter_turns(self) -> usize {
        match self {
            Turn::Clockwise => 1,
            Turn::Double => 2,
            Turn::CounterClockwise => 3,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Double => "2",
            Turn::CounterClockwise => "'",
        }
    }

    #[must_use]
    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::Double => Turn::Double,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// A move token such as `U`, `R'` or `F2`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// All 18 face turns
    pub const ALL: [Move; 18] = {
        let mut moves = [Move::new(Face::U, Turn::Clockwise); 18];
        let mut i = 0;
        while i < 18 {
            let face = Face::ALL[i / 3];
            let turn = Turn::ALL[i % 3];
            moves[i] = Move::new(face, turn);
            i += 1;
        }
        moves
    };

    pub const fn new(face: Face, turn: Turn) -> Move {
        Move { face, turn }
    }

    /// The move that undoes this one
    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MoveParseError {
    #[error("Empty move")]
    Empty,
    #[error("Unknown face `{0}`, expected one of U, D, L, R, F, B")]
    UnknownFace(char),
    #[error("Unknown modifier `{0}`, expected nothing, `'` or `2`")]
    UnknownModifier(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(MoveParseError::Empty)?;
        let face = Face::from_letter(letter).ok_or(MoveParseError::UnknownFace(letter))?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Double,
            other => return Err(MoveParseError::UnknownModifier(other.to_owned())),
        };
        Ok(Move { face, turn })
    }
}

impl TryFrom<String> for Move {
    type Error = MoveParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

/// Parse a sequence of moves separated by whitespace and/or commas, such as
/// `"U, R' F2"`.
///
/// # Errors
///
/// The first token that is not a move.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, MoveParseError> {
    sequence
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// The moves that undo `moves`, in the order they must be applied
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

/// Render a sequence in standard notation, separated by spaces
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// One clockwise quarter turn of a face.
///
/// The cubie in `corners[i]` moves to `corners[(i + 1) % 4]` and its
/// orientation grows by `corner_twists[i]` (mod 3); edges likewise, with
/// `edge_flips[i]` taken mod 2.
struct QuarterTurn {
    corners: [u8; 4],
    corner_twists: [u8; 4],
    edges: [u8; 4],
    edge_flips: [u8; 4],
}

const fn quarter_turn(face: Face) -> &'static QuarterTurn {
    match face {
        Face::U => &QuarterTurn {
            // URF -> ULF -> ULB -> URB
            corners: [1, 0, 3, 2],
            corner_twists: [0, 0, 0, 0],
            // UF -> UL -> UB -> UR
            edges: [8, 11, 10, 9],
            edge_flips: [0, 0, 0, 0],
        },
        Face::D => &QuarterTurn {
            // DLF -> DRF -> DRB -> DLB
            corners: [4, 5, 6, 7],
            corner_twists: [0, 0, 0, 0],
            // DF -> DR -> DB -> DL
            edges: [12, 13, 14, 15],
            edge_flips: [0, 0, 0, 0],
        },
        Face::L => &QuarterTurn {
            // ULB -> ULF -> DLF -> DLB
            corners: [3, 0, 4, 7],
            corner_twists: [2, 1, 2, 1],
            // UL -> FL -> DL -> BL
            edges: [11, 16, 15, 19],
            edge_flips: [0, 0, 0, 0],
        },
        Face::R => &QuarterTurn {
            // DRF -> URF -> URB -> DRB
            corners: [5, 1, 2, 6],
            corner_twists: [1, 2, 1, 2],
            // FR -> UR -> BR -> DR
            edges: [17, 9, 18, 13],
            edge_flips: [0, 0, 0, 0],
        },
        Face::F => &QuarterTurn {
            // ULF -> URF -> DRF -> DLF
            corners: [0, 1, 5, 4],
            corner_twists: [2, 1, 2, 1],
            // UF -> FR -> DF -> FL
            edges: [8, 17, 12, 16],
            edge_flips: [1, 1, 1, 1],
        },
        Face::B => &QuarterTurn {
            // URB -> ULB -> DLB -> DRB
            corners: [2, 3, 7, 6],
            corner_twists: [2, 1, 2, 1],
            // UB -> BL -> DB -> BR
            edges: [10, 19, 14, 18],
            edge_flips: [1, 1, 1, 1],
        },
    }
}

/// The corner and edge slots a turn of `face` moves
pub fn affected_slots(face: Face) -> ([u8; 4], [u8; 4]) {
    let qt = quarter_turn(face);
    (qt.corners, qt.edges)
}

fn apply_quarter_turn(cube: &Cube, face: Face) -> Cube {
    let qt = quarter_turn(face);
    let before = cube.cubies();
    let mut after = *before;

    for (cycle, deltas) in [(qt.corners, qt.corner_twists), (qt.edges, qt.edge_flips)] {
        for i in 0..4 {
            let from = cycle[i];
            let to = cycle[(i + 1) % 4];
            // Always read from `before` so no slot sees a half-applied cycle
            after[usize::from(to)] = before[usize::from(from)].moved_to(to, deltas[i]);
        }
    }

    Cube::from_slots(after)
}

/// Apply one move, returning the new cube. The input is left untouched.
#[must_use]
pub fn apply_move(cube: &Cube, mv: Move) -> Cube {
    debug!(target: "moves", "Applying {mv}");
    let mut result = cube.clone();
    for _ in 0..mv.turn.quarter_turns() {
        result = apply_quarter_turn(&result, mv.face);
    }
    result
}

/// Apply a move given in notation. An unknown token logs a warning and
/// returns the cube unchanged.
#[must_use]
pub fn apply_move_str(cube: &Cube, token: &str) -> Cube {
    match token.parse::<Move>() {
        Ok(mv) => apply_move(cube, mv),
        Err(e) => {
            warn!(target: "moves", "Unknown move {token:?}: {e}");
            cube.clone()
        }
    }
}

/// Apply moves left to right
#[must_use]
pub fn apply_sequence<'a>(cube: &Cube, moves: impl IntoIterator<Item = &'a Move>) -> Cube {
    moves
        .into_iter()
        .fold(cube.clone(), |cube, &mv| apply_move(&cube, mv))
}

impl Cube {
    /// See [`apply_move`]
    #[must_use]
    pub fn apply(&self, mv: Move) -> Cube {
        apply_move(self, mv)
    }
}

//! A 3x3x3 Rubik's Cube simulation: 26 cubies, the 18 face turns, random
//! scrambles, and the projection of cubies into 3D space for rendering.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

pub mod cubie;
pub mod face;
pub mod history;
pub mod moves;
pub mod scramble;
pub mod transforms;

pub use cubie::{CUBIE_COUNT, Cube, CubeStateError, Cubie, CubieKind};
pub use face::{Color, Face};
pub use history::{CubeSession, MoveHistory};
pub use moves::{
    Move, MoveParseError, Turn, apply_move, apply_move_str, apply_sequence, format_sequence,
    invert_sequence, parse_sequence,
};
pub use scramble::{DEFAULT_SCRAMBLE_LENGTH, generate_shuffle_sequence};

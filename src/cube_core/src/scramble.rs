use log::debug;

use crate::{
    cubie::Cube,
    face::Face,
    moves::{Move, Turn, apply_sequence},
};

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Generate `length` random moves, never turning the same face twice in a
/// row. Opposite faces may still alternate (`U D U`).
pub fn generate_shuffle_sequence(length: usize) -> Vec<Move> {
    generate_shuffle_sequence_with(&mut fastrand::Rng::new(), length)
}

/// Like [`generate_shuffle_sequence`], drawing from a caller supplied
/// generator so a seed reproduces the same scramble.
pub fn generate_shuffle_sequence_with(rng: &mut fastrand::Rng, length: usize) -> Vec<Move> {
    let mut sequence: Vec<Move> = Vec::with_capacity(length);

    for _ in 0..length {
        let last_face = sequence.last().map(|mv| mv.face);
        let mv = loop {
            let face = Face::ALL[rng.usize(..Face::ALL.len())];
            let turn = Turn::ALL[rng.usize(..Turn::ALL.len())];
            if Some(face) != last_face {
                break Move::new(face, turn);
            }
        };
        sequence.push(mv);
    }

    debug!(target: "scramble", "Generated a scramble of {length} moves");
    sequence
}

/// A freshly scrambled cube along with the moves that produced it
pub fn scrambled_cube(rng: &mut fastrand::Rng, length: usize) -> (Cube, Vec<Move>) {
    let moves = generate_shuffle_sequence_with(rng, length);
    (apply_sequence(&Cube::solved(), &moves), moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_face_repeats_back_to_back() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let sequence = generate_shuffle_sequence_with(&mut rng, 30);
            assert_eq!(sequence.len(), 30);
            for pair in sequence.windows(2) {
                assert_ne!(pair[0].face, pair[1].face, "{pair:?}");
            }
        }
    }

    #[test]
    fn seeded_scrambles_repeat() {
        let a = generate_shuffle_sequence_with(&mut fastrand::Rng::with_seed(42), 20);
        let b = generate_shuffle_sequence_with(&mut fastrand::Rng::with_seed(42), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn default_length_and_edge_lengths() {
        assert_eq!(
            generate_shuffle_sequence(DEFAULT_SCRAMBLE_LENGTH).len(),
            DEFAULT_SCRAMBLE_LENGTH
        );
        assert!(generate_shuffle_sequence(0).is_empty());
        assert_eq!(generate_shuffle_sequence(1).len(), 1);
    }

    #[test]
    fn every_face_and_turn_shows_up() {
        let mut rng = fastrand::Rng::with_seed(3);
        let sequence = generate_shuffle_sequence_with(&mut rng, 500);
        for face in Face::ALL {
            assert!(sequence.iter().any(|mv| mv.face == face));
        }
        for turn in Turn::ALL {
            assert!(sequence.iter().any(|mv| mv.turn == turn));
        }
    }

    #[test]
    fn scrambled_cubes_stay_valid() {
        let mut rng = fastrand::Rng::with_seed(11);
        let (cube, moves) = scrambled_cube(&mut rng, 25);
        assert_eq!(moves.len(), 25);
        assert_eq!(cube.validate(), Ok(()));
    }
}

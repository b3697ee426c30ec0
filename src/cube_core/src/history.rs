use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    cubie::Cube,
    moves::{Move, MoveParseError, apply_move},
    scramble::generate_shuffle_sequence_with,
};

/// Undo and redo stacks of applied moves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    done: Vec<Move>,
    undone: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> MoveHistory {
        MoveHistory::default()
    }

    /// Record a freshly applied move. This forgets anything that could have
    /// been redone.
    pub fn record(&mut self, mv: Move) {
        self.done.push(mv);
        self.undone.clear();
    }

    /// Pop the last applied move, returning the move that reverts it
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.done.pop()?;
        self.undone.push(mv);
        Some(mv.inverse())
    }

    /// Pop the last undone move, returning the move to apply again
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.undone.pop()?;
        self.done.push(mv);
        Some(mv)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// The moves applied so far, oldest first
    pub fn applied(&self) -> &[Move] {
        &self.done
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}

/// The single owner of the cube state and its history. Every mutation
/// replaces the cube with a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeSession {
    cube: Cube,
    history: MoveHistory,
}

impl CubeSession {
    pub fn new() -> CubeSession {
        CubeSession::default()
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn apply(&mut self, mv: Move) {
        self.cube = apply_move(&self.cube, mv);
        self.history.record(mv);
    }

    /// Apply a move written in notation.
    ///
    /// # Errors
    ///
    /// If `token` is not a move. The session is left unchanged.
    pub fn apply_str(&mut self, token: &str) -> Result<Move, MoveParseError> {
        let mv = token.parse()?;
        self.apply(mv);
        Ok(mv)
    }

    /// Revert the last move. Returns the move that was applied to do so.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.undo()?;
        debug!(target: "session", "Undo with {mv}");
        self.cube = apply_move(&self.cube, mv);
        Some(mv)
    }

    /// Reapply the last undone move
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.history.redo()?;
        debug!(target: "session", "Redo {mv}");
        self.cube = apply_move(&self.cube, mv);
        Some(mv)
    }

    /// Return to the solved cube with an empty history
    pub fn reset(&mut self) {
        info!(target: "session", "Resetting the cube");
        self.cube = Cube::solved();
        self.history.clear();
    }

    /// Reset, then apply a random scramble of `length` moves. The scramble
    /// is not undoable.
    pub fn scramble(&mut self, rng: &mut fastrand::Rng, length: usize) -> Vec<Move> {
        let moves = generate_shuffle_sequence_with(rng, length);
        self.cube = moves
            .iter()
            .fold(Cube::solved(), |cube, &mv| apply_move(&cube, mv));
        self.history.clear();
        info!(target: "session", "Scrambled with {length} moves");
        moves
    }

    pub fn is_solved(&self) -> bool {
        self.cube.is_solved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{face::Face, moves::Turn};

    #[test]
    fn undo_redo_stacks() {
        let u = Move::new(Face::U, Turn::Clockwise);
        let r2 = Move::new(Face::R, Turn::Double);
        let mut history = MoveHistory::new();
        assert_eq!(history.undo(), None);

        history.record(u);
        history.record(r2);
        assert_eq!(history.undo(), Some(r2));
        assert_eq!(history.undo(), Some(u.inverse()));
        assert!(!history.can_undo());
        assert_eq!(history.redo(), Some(u));
        assert!(history.can_redo());

        history.record(r2);
        assert!(!history.can_redo());
        assert_eq!(history.applied(), [u, r2]);
    }

    #[test]
    fn session_undo_returns_to_solved() {
        let mut session = CubeSession::new();
        for token in ["R", "U'", "F2"] {
            session.apply_str(token).unwrap();
        }
        assert!(!session.is_solved());
        while session.undo().is_some() {}
        assert!(session.is_solved());

        session.redo();
        assert_eq!(session.cube(), &Cube::solved().apply("R".parse().unwrap()));
    }

    #[test]
    fn bad_tokens_leave_the_session_alone() {
        let mut session = CubeSession::new();
        assert!(session.apply_str("Z").is_err());
        assert!(session.is_solved());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn scramble_then_reset() {
        let mut session = CubeSession::new();
        let moves = session.scramble(&mut fastrand::Rng::with_seed(5), 20);
        assert_eq!(moves.len(), 20);
        assert!(!session.history().can_undo());
        assert_eq!(session.cube().validate(), Ok(()));

        session.reset();
        assert!(session.is_solved());
    }
}

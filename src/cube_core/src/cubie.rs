use std::ops::Range;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::face::{Color, Face};

/// The number of cubies of a 3x3x3 cube that carry stickers
pub const CUBIE_COUNT: usize = 26;

/// The kind of a cubie. A cubie's kind never changes, and neither does the
/// range of slots it may occupy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubieKind {
    /// The corners orbit, slots 0..8.
    Corner,
    /// The edges orbit, slots 8..20.
    Edge,
    /// The centers, slots 20..26. Face turns never move them.
    Center,
}

impl CubieKind {
    pub const ALL: [Self; 3] = [CubieKind::Corner, CubieKind::Edge, CubieKind::Center];

    /// The slot indices cubies of this kind live in
    pub const fn slots(self) -> Range<u8> {
        match self {
            CubieKind::Corner => 0..8,
            CubieKind::Edge => 8..20,
            CubieKind::Center => 20..26,
        }
    }

    /// The number of distinct orientations. Corners twist three ways, edges
    /// flip two ways, centers only have one.
    pub const fn orientation_count(self) -> u8 {
        match self {
            CubieKind::Corner => 3,
            CubieKind::Edge => 2,
            CubieKind::Center => 1,
        }
    }

    /// The number of stickers on a cubie of this kind
    pub const fn sticker_count(self) -> usize {
        match self {
            CubieKind::Corner => 3,
            CubieKind::Edge => 2,
            CubieKind::Center => 1,
        }
    }

    /// The kind of cubie that lives in `slot`, or `None` past the last slot
    pub fn of_slot(slot: u8) -> Option<CubieKind> {
        CubieKind::ALL
            .into_iter()
            .find(|kind| kind.slots().contains(&slot))
    }

    pub fn contains(self, slot: u8) -> bool {
        self.slots().contains(&slot)
    }
}

// Each slot lists the faces it touches. Corner lists all go around the corner
// in the same rotational direction so that a twist is a cyclic shift. The first
// face of every corner and of every top/bottom edge is U or D; middle layer
// edges start with F or B.
const CORNER_FACES: [[Face; 3]; 8] = {
    use Face::*;
    [
        [U, L, F], // 0: ULF
        [U, F, R], // 1: URF
        [U, R, B], // 2: URB
        [U, B, L], // 3: ULB
        [D, F, L], // 4: DLF
        [D, R, F], // 5: DRF
        [D, B, R], // 6: DRB
        [D, L, B], // 7: DLB
    ]
};

const EDGE_FACES: [[Face; 2]; 12] = {
    use Face::*;
    [
        [U, F], // 8: UF
        [U, R], // 9: UR
        [U, B], // 10: UB
        [U, L], // 11: UL
        [D, F], // 12: DF
        [D, R], // 13: DR
        [D, B], // 14: DB
        [D, L], // 15: DL
        [F, L], // 16: FL
        [F, R], // 17: FR
        [B, R], // 18: BR
        [B, L], // 19: BL
    ]
};

/// The faces touched by `slot`, in sticker order.
///
/// # Panics
///
/// If `slot` is not a slot of `kind`.
pub fn slot_faces(kind: CubieKind, slot: u8) -> &'static [Face] {
    assert!(
        kind.contains(slot),
        "slot {slot} is out of range for a {kind:?} (expected {:?})",
        kind.slots()
    );
    let index = usize::from(slot - kind.slots().start);
    match kind {
        CubieKind::Corner => &CORNER_FACES[index],
        CubieKind::Edge => &EDGE_FACES[index],
        CubieKind::Center => std::slice::from_ref(&Face::ALL[index]),
    }
}

/// One physical piece of the cube.
///
/// Cubies are plain values: a move produces new cubies instead of editing
/// the ones it was given.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CubieRepr", into = "CubieRepr")]
pub struct Cubie {
    kind: CubieKind,
    home: u8,
    position: u8,
    orientation: u8,
    // Only the first `kind.sticker_count()` entries are meaningful
    colors: [Color; 3],
}

impl Cubie {
    /// The cubie that belongs in `slot`, sitting there in its solved
    /// orientation.
    ///
    /// # Panics
    ///
    /// If `slot` is not a valid slot index.
    pub fn solved(slot: u8) -> Cubie {
        let kind = CubieKind::of_slot(slot)
            .unwrap_or_else(|| panic!("slot {slot} is out of range (expected 0..26)"));
        let faces = slot_faces(kind, slot);
        let mut colors = [faces[0].home_color(); 3];
        for (color, face) in colors.iter_mut().zip(faces) {
            *color = face.home_color();
        }

        Cubie {
            kind,
            home: slot,
            position: slot,
            orientation: 0,
            colors,
        }
    }

    pub fn kind(&self) -> CubieKind {
        self.kind
    }

    /// The slot this cubie occupies on a solved cube. This doubles as the
    /// identity of the piece.
    pub fn home(&self) -> u8 {
        self.home
    }

    /// The slot this cubie currently occupies
    pub fn position(&self) -> u8 {
        self.position
    }

    /// How far the cubie is twisted (corners, mod 3) or flipped (edges,
    /// mod 2) relative to its slot's reference face. Always 0 for centers.
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// The sticker colors, in the order of the home slot's faces
    pub fn colors(&self) -> &[Color] {
        &self.colors[..self.kind.sticker_count()]
    }

    /// Whether the cubie sits in its home slot with its home orientation
    pub fn is_home(&self) -> bool {
        self.position == self.home && self.orientation == 0
    }

    /// A copy of this cubie carried to `position` with its orientation
    /// advanced by `delta`.
    pub(crate) fn moved_to(self, position: u8, delta: u8) -> Cubie {
        debug_assert!(self.kind.contains(position));
        Cubie {
            position,
            orientation: (self.orientation + delta) % self.kind.orientation_count(),
            ..self
        }
    }
}

/// The serialized form of a cubie
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CubieRepr {
    kind: CubieKind,
    home: u8,
    position: u8,
    orientation: u8,
    colors: Vec<Color>,
}

impl From<Cubie> for CubieRepr {
    fn from(value: Cubie) -> Self {
        CubieRepr {
            kind: value.kind,
            home: value.home,
            position: value.position,
            orientation: value.orientation,
            colors: value.colors().to_vec(),
        }
    }
}

impl TryFrom<CubieRepr> for Cubie {
    type Error = CubeStateError;

    fn try_from(value: CubieRepr) -> Result<Self, Self::Error> {
        let CubieRepr {
            kind,
            home,
            position,
            orientation,
            colors,
        } = value;

        for slot in [home, position] {
            if !kind.contains(slot) {
                return Err(CubeStateError::SlotOutOfRange { kind, slot });
            }
        }
        if orientation >= kind.orientation_count() {
            return Err(CubeStateError::OrientationOutOfRange {
                kind,
                orientation,
                expected: kind.orientation_count(),
            });
        }

        let cubie = Cubie {
            position,
            orientation,
            ..Cubie::solved(home)
        };
        if cubie.colors() != colors.as_slice() {
            return Err(CubeStateError::ColorMismatch { home });
        }

        Ok(cubie)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CubeStateError {
    #[error("Invalid cubie count, expected {CUBIE_COUNT} cubies but got {actual}")]
    InvalidCubieCount { actual: usize },
    #[error("Slot {slot} is out of range for a {kind:?}")]
    SlotOutOfRange { kind: CubieKind, slot: u8 },
    #[error("Invalid orientation {orientation} for a {kind:?}, expected a value below {expected}")]
    OrientationOutOfRange {
        kind: CubieKind,
        orientation: u8,
        expected: u8,
    },
    #[error("The colors of the cubie from slot {home} do not match that slot")]
    ColorMismatch { home: u8 },
    #[error("Slot {0} is occupied more than once")]
    DuplicatePosition(u8),
    #[error("The cubie from slot {0} appears more than once")]
    DuplicatePiece(u8),
    #[error("The center of slot {0} has moved")]
    CenterMoved(u8),
    #[error("Total corner twist is {0}, which is not a multiple of 3")]
    CornerTwist(u8),
    #[error("Total edge flip is {0}, which is not a multiple of 2")]
    EdgeFlip(u8),
    #[error("Corner and edge permutations have different parities")]
    ParityMismatch,
}

/// The full state of a cube: 26 cubies, stored by the slot they occupy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cubie>", into = "Vec<Cubie>")]
pub struct Cube {
    cubies: [Cubie; CUBIE_COUNT],
}

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

impl Cube {
    /// The solved cube: every cubie in its home slot and orientation
    #[allow(clippy::cast_possible_truncation)]
    pub fn solved() -> Cube {
        Cube {
            cubies: std::array::from_fn(|slot| Cubie::solved(slot as u8)),
        }
    }

    /// Callers must uphold `cubies[i].position() == i`
    pub(crate) fn from_slots(cubies: [Cubie; CUBIE_COUNT]) -> Cube {
        debug_assert!(
            cubies
                .iter()
                .enumerate()
                .all(|(slot, cubie)| usize::from(cubie.position) == slot)
        );
        Cube { cubies }
    }

    /// All cubies, indexed by the slot they occupy
    pub fn cubies(&self) -> &[Cubie; CUBIE_COUNT] {
        &self.cubies
    }

    /// The cubie currently occupying `slot`
    ///
    /// # Panics
    ///
    /// If `slot` is not below `CUBIE_COUNT`.
    pub fn cubie_at(&self, slot: u8) -> &Cubie {
        &self.cubies[usize::from(slot)]
    }

    /// The cubies of one kind, in slot order
    pub fn cubies_of(&self, kind: CubieKind) -> impl Iterator<Item = &Cubie> {
        let slots = kind.slots();
        self.cubies[usize::from(slots.start)..usize::from(slots.end)].iter()
    }

    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(Cubie::is_home)
    }

    /// Sum of corner twists mod 3. Zero on any reachable state.
    pub fn corner_twist(&self) -> u8 {
        self.orientation_sum(CubieKind::Corner)
    }

    /// Sum of edge flips mod 2. Zero on any reachable state.
    pub fn edge_flip(&self) -> u8 {
        self.orientation_sum(CubieKind::Edge)
    }

    fn orientation_sum(&self, kind: CubieKind) -> u8 {
        self.cubies_of(kind)
            .fold(0, |acc, cubie| (acc + cubie.orientation) % kind.orientation_count())
    }

    /// Whether the arrangement of `kind` is an odd permutation of its slots
    fn is_odd_permutation(&self, kind: CubieKind) -> bool {
        let first_slot = kind.slots().start;
        let homes = self
            .cubies_of(kind)
            .map(|cubie| usize::from(cubie.home - first_slot))
            .collect_vec();

        // Parity = (number of elements - number of cycles) mod 2
        let mut seen = vec![false; homes.len()];
        let mut transpositions = 0;
        for cycle_start in 0..homes.len() {
            let mut at = cycle_start;
            let mut cycle_len = 0;
            while !seen[at] {
                seen[at] = true;
                at = homes[at];
                cycle_len += 1;
            }
            if cycle_len > 0 {
                transpositions += cycle_len - 1;
            }
        }
        transpositions % 2 == 1
    }

    /// Check that this is a state reachable from the solved cube by face
    /// turns.
    ///
    /// # Errors
    ///
    /// The first broken invariant found, see `CubeStateError`.
    pub fn validate(&self) -> Result<(), CubeStateError> {
        let mut seen_pieces = [false; CUBIE_COUNT];
        for (slot, cubie) in self.cubies.iter().enumerate() {
            if usize::from(cubie.position) != slot {
                return Err(CubeStateError::DuplicatePosition(cubie.position));
            }
            if !cubie.kind.contains(cubie.position) {
                return Err(CubeStateError::SlotOutOfRange {
                    kind: cubie.kind,
                    slot: cubie.position,
                });
            }
            if std::mem::replace(&mut seen_pieces[usize::from(cubie.home)], true) {
                return Err(CubeStateError::DuplicatePiece(cubie.home));
            }
            if cubie.kind == CubieKind::Center && cubie.home != cubie.position {
                return Err(CubeStateError::CenterMoved(cubie.home));
            }
        }

        match (self.corner_twist(), self.edge_flip()) {
            (0, 0) => {}
            (0, flip) => return Err(CubeStateError::EdgeFlip(flip)),
            (twist, _) => return Err(CubeStateError::CornerTwist(twist)),
        }

        if self.is_odd_permutation(CubieKind::Corner) != self.is_odd_permutation(CubieKind::Edge) {
            return Err(CubeStateError::ParityMismatch);
        }

        Ok(())
    }
}

impl From<Cube> for Vec<Cubie> {
    fn from(value: Cube) -> Self {
        value.cubies.to_vec()
    }
}

impl TryFrom<Vec<Cubie>> for Cube {
    type Error = CubeStateError;

    fn try_from(value: Vec<Cubie>) -> Result<Self, Self::Error> {
        if value.len() != CUBIE_COUNT {
            return Err(CubeStateError::InvalidCubieCount {
                actual: value.len(),
            });
        }

        let mut slots: [Option<Cubie>; CUBIE_COUNT] = [None; CUBIE_COUNT];
        for cubie in value {
            let slot = &mut slots[usize::from(cubie.position)];
            if slot.replace(cubie).is_some() {
                return Err(CubeStateError::DuplicatePosition(cubie.position));
            }
        }

        let filled = slots.into_iter().flatten().collect_vec();
        let cubies = <[Cubie; CUBIE_COUNT]>::try_from(filled).map_err(|filled| {
            CubeStateError::InvalidCubieCount {
                actual: filled.len(),
            }
        })?;
        let cube = Cube { cubies };
        cube.validate()?;
        Ok(cube)
    }
}

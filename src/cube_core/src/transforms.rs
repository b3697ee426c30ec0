//! Mapping cubies into 3D space for rendering.
//!
//! Slots are placed on a `{-1, 0, 1}³` lattice with `x` to the right, `y`
//! up and the front face at `z = -1`. Screen translations flip `y` so that
//! down is positive.

use std::fmt::Display;

use crate::{
    cubie::{Cube, Cubie, CubieKind, slot_faces},
    face::{Color, Face},
};

/// Edge length of the whole cube in pixels
pub const CUBE_SIZE_PX: f64 = 200.0;

/// A slot's position on the lattice
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LatticeCoords {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

/// A translation in pixels
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Where a cubie is drawn
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubieTransform {
    pub translate: Translate,
}

impl Display for CubieTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Translate { x, y, z } = self.translate;
        write!(f, "translateX({x}px) translateY({y}px) translateZ({z}px)")
    }
}

/// The lattice position of `slot`, which must be a slot of `kind`. Every
/// slot sits at the sum of the normals of the faces it touches.
///
/// # Panics
///
/// If `slot` is not a slot of `kind`.
pub fn slot_coords(kind: CubieKind, slot: u8) -> LatticeCoords {
    let [x, y, z] = slot_faces(kind, slot)
        .iter()
        .map(|face| face.normal())
        .fold([0, 0, 0], |[x, y, z], [dx, dy, dz]| [x + dx, y + dy, z + dz]);
    LatticeCoords { x, y, z }
}

/// The lattice position of the slot `cubie` currently occupies
pub fn position_coords(cubie: &Cubie) -> LatticeCoords {
    slot_coords(cubie.kind(), cubie.position())
}

/// Scales lattice positions to pixels for a cube of a given size
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projector {
    cube_size_px: f64,
}

impl Default for Projector {
    fn default() -> Self {
        Projector::new(CUBE_SIZE_PX)
    }
}

impl Projector {
    pub fn new(cube_size_px: f64) -> Projector {
        Projector { cube_size_px }
    }

    pub fn cube_size_px(&self) -> f64 {
        self.cube_size_px
    }

    /// The width of one cubie in pixels
    pub fn unit_px(&self) -> f64 {
        self.cube_size_px / 3.0
    }

    pub fn translate(&self, coords: LatticeCoords) -> Translate {
        let unit = self.unit_px();
        Translate {
            x: f64::from(coords.x) * unit,
            y: f64::from(-coords.y) * unit,
            z: f64::from(coords.z) * unit,
        }
    }

    pub fn cubie_transform(&self, cubie: &Cubie) -> CubieTransform {
        CubieTransform {
            translate: self.translate(position_coords(cubie)),
        }
    }
}

/// Pixel translation of a lattice position on a cube of `CUBE_SIZE_PX`
pub fn coords_to_translate(coords: LatticeCoords) -> Translate {
    Projector::default().translate(coords)
}

/// How to draw `cubie` on a cube of `CUBE_SIZE_PX`
pub fn cubie_transform(cubie: &Cubie) -> CubieTransform {
    Projector::default().cubie_transform(cubie)
}

/// The color visible in each direction from a single cubie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceColors([Option<Color>; 6]);

impl FaceColors {
    pub fn get(&self, face: Face) -> Option<Color> {
        self.0[face as usize]
    }

    /// The visible stickers, in `Face::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Face, Color)> + '_ {
        Face::ALL
            .into_iter()
            .filter_map(|face| self.get(face).map(|color| (face, color)))
    }

    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which color `cubie` shows in each direction. Sticker `i` lands on face
/// `(i + orientation) mod n` of the occupied slot, so twisting a corner or
/// flipping an edge rotates its colors around the slot.
pub fn cubie_faces(cubie: &Cubie) -> FaceColors {
    let faces = slot_faces(cubie.kind(), cubie.position());
    let orientation = usize::from(cubie.orientation());
    let mut out = FaceColors::default();
    for (i, &color) in cubie.colors().iter().enumerate() {
        out.0[faces[(i + orientation) % faces.len()] as usize] = Some(color);
    }
    out
}

/// The nine stickers of `face` as seen from outside the cube.
///
/// U is seen with B at the top, D with F at the top and the side faces
/// upright.
pub fn face_grid(cube: &Cube, face: Face) -> [[Color; 3]; 3] {
    let mut grid = [[face.home_color(); 3]; 3];
    for cubie in cube.cubies() {
        let Some(color) = cubie_faces(cubie).get(face) else {
            continue;
        };
        let LatticeCoords { x, y, z } = position_coords(cubie);
        let (row, col) = match face {
            Face::U => (1 - z, x + 1),
            Face::D => (z + 1, x + 1),
            Face::F => (1 - y, x + 1),
            Face::B => (1 - y, 1 - x),
            Face::R => (1 - y, z + 1),
            Face::L => (1 - y, 1 - z),
        };
        grid[usize::from(row.unsigned_abs())][usize::from(col.unsigned_abs())] = color;
    }
    grid
}

/// Euler angles in degrees, applied about x, then y, then z
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub x_deg: i16,
    pub y_deg: i16,
    pub z_deg: i16,
}

impl Rotation {
    const fn new(x_deg: i16, y_deg: i16, z_deg: i16) -> Rotation {
        Rotation {
            x_deg,
            y_deg,
            z_deg,
        }
    }

    /// Rotate a vector given in lattice space
    pub fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let (sin, cos) = f64::from(self.x_deg).to_radians().sin_cos();
        let [x, y, z] = [x, y * cos - z * sin, y * sin + z * cos];
        let (sin, cos) = f64::from(self.y_deg).to_radians().sin_cos();
        let [x, y, z] = [x * cos + z * sin, y, -x * sin + z * cos];
        let (sin, cos) = f64::from(self.z_deg).to_radians().sin_cos();
        [x * cos - y * sin, x * sin + y * cos, z]
    }
}

/// For each face, indexed by `Face as usize`, the rotation that turns a
/// sticker facing F so that it faces that face
pub const FACE_ROTATIONS: [Rotation; 6] = [
    Rotation::new(90, 0, 0),  // U
    Rotation::new(-90, 0, 0), // D
    Rotation::new(0, 90, 0),  // L
    Rotation::new(0, -90, 0), // R
    Rotation::new(0, 0, 0),   // F
    Rotation::new(0, 180, 0), // B
];

pub fn face_rotation(face: Face) -> Rotation {
    FACE_ROTATIONS[face as usize]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_slot_has_its_own_coordinates() {
        let mut seen = HashSet::new();
        for kind in CubieKind::ALL {
            for slot in kind.slots() {
                let coords = slot_coords(kind, slot);
                assert!(seen.insert(coords), "{kind:?} {slot} reuses {coords:?}");
                let nonzero = [coords.x, coords.y, coords.z]
                    .into_iter()
                    .filter(|&c| c != 0)
                    .count();
                assert_eq!(nonzero, kind.sticker_count());
            }
        }
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn known_slot_positions() {
        assert_eq!(
            slot_coords(CubieKind::Corner, 0),
            LatticeCoords { x: -1, y: 1, z: -1 }
        );
        assert_eq!(
            slot_coords(CubieKind::Edge, 18),
            LatticeCoords { x: 1, y: 0, z: 1 }
        );
        assert_eq!(
            slot_coords(CubieKind::Center, 24),
            LatticeCoords { x: 0, y: 0, z: -1 }
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn foreign_slot_panics() {
        slot_coords(CubieKind::Edge, 20);
    }

    #[test]
    fn translation_flips_y() {
        let t = coords_to_translate(LatticeCoords { x: 1, y: 1, z: -1 });
        let unit = CUBE_SIZE_PX / 3.0;
        assert_eq!(t, Translate { x: unit, y: -unit, z: -unit });

        let t = Projector::new(300.0).translate(LatticeCoords { x: -1, y: -1, z: 0 });
        assert_eq!(t, Translate { x: -100.0, y: 100.0, z: 0.0 });
    }

    #[test]
    fn transform_renders_css() {
        let cube = Cube::solved();
        let center = cubie_transform(cube.cubie_at(23));
        assert_eq!(
            center.to_string(),
            format!("translateX({}px) translateY(0px) translateZ(0px)", CUBE_SIZE_PX / 3.0)
        );
    }

    #[test]
    fn solved_faces_match_slots() {
        let cube = Cube::solved();
        let ulf = cubie_faces(cube.cubie_at(0));
        assert_eq!(ulf.len(), 3);
        assert_eq!(ulf.get(Face::U), Some(Color::White));
        assert_eq!(ulf.get(Face::L), Some(Color::Orange));
        assert_eq!(ulf.get(Face::F), Some(Color::Green));
        assert_eq!(ulf.get(Face::R), None);

        let center = cubie_faces(cube.cubie_at(21));
        assert_eq!(center.iter().collect::<Vec<_>>(), vec![(Face::D, Color::Yellow)]);
    }

    #[test]
    fn solved_grids_are_uniform() {
        let cube = Cube::solved();
        for face in Face::ALL {
            assert_eq!(face_grid(&cube, face), [[face.home_color(); 3]; 3]);
        }
    }

    #[test]
    fn face_rotations_turn_front_onto_each_face() {
        for face in Face::ALL {
            let [fx, fy, fz] = Face::F.normal().map(f64::from);
            let rotated = face_rotation(face).apply([fx, fy, fz]);
            let expected = face.normal().map(f64::from);
            for (a, b) in rotated.iter().zip(expected) {
                assert!((a - b).abs() < 1e-9, "{face:?}: {rotated:?}");
            }
        }
    }
}

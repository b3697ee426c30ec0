use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the six faces of the cube, which doubles as a direction in the
/// cube's frame of reference.
///
/// The discriminants match the order of the center slots (20..26).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, L, R, F, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The notation letter of the face
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    /// Look up a face from its notation letter. Lowercase letters are not
    /// face letters.
    pub fn from_letter(letter: char) -> Option<Face> {
        match letter {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    /// The outward unit normal of the face in lattice units. `y` points up
    /// and the front face sits at `z = -1`.
    pub fn normal(self) -> [i8; 3] {
        match self {
            Face::U => [0, 1, 0],
            Face::D => [0, -1, 0],
            Face::L => [-1, 0, 0],
            Face::R => [1, 0, 0],
            Face::F => [0, 0, -1],
            Face::B => [0, 0, 1],
        }
    }

    /// The sticker color this face shows when the cube is solved
    pub fn home_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::L => Color::Orange,
            Face::R => Color::Red,
            Face::F => Color::Green,
            Face::B => Color::Blue,
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Face::from_letter(letter).ok_or(()),
            _ => Err(()),
        }
    }
}

/// A sticker color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Self; 6] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Green,
        Color::Blue,
    ];

    /// The face that shows this color on a solved cube
    pub fn home_face(self) -> Face {
        match self {
            Color::White => Face::U,
            Color::Yellow => Face::D,
            Color::Orange => Face::L,
            Color::Red => Face::R,
            Color::Green => Face::F,
            Color::Blue => Face::B,
        }
    }

    /// A single character abbreviation, used by the terminal net
    pub fn initial(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_faces_have_opposite_normals() {
        for face in Face::ALL {
            let [x, y, z] = face.normal();
            assert_eq!(face.opposite().normal(), [-x, -y, -z]);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn colors_round_trip_through_faces() {
        for face in Face::ALL {
            assert_eq!(face.home_color().home_face(), face);
        }
    }

    #[test]
    fn parse_face_letters() {
        assert_eq!("R".parse(), Ok(Face::R));
        assert_eq!("r".parse::<Face>(), Err(()));
        assert_eq!("RU".parse::<Face>(), Err(()));
        assert_eq!("".parse::<Face>(), Err(()));
    }
}

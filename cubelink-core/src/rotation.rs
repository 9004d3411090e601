//! Face turns: commands, the quarter-turn permutation and slice matrices
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::cubie::{Axis, Direction, GridPos, Stickers};
use crate::error::ParseError;

/// Quarter-turn angle in radians
pub const QUARTER_TURN: f32 = std::f32::consts::FRAC_PI_2;

/// The six outer layers a command can turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Up,
        Face::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Face::Front | Face::Back => Axis::Z,
            Face::Right | Face::Left => Axis::X,
            Face::Up | Face::Down => Axis::Y,
        }
    }

    /// Coordinate of this face's layer along its axis
    pub fn layer(self) -> i8 {
        match self {
            Face::Front | Face::Right | Face::Up => 1,
            Face::Back | Face::Left | Face::Down => -1,
        }
    }

    /// Single-letter notation
    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'F' => Some(Face::Front),
            'B' => Some(Face::Back),
            'L' => Some(Face::Left),
            'R' => Some(Face::Right),
            'U' => Some(Face::Up),
            'D' => Some(Face::Down),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Up => "up",
            Face::Down => "down",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Face::from_letter(c).ok_or_else(|| ParseError::UnknownFace(s.to_string()));
        }
        Face::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownFace(s.to_string()))
    }
}

/// Turn direction, measured looking down the positive end of the face's axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Cw,
    Ccw,
}

impl TurnDirection {
    pub fn inverse(self) -> Self {
        match self {
            TurnDirection::Cw => TurnDirection::Ccw,
            TurnDirection::Ccw => TurnDirection::Cw,
        }
    }

    /// Sign of the animation angle; CCW is a right-handed rotation
    pub fn angle_sign(self) -> f32 {
        match self {
            TurnDirection::Cw => -1.0,
            TurnDirection::Ccw => 1.0,
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnDirection::Cw => f.write_str("CW"),
            TurnDirection::Ccw => f.write_str("CCW"),
        }
    }
}

impl FromStr for TurnDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cw" => Ok(TurnDirection::Cw),
            "ccw" => Ok(TurnDirection::Ccw),
            _ => Err(ParseError::UnknownDirection(s.to_string())),
        }
    }
}

/// A request to turn one face a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotationCommand {
    pub face: Face,
    pub direction: TurnDirection,
}

impl RotationCommand {
    pub fn new(face: Face, direction: TurnDirection) -> Self {
        Self { face, direction }
    }

    pub fn cw(face: Face) -> Self {
        Self::new(face, TurnDirection::Cw)
    }

    pub fn ccw(face: Face) -> Self {
        Self::new(face, TurnDirection::Ccw)
    }

    pub fn inverse(self) -> Self {
        Self::new(self.face, self.direction.inverse())
    }

    pub fn turn(self) -> SliceTurn {
        SliceTurn::new(self.face.axis(), self.direction)
    }
}

impl fmt::Display for RotationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.face, self.direction)
    }
}

/// Belt directions per axis in CW order; a CW turn moves each entry to the next
const BELTS: [[Direction; 4]; 3] = [
    // X
    [Direction::PosY, Direction::NegZ, Direction::NegY, Direction::PosZ],
    // Y
    [Direction::PosZ, Direction::NegX, Direction::NegZ, Direction::PosX],
    // Z
    [Direction::PosX, Direction::NegY, Direction::NegX, Direction::PosY],
];

/// A quarter turn about one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliceTurn {
    pub axis: Axis,
    pub direction: TurnDirection,
}

impl SliceTurn {
    pub fn new(axis: Axis, direction: TurnDirection) -> Self {
        Self { axis, direction }
    }

    pub fn inverse(self) -> Self {
        Self::new(self.axis, self.direction.inverse())
    }

    /// Rotate a grid position by 90° about the turn axis
    pub fn rotate_position(&self, pos: GridPos) -> GridPos {
        let GridPos { x, y, z } = pos;
        match (self.axis, self.direction) {
            (Axis::Z, TurnDirection::Ccw) => GridPos::new(-y, x, z),
            (Axis::Z, TurnDirection::Cw) => GridPos::new(y, -x, z),
            (Axis::X, TurnDirection::Ccw) => GridPos::new(x, -z, y),
            (Axis::X, TurnDirection::Cw) => GridPos::new(x, z, -y),
            (Axis::Y, TurnDirection::Ccw) => GridPos::new(z, y, -x),
            (Axis::Y, TurnDirection::Cw) => GridPos::new(-z, y, x),
        }
    }

    /// Where a side facing `direction` faces after the turn
    pub fn rotate_direction(&self, direction: Direction) -> Direction {
        let belt = &BELTS[self.axis.index()];
        match belt.iter().position(|d| *d == direction) {
            Some(i) => match self.direction {
                TurnDirection::Cw => belt[(i + 1) % 4],
                TurnDirection::Ccw => belt[(i + 3) % 4],
            },
            // On the turn axis
            None => direction,
        }
    }

    /// Remap a sticker table; absent sources leave their target absent
    pub fn rotate_stickers(&self, stickers: &Stickers) -> Stickers {
        stickers
            .iter()
            .map(|(direction, color)| (self.rotate_direction(direction), color))
            .collect()
    }

    /// Rotation matrix for an in-flight slice at `angle` radians about `axis`
    pub fn matrix(axis: Axis, angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(axis.unit() * angle)
    }

    /// Matrix of the completed quarter turn
    pub fn quarter_matrix(&self) -> Matrix4<f32> {
        Self::matrix(self.axis, self.direction.angle_sign() * QUARTER_TURN)
    }
}

/// Unit vector of a direction, for geometry
pub fn direction_vector(direction: Direction) -> Vector3<f32> {
    direction.offset().to_vector()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::StickerColor;

    const ALL_TURNS: [TurnDirection; 2] = [TurnDirection::Cw, TurnDirection::Ccw];

    #[test]
    fn test_face_mapping() {
        assert_eq!(Face::Front.axis(), Axis::Z);
        assert_eq!(Face::Front.layer(), 1);
        assert_eq!(Face::Back.layer(), -1);
        assert_eq!(Face::Right.axis(), Axis::X);
        assert_eq!(Face::Left.layer(), -1);
        assert_eq!(Face::Up.axis(), Axis::Y);
        assert_eq!(Face::Down.layer(), -1);
    }

    #[test]
    fn test_face_from_str() {
        assert_eq!("front".parse::<Face>().unwrap(), Face::Front);
        assert_eq!("Down".parse::<Face>().unwrap(), Face::Down);
        assert_eq!("r".parse::<Face>().unwrap(), Face::Right);
        assert!("middle".parse::<Face>().is_err());
        assert!("x".parse::<Face>().is_err());
        assert_eq!("CCW".parse::<TurnDirection>().unwrap(), TurnDirection::Ccw);
        assert!("cc".parse::<TurnDirection>().is_err());
    }

    #[test]
    fn test_z_belt_cw() {
        let turn = SliceTurn::new(Axis::Z, TurnDirection::Cw);
        assert_eq!(turn.rotate_direction(Direction::PosX), Direction::NegY);
        assert_eq!(turn.rotate_direction(Direction::PosY), Direction::PosX);
        assert_eq!(turn.rotate_direction(Direction::NegX), Direction::PosY);
        assert_eq!(turn.rotate_direction(Direction::NegY), Direction::NegX);
        assert_eq!(turn.rotate_direction(Direction::PosZ), Direction::PosZ);
        assert_eq!(turn.rotate_direction(Direction::NegZ), Direction::NegZ);
    }

    #[test]
    fn test_sticker_turn_follows_geometry() {
        // A side's outward normal must move exactly like a position does
        for axis in Axis::ALL {
            for dir in ALL_TURNS {
                let turn = SliceTurn::new(axis, dir);
                for d in Direction::ALL {
                    assert_eq!(
                        turn.rotate_position(d.offset()),
                        turn.rotate_direction(d).offset(),
                        "{} {} on {}",
                        axis,
                        dir,
                        d
                    );
                }
            }
        }
    }

    #[test]
    fn test_positions_have_order_four() {
        for axis in Axis::ALL {
            for dir in ALL_TURNS {
                let turn = SliceTurn::new(axis, dir);
                for pos in GridPos::all() {
                    let mut p = pos;
                    for _ in 0..4 {
                        p = turn.rotate_position(p);
                    }
                    assert_eq!(p, pos);
                    assert_eq!(turn.inverse().rotate_position(turn.rotate_position(pos)), pos);
                }
            }
        }
    }

    #[test]
    fn test_matrix_agrees_with_grid_turn() {
        for axis in Axis::ALL {
            for dir in ALL_TURNS {
                let turn = SliceTurn::new(axis, dir);
                let m = turn.quarter_matrix();
                for pos in GridPos::all() {
                    let moved = m.transform_vector(&pos.to_vector());
                    let expected = turn.rotate_position(pos).to_vector();
                    assert!((moved - expected).norm() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_missing_sticker_stays_missing() {
        let stickers: Stickers = [(Direction::PosY, StickerColor::White)].into_iter().collect();
        let turned = SliceTurn::new(Axis::X, TurnDirection::Cw).rotate_stickers(&stickers);
        assert_eq!(turned.len(), 1);
        assert_eq!(turned.get(Direction::NegZ), Some(StickerColor::White));
        assert_eq!(turned.get(Direction::PosY), None);
    }
}

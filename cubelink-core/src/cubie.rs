//! Cubie data model: grid positions, outward directions and sticker colours
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One of the three cube axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index of this axis in an `(x, y, z)` triple
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Outward-facing direction of a cubie side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    /// All six directions, in sticker-slot order
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    pub fn new(axis: Axis, sign: i8) -> Self {
        match (axis, sign >= 0) {
            (Axis::X, true) => Direction::PosX,
            (Axis::X, false) => Direction::NegX,
            (Axis::Y, true) => Direction::PosY,
            (Axis::Y, false) => Direction::NegY,
            (Axis::Z, true) => Direction::PosZ,
            (Axis::Z, false) => Direction::NegZ,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
            Direction::PosZ | Direction::NegZ => Axis::Z,
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Direction::PosX | Direction::PosY | Direction::PosZ => 1,
            Direction::NegX | Direction::NegY | Direction::NegZ => -1,
        }
    }

    /// Slot index into a sticker table
    pub fn index(self) -> usize {
        self.axis().index() * 2 + usize::from(self.sign() < 0)
    }

    /// The unit grid offset pointing along this direction
    pub fn offset(self) -> GridPos {
        let mut pos = GridPos::new(0, 0, 0);
        pos.set(self.axis(), self.sign());
        pos
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::PosX => "+X",
            Direction::NegX => "-X",
            Direction::PosY => "+Y",
            Direction::NegY => "-Y",
            Direction::PosZ => "+Z",
            Direction::NegZ => "-Z",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sticker colours of the standard scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerColor {
    Red,
    Orange,
    White,
    Yellow,
    Blue,
    Green,
}

/// RGB of a cubie side that carries no sticker
pub const BODY_RGB: [u8; 3] = [0x11, 0x11, 0x11];

impl StickerColor {
    /// Colour painted on the solved cube's face pointing along `direction`
    pub fn home(direction: Direction) -> Self {
        match direction {
            Direction::PosX => StickerColor::Red,
            Direction::NegX => StickerColor::Orange,
            Direction::PosY => StickerColor::White,
            Direction::NegY => StickerColor::Yellow,
            Direction::PosZ => StickerColor::Blue,
            Direction::NegZ => StickerColor::Green,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            StickerColor::Red => [0xd0, 0x20, 0x20],
            StickerColor::Orange => [0xff, 0x80, 0x00],
            StickerColor::White => [0xf0, 0xf0, 0xf0],
            StickerColor::Yellow => [0xf0, 0xe0, 0x20],
            StickerColor::Blue => [0x20, 0x40, 0xe0],
            StickerColor::Green => [0x20, 0xb0, 0x40],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StickerColor::Red => "red",
            StickerColor::Orange => "orange",
            StickerColor::White => "white",
            StickerColor::Yellow => "yellow",
            StickerColor::Blue => "blue",
            StickerColor::Green => "green",
        }
    }
}

impl fmt::Display for StickerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StickerColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(StickerColor::Red),
            "orange" => Ok(StickerColor::Orange),
            "white" => Ok(StickerColor::White),
            "yellow" => Ok(StickerColor::Yellow),
            "blue" => Ok(StickerColor::Blue),
            "green" => Ok(StickerColor::Green),
            _ => Err(ParseError::UnknownColor(s.to_string())),
        }
    }
}

/// Integer grid position of a cubie, each coordinate in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl GridPos {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Every point of {-1, 0, 1}³, x-major then y then z
    pub fn all() -> impl Iterator<Item = GridPos> {
        (-1..=1).flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| GridPos::new(x, y, z))))
    }

    pub fn coord(&self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: i8) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Directions of the outer shells this position lies on
    pub fn shell_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.coord(d.axis()) == d.sign())
    }

    /// Number of stickers a cubie here carries: 3 corner, 2 edge, 1 centre, 0 core
    pub fn sticker_count(&self) -> usize {
        [self.x, self.y, self.z].iter().filter(|c| **c != 0).count()
    }

    pub fn to_vector(&self) -> Vector3<f32> {
        Vector3::new(f32::from(self.x), f32::from(self.y), f32::from(self.z))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Stable identity of a cubie, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CubieId(pub u32);

impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie-{}", self.0)
    }
}

/// Sticker-colour mapping of one cubie, one slot per direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stickers {
    slots: [Option<StickerColor>; 6],
}

impl Stickers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stickers of a cubie sitting at `pos` on the solved cube
    pub fn home(pos: GridPos) -> Self {
        let mut stickers = Self::new();
        for direction in pos.shell_directions() {
            stickers.set(direction, StickerColor::home(direction));
        }
        stickers
    }

    pub fn get(&self, direction: Direction) -> Option<StickerColor> {
        self.slots[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, color: StickerColor) {
        self.slots[direction.index()] = Some(color);
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present `(direction, colour)` entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, StickerColor)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|c| (d, c)))
    }
}

impl FromIterator<(Direction, StickerColor)> for Stickers {
    fn from_iter<I: IntoIterator<Item = (Direction, StickerColor)>>(iter: I) -> Self {
        let mut stickers = Self::new();
        for (direction, color) in iter {
            stickers.set(direction, color);
        }
        stickers
    }
}

impl fmt::Display for Stickers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (direction, color) in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", direction, color)?;
            first = false;
        }
        Ok(())
    }
}

/// One of the 27 unit cubes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cubie {
    pub id: CubieId,
    pub position: GridPos,
    pub stickers: Stickers,
}

impl Cubie {
    pub fn new(id: CubieId, position: GridPos) -> Self {
        Self {
            id,
            position,
            stickers: Stickers::home(position),
        }
    }

    /// Whether the present sticker directions are exactly the shells the cubie sits on
    pub fn stickers_match_shell(&self) -> bool {
        Direction::ALL.into_iter().all(|d| {
            let on_shell = self.position.coord(d.axis()) == d.sign();
            self.stickers.get(d).is_some() == on_shell
        })
    }
}

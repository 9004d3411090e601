//! Cube state model: the 27 cubies and the slice commit
use std::collections::HashSet;

use crate::cubie::{Cubie, CubieId, Direction, GridPos};
use crate::rotation::{Face, RotationCommand, SliceTurn};

/// Number of cubies in a 3×3×3 cube
pub const CUBIE_COUNT: usize = 27;

/// The single source of truth for cubie positions and stickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    cubies: Vec<Cubie>,
}

impl Cube {
    /// Build the solved cube; ids follow x-major, y, z grid order
    pub fn solved() -> Self {
        let cubies = GridPos::all()
            .enumerate()
            .map(|(i, pos)| Cubie::new(CubieId(i as u32), pos))
            .collect();
        Self { cubies }
    }

    /// Restore the solved configuration
    pub fn reset(&mut self) {
        *self = Self::solved();
    }

    /// Cubies in stable rendering order
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn get(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.id == id)
    }

    pub fn at(&self, pos: GridPos) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.position == pos)
    }

    /// Ids of the nine cubies currently in `face`'s layer
    pub fn slice_ids(&self, face: Face) -> Vec<CubieId> {
        let axis = face.axis();
        let layer = face.layer();
        self.cubies
            .iter()
            .filter(|c| c.position.coord(axis) == layer)
            .map(|c| c.id)
            .collect()
    }

    /// Commit a quarter turn to the given cubies; others are untouched
    pub fn apply_turn(&mut self, ids: &[CubieId], turn: SliceTurn) {
        for cubie in self.cubies.iter_mut().filter(|c| ids.contains(&c.id)) {
            cubie.position = turn.rotate_position(cubie.position);
            cubie.stickers = turn.rotate_stickers(&cubie.stickers);
        }
    }

    /// Select the command's slice and commit it in one step
    pub fn apply(&mut self, command: RotationCommand) {
        let ids = self.slice_ids(command.face);
        self.apply_turn(&ids, command.turn());
    }

    /// Whether every outer face shows a single colour
    pub fn is_solved(&self) -> bool {
        Direction::ALL.into_iter().all(|direction| {
            let mut colors = self
                .cubies
                .iter()
                .filter(|c| c.position.coord(direction.axis()) == direction.sign())
                .filter_map(|c| c.stickers.get(direction));
            match colors.next() {
                Some(first) => colors.all(|c| c == first),
                None => false,
            }
        })
    }

    /// Check the structural invariants: 27 distinct ids, positions covering
    /// {-1,0,1}³ once each, and stickers present exactly on shell sides
    pub fn is_consistent(&self) -> bool {
        if self.cubies.len() != CUBIE_COUNT {
            return false;
        }
        let ids: HashSet<_> = self.cubies.iter().map(|c| c.id).collect();
        let positions: HashSet<_> = self.cubies.iter().map(|c| c.position).collect();
        ids.len() == CUBIE_COUNT
            && positions.len() == CUBIE_COUNT
            && positions.iter().all(|p| [p.x, p.y, p.z].iter().all(|c| (-1..=1).contains(c)))
            && self.cubies.iter().all(Cubie::stickers_match_shell)
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::solved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::StickerColor;
    use crate::rotation::TurnDirection;

    fn all_commands() -> impl Iterator<Item = RotationCommand> {
        Face::ALL.into_iter().flat_map(|face| {
            [TurnDirection::Cw, TurnDirection::Ccw]
                .into_iter()
                .map(move |dir| RotationCommand::new(face, dir))
        })
    }

    #[test]
    fn test_solved_cube() {
        let cube = Cube::solved();
        assert!(cube.is_consistent());
        assert!(cube.is_solved());

        let mut counts = [0usize; 4];
        for cubie in cube.cubies() {
            assert_eq!(cubie.stickers.len(), cubie.position.sticker_count());
            counts[cubie.stickers.len()] += 1;
        }
        // core, face centres, edges, corners
        assert_eq!(counts, [1, 6, 12, 8]);
    }

    #[test]
    fn test_every_slice_has_nine_cubies() {
        let cube = Cube::solved();
        for face in Face::ALL {
            let ids = cube.slice_ids(face);
            assert_eq!(ids.len(), 9);
            for id in ids {
                let cubie = cube.get(id).unwrap();
                assert_eq!(cubie.position.coord(face.axis()), face.layer());
            }
        }
    }

    #[test]
    fn test_four_turns_restore() {
        for command in all_commands() {
            let mut cube = Cube::solved();
            for _ in 0..4 {
                cube.apply(command);
                assert!(cube.is_consistent());
            }
            assert_eq!(cube, Cube::solved(), "{}", command);
        }
    }

    #[test]
    fn test_cw_and_ccw_are_inverses() {
        for command in all_commands() {
            let mut cube = Cube::solved();
            cube.apply(RotationCommand::cw(Face::Right));
            let before = cube.clone();
            cube.apply(command);
            cube.apply(command.inverse());
            assert_eq!(cube, before, "{}", command);
        }
    }

    #[test]
    fn test_turn_leaves_other_layers_alone() {
        let solved = Cube::solved();
        for command in all_commands() {
            let mut cube = Cube::solved();
            cube.apply(command);
            let moved = solved.slice_ids(command.face);
            for cubie in cube.cubies() {
                if !moved.contains(&cubie.id) {
                    assert_eq!(Some(cubie), solved.get(cubie.id));
                }
            }
        }
    }

    #[test]
    fn test_front_ccw_corner() {
        let mut cube = Cube::solved();
        let id = cube.at(GridPos::new(1, 1, 1)).unwrap().id;
        cube.apply(RotationCommand::ccw(Face::Front));

        let cubie = cube.get(id).unwrap();
        assert_eq!(cubie.position, GridPos::new(-1, 1, 1));
        assert_eq!(cubie.stickers.get(Direction::PosY), Some(StickerColor::Red));
        assert_eq!(cubie.stickers.get(Direction::NegX), Some(StickerColor::White));
        assert_eq!(cubie.stickers.get(Direction::PosZ), Some(StickerColor::Blue));
        assert_eq!(cubie.stickers.len(), 3);
    }

    #[test]
    fn test_reset_restores_solved() {
        let mut cube = Cube::solved();
        cube.apply(RotationCommand::cw(Face::Up));
        cube.apply(RotationCommand::ccw(Face::Left));
        assert!(!cube.is_solved());
        cube.reset();
        assert_eq!(cube, Cube::solved());
    }
}

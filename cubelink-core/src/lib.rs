//! CubeLink core: 3×3×3 cube state and slice rotation engine
//!
//! The cube is a fixed set of 27 cubies. A front-end submits face turns to a
//! [`CubeEngine`], drives it with per-frame deltas and reads a [`FrameView`]
//! back to draw the cube mid-turn.

pub mod cube;
pub mod cubie;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod notation;
pub mod projection;
pub mod rotation;
pub mod view;

// Re-export commonly used types
pub use cube::{Cube, CUBIE_COUNT};
pub use cubie::{Axis, Cubie, CubieId, Direction, GridPos, StickerColor, Stickers};
pub use engine::{CompletedTurn, CubeEngine, EngineConfig, FrameView, RotationOutcome};
pub use error::ParseError;
pub use geometry::{Mesh, Triangle, Vertex};
pub use notation::{format_moves, parse_moves};
pub use projection::{Camera, CameraConfig};
pub use rotation::{Face, RotationCommand, SliceTurn, TurnDirection};
pub use view::{DragAccumulator, ViewConfig, ViewState};

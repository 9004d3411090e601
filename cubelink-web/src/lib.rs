//! CubeLink Web - WASM bindings for a JavaScript/mobile UI layer
//!
//! The host owns rendering and gestures. It forwards button presses and drag
//! samples here, calls `on_frame` from its animation loop and reads cubie
//! state back for drawing.

use cubelink_core::{
    parse_moves, CubeEngine, DragAccumulator, EngineConfig, Face, RotationCommand, SliceTurn,
    TurnDirection, ViewConfig, ViewState,
};
use nalgebra::Matrix4;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct CubeController {
    engine: CubeEngine,
    view: ViewState,
    drag: DragAccumulator,
    view_config: ViewConfig,
}

#[wasm_bindgen]
impl CubeController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CubeController {
        CubeController {
            engine: CubeEngine::new(EngineConfig::default()),
            view: ViewState::default(),
            drag: DragAccumulator::new(),
            view_config: ViewConfig::default(),
        }
    }

    /// Slice animation speed in radians per second. Cube state and any
    /// running turn are kept. Returns false, and uses the default speed, when
    /// `speed` is not a positive number.
    pub fn set_turn_speed(&mut self, speed: f32) -> bool {
        let config = EngineConfig { turn_speed: speed };
        self.engine.set_config(config);
        config.is_valid()
    }

    pub fn turn_speed(&self) -> f32 {
        self.engine.config().turn_speed
    }

    /// Start a face turn. Returns false for unknown names or while another
    /// turn is still animating.
    pub fn submit_rotation(&mut self, face: &str, direction: &str) -> bool {
        let (Ok(face), Ok(direction)) = (face.parse::<Face>(), direction.parse::<TurnDirection>())
        else {
            log::warn!("ignoring rotation {face:?} {direction:?}");
            return false;
        };
        self.engine
            .submit_rotation(RotationCommand::new(face, direction))
            .is_accepted()
    }

    /// Apply a move sequence instantly. Returns the number of quarter turns
    /// applied, or -1 if the sequence does not parse.
    pub fn scramble(&mut self, moves: &str) -> i32 {
        match parse_moves(moves) {
            Ok(commands) => commands
                .into_iter()
                .filter(|c| self.engine.apply_now(*c).is_accepted())
                .count() as i32,
            Err(e) => {
                log::warn!("bad scramble: {e}");
                -1
            }
        }
    }

    pub fn reset_state(&mut self) {
        self.engine.reset_state();
    }

    pub fn reset_view(&mut self) {
        self.view.reset_view();
        self.drag.clear();
    }

    /// Latest drag velocity sample from the gesture handler
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.drag.set(dx, dy);
    }

    /// Advance one frame; returns true when a face turn committed
    pub fn on_frame(&mut self, delta: f32) -> bool {
        let committed = self.engine.on_frame(delta).is_some();
        self.view.update(
            &mut self.drag,
            delta,
            self.engine.is_rotating(),
            &self.view_config,
        );
        committed
    }

    pub fn is_rotating(&self) -> bool {
        self.engine.is_rotating()
    }

    pub fn is_solved(&self) -> bool {
        self.engine.cube().is_solved()
    }

    pub fn move_count(&self) -> usize {
        self.engine.history().len()
    }

    pub fn cubie_count(&self) -> usize {
        self.engine.cube().cubies().len()
    }

    /// Stable id (`cubie-N`) of the cubie at `index` in render order
    pub fn cubie_id(&self, index: usize) -> Option<String> {
        self.engine.cube().cubies().get(index).map(|c| c.id.to_string())
    }

    /// Grid position `[x, y, z]` of the cubie at `index`
    pub fn cubie_position(&self, index: usize) -> Vec<i32> {
        self.engine
            .cube()
            .cubies()
            .get(index)
            .map(|c| vec![c.position.x.into(), c.position.y.into(), c.position.z.into()])
            .unwrap_or_default()
    }

    /// Stickers as `"+X:red,+Y:white"`
    pub fn cubie_stickers(&self, index: usize) -> String {
        self.engine
            .cube()
            .cubies()
            .get(index)
            .map(|c| c.stickers.to_string())
            .unwrap_or_default()
    }

    /// Whether the cubie at `index` belongs to the animating slice
    pub fn cubie_animating(&self, index: usize) -> bool {
        let frame = self.engine.frame();
        frame
            .cubies
            .get(index)
            .is_some_and(|c| frame.is_animating(c.id))
    }

    /// Column-major 4×4 transform of the whole cube
    pub fn model_matrix(&self) -> Vec<f32> {
        self.view.model_matrix().as_slice().to_vec()
    }

    /// Column-major 4×4 transform for cubies in the animating slice
    pub fn slice_matrix(&self) -> Vec<f32> {
        let frame = self.engine.frame();
        let matrix = match frame.axis {
            Some(axis) => SliceTurn::matrix(axis, frame.angle),
            None => Matrix4::identity(),
        };
        matrix.as_slice().to_vec()
    }
}

impl Default for CubeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_round_trip() {
        let mut controller = CubeController::new();
        assert!(controller.submit_rotation("front", "ccw"));
        assert!(!controller.submit_rotation("up", "cw"));
        assert!(controller.is_rotating());
        assert_eq!(controller.slice_matrix().len(), 16);

        while !controller.on_frame(0.1) {}
        assert!(!controller.is_rotating());
        assert_eq!(controller.move_count(), 1);
        assert!(!controller.is_solved());

        assert!(controller.submit_rotation("F", "cw"));
        while !controller.on_frame(0.1) {}
        assert!(controller.is_solved());
    }

    #[test]
    fn test_speed_change_keeps_cube() {
        let mut controller = CubeController::new();
        controller.scramble("R U");
        assert!(controller.submit_rotation("front", "cw"));
        controller.on_frame(0.1);

        assert!(controller.set_turn_speed(8.0));
        assert_eq!(controller.turn_speed(), 8.0);
        assert_eq!(controller.move_count(), 2);
        assert!(controller.is_rotating());
        assert!(!controller.is_solved());

        assert!(!controller.set_turn_speed(0.0));
        assert!(!controller.set_turn_speed(-3.0));
        assert_eq!(controller.turn_speed(), EngineConfig::default().turn_speed);
        assert!(controller.is_rotating());
        while !controller.on_frame(0.1) {}
        assert_eq!(controller.move_count(), 3);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let mut controller = CubeController::new();
        assert!(!controller.submit_rotation("middle", "cw"));
        assert!(!controller.submit_rotation("up", "sideways"));
        assert!(!controller.is_rotating());
    }

    #[test]
    fn test_snapshot_accessors() {
        let mut controller = CubeController::new();
        assert_eq!(controller.cubie_count(), 27);
        assert_eq!(controller.cubie_id(26).as_deref(), Some("cubie-26"));
        assert_eq!(controller.cubie_position(26), vec![1, 1, 1]);
        assert_eq!(controller.cubie_stickers(26), "+X:red,+Y:white,+Z:blue");
        assert!(controller.cubie_position(27).is_empty());

        controller.submit_rotation("right", "cw");
        assert!(controller.cubie_animating(26));
        assert!(!controller.cubie_animating(0));
    }

    #[test]
    fn test_scramble_and_reset() {
        let mut controller = CubeController::new();
        assert_eq!(controller.scramble("R U2 F'"), 4);
        assert_eq!(controller.scramble("R Q"), -1);
        assert!(!controller.is_solved());

        controller.drag(50.0, 0.0);
        controller.on_frame(0.016);
        controller.reset_view();
        assert_eq!(controller.model_matrix(), Matrix4::<f32>::identity().as_slice().to_vec());

        controller.reset_state();
        assert!(controller.is_solved());
        assert_eq!(controller.move_count(), 0);
    }
}

//! Slice rotation engine
//!
//! Accepts at most one face turn at a time, advances its animation angle from
//! frame deltas and commits the permutation once the quarter turn completes.
use serde::{Deserialize, Serialize};

use crate::cube::Cube;
use crate::cubie::{Axis, Cubie, CubieId};
use crate::rotation::{RotationCommand, SliceTurn, QUARTER_TURN};

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Slice animation speed in radians per second
    pub turn_speed: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_speed: std::f32::consts::PI,
        }
    }
}

impl EngineConfig {
    /// A usable speed is finite and positive; anything else would stall the
    /// turn, run it backwards or commit it instantly
    pub fn is_valid(&self) -> bool {
        self.turn_speed.is_finite() && self.turn_speed > 0.0
    }

    /// This config, or the default if it is not valid
    pub fn sanitized(self) -> Self {
        if self.is_valid() {
            self
        } else {
            log::warn!("invalid turn speed {}, using default", self.turn_speed);
            Self::default()
        }
    }
}

/// Acknowledgement for a submitted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    Accepted,
    /// Another rotation was still in progress; the command was dropped
    Rejected,
}

impl RotationOutcome {
    pub fn is_accepted(self) -> bool {
        self == RotationOutcome::Accepted
    }
}

/// A slice turn currently being animated
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRotation {
    pub command: RotationCommand,
    pub turn: SliceTurn,
    pub ids: Vec<CubieId>,
    /// Signed animation angle in radians
    pub angle: f32,
}

/// Reported by `on_frame` when a rotation commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedTurn {
    pub command: RotationCommand,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub cubies: &'a [Cubie],
    pub animating: &'a [CubieId],
    pub axis: Option<Axis>,
    pub angle: f32,
}

impl FrameView<'_> {
    pub fn is_animating(&self, id: CubieId) -> bool {
        self.animating.contains(&id)
    }
}

#[derive(Debug, Clone)]
pub struct CubeEngine {
    cube: Cube,
    active: Option<ActiveRotation>,
    history: Vec<RotationCommand>,
    config: EngineConfig,
}

impl CubeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cube: Cube::solved(),
            active: None,
            history: Vec::new(),
            config: config.sanitized(),
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap the tuning; cube state and any running turn are kept
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config.sanitized();
    }

    pub fn active(&self) -> Option<&ActiveRotation> {
        self.active.as_ref()
    }

    pub fn is_rotating(&self) -> bool {
        self.active.is_some()
    }

    /// Committed commands since the last reset, oldest first
    pub fn history(&self) -> &[RotationCommand] {
        &self.history
    }

    /// Start animating a face turn unless one is already running
    pub fn submit_rotation(&mut self, command: RotationCommand) -> RotationOutcome {
        if self.active.is_some() {
            return RotationOutcome::Rejected;
        }

        let ids = self.cube.slice_ids(command.face);
        log::debug!("accepted {} ({} cubies)", command, ids.len());
        self.active = Some(ActiveRotation {
            command,
            turn: command.turn(),
            ids,
            angle: 0.0,
        });
        RotationOutcome::Accepted
    }

    /// Commit a face turn immediately, skipping the animation
    pub fn apply_now(&mut self, command: RotationCommand) -> RotationOutcome {
        if self.active.is_some() {
            return RotationOutcome::Rejected;
        }

        self.cube.apply(command);
        self.history.push(command);
        log::debug!("applied {}", command);
        RotationOutcome::Accepted
    }

    /// Advance the running animation by `delta` seconds, committing the turn
    /// once it reaches 90°
    pub fn on_frame(&mut self, delta: f32) -> Option<CompletedTurn> {
        let active = self.active.as_mut()?;
        if delta.is_finite() && delta > 0.0 {
            active.angle += active.turn.direction.angle_sign() * self.config.turn_speed * delta;
        }
        if active.angle.abs() < QUARTER_TURN {
            return None;
        }

        let active = self.active.take()?;
        self.cube.apply_turn(&active.ids, active.turn);
        self.history.push(active.command);
        log::debug!("committed {}", active.command);
        Some(CompletedTurn {
            command: active.command,
        })
    }

    /// Restore the solved cube, abandoning any rotation in progress
    pub fn reset_state(&mut self) {
        if let Some(active) = self.active.take() {
            log::info!("reset aborted in-progress {}", active.command);
        }
        self.cube.reset();
        self.history.clear();
        log::info!("cube state reset");
    }

    pub fn frame(&self) -> FrameView<'_> {
        match &self.active {
            Some(active) => FrameView {
                cubies: self.cube.cubies(),
                animating: &active.ids,
                axis: Some(active.turn.axis),
                angle: active.angle,
            },
            None => FrameView {
                cubies: self.cube.cubies(),
                animating: &[],
                axis: None,
                angle: 0.0,
            },
        }
    }
}

impl Default for CubeEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::GridPos;
    use crate::rotation::{Face, TurnDirection};

    /// Frame delta that finishes a quarter turn at the default speed
    const FULL_TURN_DELTA: f32 = 0.5;

    fn run_to_completion(engine: &mut CubeEngine) -> CompletedTurn {
        for _ in 0..1000 {
            if let Some(done) = engine.on_frame(1.0 / 60.0) {
                return done;
            }
        }
        panic!("rotation never completed");
    }

    #[test]
    fn test_submit_selects_slice() {
        let mut engine = CubeEngine::default();
        let outcome = engine.submit_rotation(RotationCommand::cw(Face::Left));
        assert_eq!(outcome, RotationOutcome::Accepted);

        let active = engine.active().unwrap();
        assert_eq!(active.ids.len(), 9);
        assert_eq!(active.turn.axis, Axis::X);
        for id in &active.ids {
            assert_eq!(engine.cube().get(*id).unwrap().position.x, -1);
        }
        // Nothing moves before the commit
        assert_eq!(engine.cube(), &Cube::solved());
    }

    #[test]
    fn test_second_command_is_dropped() {
        let mut engine = CubeEngine::default();
        engine.submit_rotation(RotationCommand::ccw(Face::Front));
        engine.on_frame(0.1);
        let before = engine.active().cloned();

        assert_eq!(
            engine.submit_rotation(RotationCommand::cw(Face::Up)),
            RotationOutcome::Rejected
        );
        assert_eq!(
            engine.apply_now(RotationCommand::cw(Face::Up)),
            RotationOutcome::Rejected
        );
        assert_eq!(engine.active().cloned(), before);

        let done = run_to_completion(&mut engine);
        assert_eq!(done.command, RotationCommand::ccw(Face::Front));
        assert_eq!(engine.history(), &[RotationCommand::ccw(Face::Front)]);
    }

    #[test]
    fn test_angle_direction() {
        let mut engine = CubeEngine::default();
        engine.submit_rotation(RotationCommand::ccw(Face::Up));
        engine.on_frame(0.1);
        assert!(engine.frame().angle > 0.0);
        engine.reset_state();

        engine.submit_rotation(RotationCommand::cw(Face::Up));
        engine.on_frame(0.1);
        assert!(engine.frame().angle < 0.0);
        assert_eq!(engine.frame().axis, Some(Axis::Y));
        assert_eq!(engine.frame().animating.len(), 9);
    }

    #[test]
    fn test_commit_at_quarter_turn() {
        let mut engine = CubeEngine::default();
        engine.submit_rotation(RotationCommand::ccw(Face::Front));
        assert!(engine.on_frame(0.25).is_none());
        assert!(engine.is_rotating());
        assert!(engine.on_frame(0.25).is_some());
        assert!(!engine.is_rotating());
        assert!(engine.frame().animating.is_empty());

        let mut expected = Cube::solved();
        expected.apply(RotationCommand::ccw(Face::Front));
        assert_eq!(engine.cube(), &expected);
        let corner = Cube::solved().at(GridPos::new(1, 1, 1)).unwrap().id;
        assert_eq!(engine.cube().at(GridPos::new(-1, 1, 1)).unwrap().id, corner);
    }

    #[test]
    fn test_overshoot_commits_one_turn() {
        let mut engine = CubeEngine::default();
        engine.submit_rotation(RotationCommand::cw(Face::Right));
        assert!(engine.on_frame(FULL_TURN_DELTA * 10.0).is_some());

        let mut expected = Cube::solved();
        expected.apply(RotationCommand::cw(Face::Right));
        assert_eq!(engine.cube(), &expected);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_bad_deltas_do_not_advance() {
        let mut engine = CubeEngine::default();
        engine.submit_rotation(RotationCommand::cw(Face::Down));
        assert!(engine.on_frame(f32::NAN).is_none());
        assert!(engine.on_frame(-1.0).is_none());
        assert!(engine.on_frame(f32::INFINITY).is_none());
        assert_eq!(engine.frame().angle, 0.0);
    }

    #[test]
    fn test_idle_frame_changes_nothing() {
        let mut engine = CubeEngine::default();
        assert!(engine.on_frame(FULL_TURN_DELTA).is_none());
        assert_eq!(engine.cube(), &Cube::solved());
    }

    #[test]
    fn test_reset_aborts_rotation() {
        let mut engine = CubeEngine::default();
        engine.apply_now(RotationCommand::cw(Face::Back));
        engine.submit_rotation(RotationCommand::ccw(Face::Up));
        engine.on_frame(0.3);

        engine.reset_state();
        assert!(!engine.is_rotating());
        assert!(engine.history().is_empty());
        assert_eq!(engine.cube(), &Cube::solved());
        assert!(engine.on_frame(FULL_TURN_DELTA).is_none());
        assert_eq!(engine.cube(), &Cube::solved());

        // Accepts again afterwards
        assert!(engine
            .submit_rotation(RotationCommand::new(Face::Up, TurnDirection::Cw))
            .is_accepted());
    }

    #[test]
    fn test_slice_chosen_at_submit_time() {
        let mut engine = CubeEngine::default();
        engine.apply_now(RotationCommand::cw(Face::Front));
        engine.submit_rotation(RotationCommand::cw(Face::Right));
        let expected = engine.cube().slice_ids(Face::Right);
        assert_eq!(engine.frame().animating, expected.as_slice());
    }

    #[test]
    fn test_config_from_toml() {
        let config: EngineConfig = toml::from_str("turn_speed = 6.0").unwrap();
        assert_eq!(config.turn_speed, 6.0);
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(toml::from_str::<EngineConfig>("speed = 1.0").is_err());
    }

    #[test]
    fn test_invalid_speed_falls_back_to_default() {
        for text in ["turn_speed = 0.0", "turn_speed = -3.0", "turn_speed = nan"] {
            let config: EngineConfig = toml::from_str(text).unwrap();
            assert!(!config.is_valid(), "{}", text);

            let mut engine = CubeEngine::new(config);
            assert_eq!(engine.config(), &EngineConfig::default());

            engine.submit_rotation(RotationCommand::ccw(Face::Up));
            assert!(engine.on_frame(0.1).is_none());
            assert!(engine.frame().angle > 0.0);
            assert!(engine.on_frame(FULL_TURN_DELTA).is_some());
            assert!(engine.submit_rotation(RotationCommand::cw(Face::Up)).is_accepted());
        }
    }

    #[test]
    fn test_set_config_keeps_state() {
        let mut engine = CubeEngine::default();
        engine.apply_now(RotationCommand::cw(Face::Front));
        engine.submit_rotation(RotationCommand::ccw(Face::Right));
        engine.on_frame(0.1);
        let cube = engine.cube().clone();
        let angle = engine.frame().angle;

        engine.set_config(EngineConfig { turn_speed: 6.0 });
        assert_eq!(engine.config().turn_speed, 6.0);
        assert_eq!(engine.cube(), &cube);
        assert_eq!(engine.history().len(), 1);
        assert!(engine.is_rotating());
        assert_eq!(engine.frame().angle, angle);

        engine.set_config(EngineConfig { turn_speed: 0.0 });
        assert_eq!(engine.config(), &EngineConfig::default());
    }
}

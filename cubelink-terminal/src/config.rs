//! Terminal front-end configuration
//!
//! Stored as TOML. Every section is optional and missing keys fall back to
//! defaults, e.g.
//!
//! ```toml
//! [animation]
//! turn_speed = 4.0
//!
//! [controls]
//! face_button_direction = "cw"
//! ```

use anyhow::{Context, Result};
use cubelink_core::{CameraConfig, EngineConfig, TurnDirection, ViewConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub animation: EngineConfig,
    pub view: ViewConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub render: RenderConfig,
}

/// Key and mouse bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    /// Direction a plain face key turns; Shift turns the other way
    pub face_button_direction: TurnDirection,
    /// Drag velocity added per arrow-key press
    pub key_drag_impulse: f32,
    /// Drag velocity per terminal cell of mouse movement
    pub mouse_drag_scale: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            face_button_direction: TurnDirection::Ccw,
            key_drag_impulse: 40.0,
            mouse_drag_scale: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub target_fps: u32,
    /// Height of a terminal cell relative to its width
    pub cell_aspect: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            cell_aspect: 2.0,
        }
    }
}

impl RenderConfig {
    pub fn frame_millis(&self) -> u64 {
        1000 / u64::from(self.target_fps.max(1))
    }
}

/// Load configuration from a TOML file, or defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        log::info!("load_config: no config file given, using defaults");
        return Ok(AppConfig::default());
    };

    log::info!("load_config: loading from {:?}", path);
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    log::info!(
        "load_config: turn speed {:.2} rad/s, face keys turn {}, {} fps",
        config.animation.turn_speed,
        config.controls.face_button_direction,
        config.render.target_fps
    );
    Ok(config)
}

impl AppConfig {
    /// Reject values the engine or renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        let speed = self.animation.turn_speed;
        anyhow::ensure!(
            self.animation.is_valid(),
            "animation.turn_speed must be a positive number, got {}",
            speed
        );
        anyhow::ensure!(
            self.render.cell_aspect.is_finite() && self.render.cell_aspect > 0.0,
            "render.cell_aspect must be a positive number, got {}",
            self.render.cell_aspect
        );
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

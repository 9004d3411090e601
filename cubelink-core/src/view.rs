//! View orientation, drag input and model matrices
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use std::f32::consts::{PI, TAU};

/// Drag-to-spin tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Radians of spin per unit of drag velocity per frame
    pub drag_sensitivity: f32,
    /// Factor the drag velocity decays by every frame
    pub drag_damping: f32,
    /// Idle spin about the vertical axis, radians per second
    pub auto_spin_yaw: f32,
    /// Idle spin about the horizontal axis, radians per second
    pub auto_spin_pitch: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.002,
            drag_damping: 0.9,
            auto_spin_yaw: 0.1,
            auto_spin_pitch: 0.05,
        }
    }
}

/// Drag velocity written by gesture handlers and consumed once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragAccumulator {
    pub dx: f32,
    pub dy: f32,
}

impl DragAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the velocity with the latest gesture sample
    pub fn set(&mut self, dx: f32, dy: f32) {
        self.dx = dx;
        self.dy = dy;
    }

    /// Add an impulse on top of the current velocity
    pub fn push(&mut self, dx: f32, dy: f32) {
        self.dx += dx;
        self.dy += dy;
    }

    pub fn damp(&mut self, factor: f32) {
        self.dx *= factor;
        self.dy *= factor;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Whole-cube orientation in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewState {
    /// Rotation about the x axis
    pub pitch: f32,
    /// Rotation about the y axis
    pub yaw: f32,
}

impl ViewState {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Whether the cube is tipped past vertical, which mirrors horizontal drags
    pub fn is_inverted(&self) -> bool {
        let pitch = self.pitch.rem_euclid(TAU);
        pitch > PI / 2.0 && pitch < 3.0 * PI / 2.0
    }

    /// Apply one frame of drag and idle spin. `slice_active` suppresses the
    /// idle spin while a face turn animates.
    pub fn update(
        &mut self,
        drag: &mut DragAccumulator,
        delta: f32,
        slice_active: bool,
        config: &ViewConfig,
    ) {
        let flip = if self.is_inverted() { -1.0 } else { 1.0 };
        self.yaw += drag.dx * config.drag_sensitivity * flip;
        self.pitch += drag.dy * config.drag_sensitivity;
        drag.damp(config.drag_damping);

        if !slice_active && delta.is_finite() && delta > 0.0 {
            self.yaw += delta * config.auto_spin_yaw;
            self.pitch += delta * config.auto_spin_pitch;
        }
    }

    /// Zero the orientation; cube state is not touched
    pub fn reset_view(&mut self) {
        *self = Self::default();
    }

    /// Model matrix for the whole cube (pitch applied after yaw)
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.pitch, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.yaw, 0.0));
        rx * ry
    }
}

/// Create a translation matrix
pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(offset)
}

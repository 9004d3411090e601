//! Colour rasteriser for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubelink_core::{Camera, FrameView, Mesh, SliceTurn, Triangle, ViewState};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;

/// Character ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Minimum light so faces turned away from the light stay readable
const AMBIENT: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    rgb: [u8; 3],
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    rgb: [0, 0, 0],
};

/// Draws cubie meshes into a character grid with a depth buffer
pub struct CubeRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl CubeRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Draw every cubie, turning the animating slice by the frame's angle
    pub fn render_frame(&mut self, frame: &FrameView<'_>, view: &ViewState, camera: &Camera) {
        let model = view.model_matrix();
        let view_projection = camera.view_projection();
        let slice = match frame.axis {
            Some(axis) => SliceTurn::matrix(axis, frame.angle),
            None => Matrix4::identity(),
        };
        let identity = Matrix4::identity();

        for cubie in frame.cubies {
            let local = if frame.is_animating(cubie.id) {
                &slice
            } else {
                &identity
            };
            let mesh = Mesh::from_cubie(cubie, local);
            for triangle in &mesh.triangles {
                self.render_triangle(triangle, &model, &view_projection, camera);
            }
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let world = triangle
            .vertices
            .map(|v| model.transform_point(&v.position));
        let normal = model.transform_vector(&triangle.calculate_normal());

        // Back-face culling
        if normal.dot(&(camera.position - world[0])) <= 0.0 {
            return;
        }

        let mut screen = [(0.0, 0.0, 0.0); 3];
        for (slot, point) in screen.iter_mut().zip(world.iter()) {
            match Camera::project(view_projection, point, self.width as u32, self.height as u32) {
                Some(projected) => *slot = projected,
                None => return,
            }
        }

        let light_dir = Vector3::new(0.4, 0.5, 1.0).normalize();
        let brightness = normal.dot(&light_dir).clamp(0.0, 1.0);
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let shade = AMBIENT + (1.0 - AMBIENT) * brightness;

        let cell = Cell {
            glyph: LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)],
            rgb: triangle.rgb.map(|c| (f32::from(c) * shade) as u8),
        };
        self.rasterize_triangle(&screen, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Number of cells something was drawn into
    pub fn covered_cells(&self) -> usize {
        self.cells.iter().filter(|c| **c != EMPTY).count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for cell in row {
                if current != Some(cell.rgb) {
                    let [r, g, b] = cell.rgb;
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.rgb);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    Some((w0, w1, 1.0 - w0 - w1))
}

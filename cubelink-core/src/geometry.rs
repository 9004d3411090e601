//! Triangle meshes for drawing cubies
use nalgebra::{Matrix4, Point3, Vector3};

use crate::cubie::{Cubie, Direction, BODY_RGB};
use crate::rotation::direction_vector;
use crate::view::translation_matrix;

/// Edge length of a drawn cubie; the gap shows the body between cubies
pub const CUBIE_SIZE: f32 = 0.95;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A flat-coloured triangle
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub rgb: [u8; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, rgb: [u8; 3]) -> Self {
        Self {
            vertices: [v0, v1, v2],
            rgb,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        (v1 - v0).cross(&(v2 - v0)).normalize()
    }

    fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let vertices = self.vertices.map(|v| {
            Vertex::new(
                matrix.transform_point(&v.position),
                matrix.transform_vector(&v.normal),
            )
        });
        Self {
            vertices,
            rgb: self.rgb,
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Box for one cubie at its grid position, each side painted with its
    /// sticker or the body colour, then moved by `slice` (the in-flight turn)
    pub fn from_cubie(cubie: &Cubie, slice: &Matrix4<f32>) -> Self {
        let place = slice * translation_matrix(&cubie.position.to_vector());
        let mut mesh = Self::with_capacity(12);
        for direction in Direction::ALL {
            let rgb = cubie
                .stickers
                .get(direction)
                .map(|c| c.rgb())
                .unwrap_or(BODY_RGB);
            for triangle in box_side(direction, CUBIE_SIZE / 2.0, rgb) {
                mesh.add_triangle(triangle.transformed(&place));
            }
        }
        mesh
    }
}

/// Two counter-clockwise triangles covering one side of a centred box
fn box_side(direction: Direction, half: f32, rgb: [u8; 3]) -> [Triangle; 2] {
    let n = direction_vector(direction);
    // Two in-plane axes with u × v = n
    let (u, v) = match direction {
        Direction::PosX => (Vector3::y(), Vector3::z()),
        Direction::NegX => (Vector3::z(), Vector3::y()),
        Direction::PosY => (Vector3::z(), Vector3::x()),
        Direction::NegY => (Vector3::x(), Vector3::z()),
        Direction::PosZ => (Vector3::x(), Vector3::y()),
        Direction::NegZ => (Vector3::y(), Vector3::x()),
    };
    let corner = |a: f32, b: f32| Vertex::new(Point3::from((n + u * a + v * b) * half), n);

    let (c0, c1, c2, c3) = (
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, 1.0),
    );
    [Triangle::new(c0, c1, c2, rgb), Triangle::new(c0, c2, c3, rgb)]
}

//! Geometry primitives consumed by the demo front-ends.

use crate::error::MathError;
use crate::vec3::Vec3;

/// A 3D vertex with position and normal.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// The unit face normal from the winding of the vertices.
    ///
    /// Degenerate (zero-area) triangles surface as an error instead of a NaN
    /// normal.
    pub fn face_normal(&self) -> Result<Vec3, MathError> {
        let p0 = self.vertices[0].position;
        let p1 = self.vertices[1].position;
        let p2 = self.vertices[2].position;
        (p1 - p0).cross(&(p2 - p0)).normalized()
    }
}

/// A 3D mesh composed of triangles.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Two triangles covering a quad, wound counter-clockwise as seen along
    /// the normal.
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let [a, b, c, d] = corners;
        self.add_triangle(Triangle::new(
            Vertex::new(a, normal),
            Vertex::new(b, normal),
            Vertex::new(c, normal),
        ));
        self.add_triangle(Triangle::new(
            Vertex::new(a, normal),
            Vertex::new(c, normal),
            Vertex::new(d, normal),
        ));
    }

    /// An axis-aligned cube centered on the origin.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let faces: [([Vec3; 4], Vec3); 6] = [
            // +z
            (
                [
                    Vec3::new(-h, -h, h),
                    Vec3::new(h, -h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(-h, h, h),
                ],
                Vec3::Z,
            ),
            // -z
            (
                [
                    Vec3::new(h, -h, -h),
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, h, -h),
                    Vec3::new(h, h, -h),
                ],
                Vec3::new(0.0, 0.0, -1.0),
            ),
            // +y
            (
                [
                    Vec3::new(-h, h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(h, h, -h),
                    Vec3::new(-h, h, -h),
                ],
                Vec3::Y,
            ),
            // -y
            (
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, -h, h),
                    Vec3::new(-h, -h, h),
                ],
                Vec3::new(0.0, -1.0, 0.0),
            ),
            // +x
            (
                [
                    Vec3::new(h, -h, h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, h, -h),
                    Vec3::new(h, h, h),
                ],
                Vec3::X,
            ),
            // -x
            (
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, -h, h),
                    Vec3::new(-h, h, h),
                    Vec3::new(-h, h, -h),
                ],
                Vec3::new(-1.0, 0.0, 0.0),
            ),
        ];

        let mut mesh = Self::with_capacity(12);
        for (corners, normal) in faces {
            mesh.push_quad(corners, normal);
        }
        mesh
    }

    /// A single quad in the xy-plane, facing +z.
    pub fn quad(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(2);
        mesh.push_quad(
            [
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(h, h, 0.0),
                Vec3::new(-h, h, 0.0),
            ],
            Vec3::Z,
        );
        mesh
    }

    /// A single triangle in the xy-plane, facing +z.
    pub fn triangle(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(1);
        mesh.add_triangle(Triangle::new(
            Vertex::new(Vec3::new(-h, -h, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(h, -h, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(0.0, h, 0.0), Vec3::Z),
        ));
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_has_twelve_triangles() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.triangles.len(), 12);
    }

    #[test]
    fn test_cube_face_normals_match_winding() {
        // Each triangle's winding normal must agree with its stored normal.
        let cube = Mesh::cube(2.0);
        for triangle in &cube.triangles {
            let from_winding = triangle.face_normal().unwrap();
            let stored = triangle.vertices[0].normal;
            assert!(from_winding.dot(&stored) > 0.99);
        }
    }

    #[test]
    fn test_quad_and_triangle_shapes() {
        assert_eq!(Mesh::quad(1.0).triangles.len(), 2);
        assert_eq!(Mesh::triangle(1.0).triangles.len(), 1);
    }

    #[test]
    fn test_degenerate_triangle_normal_fails() {
        let p = Vertex::new(Vec3::new(1.0, 1.0, 1.0), Vec3::Z);
        let degenerate = Triangle::new(p, p, p);
        assert!(matches!(
            degenerate.face_normal(),
            Err(MathError::InvalidArgument { .. })
        ));
    }
}

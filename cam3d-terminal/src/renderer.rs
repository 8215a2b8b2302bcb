//! ASCII rasterizer for terminal rendering.

use cam3d_core::{project_to_screen, Mat4, Mesh, Triangle, Vec3};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest).
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Fixed light direction, pointing out of the screen toward the viewer.
const LIGHT_DIR: Vec3 = Vec3::Z;

/// ASCII renderer that converts 3D meshes to terminal characters.
///
/// Works entirely from a precomposed MVP matrix; the camera math stays in
/// `cam3d_core` and is run once per frame, not per vertex.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Rasterize every triangle of `mesh` through the given MVP matrix.
    pub fn render_mesh(&mut self, mesh: &Mesh, mvp: &Mat4) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, mvp);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, mvp: &Mat4) {
        let mut screen = [(0.0f32, 0.0f32, 0.0f32); 3];
        for (corner, vertex) in screen.iter_mut().zip(&triangle.vertices) {
            match project_to_screen(
                mvp,
                vertex.position,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => *corner = coords,
                // Any clipped corner drops the whole triangle
                None => return,
            }
        }

        let brightness = match triangle.face_normal() {
            Ok(normal) => normal.dot(&LIGHT_DIR).max(0.0),
            Err(err) => {
                log::debug!("skipping degenerate triangle: {err}");
                return;
            }
        };

        let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];

        self.rasterize(&screen, character);
    }

    fn rasterize(&mut self, corners: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (corners[0], corners[1], corners[2]);

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
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
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    /// Fraction of cells with something drawn in them, for tests and stats.
    pub fn coverage(&self) -> f32 {
        let drawn = self.char_buffer.iter().filter(|c| **c != ' ').count();
        drawn as f32 / self.char_buffer.len() as f32
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    _ => Color::Cyan,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Barycentric coordinates of `p` in the screen-space triangle `(v0, v1, v2)`.
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

#[cfg(test)]
mod tests {
    use super::*;
    use cam3d_core::Camera;

    #[test]
    fn test_barycentric_centroid() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).unwrap();
        assert!((w0 - 1.0 / 3.0).abs() < 1e-5);
        assert!((w1 - 1.0 / 3.0).abs() < 1e-5);
        assert!((w2 - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_barycentric_degenerate_triangle() {
        // All three corners on one line
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_barycentric_outside_point_has_negative_weight() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (3.0, 3.0)).unwrap();
        assert!(w0 < 0.0 || w1 < 0.0 || w2 < 0.0);
    }

    #[test]
    fn test_render_cube_fills_some_cells() {
        let camera = Camera::new(40, 20);
        let mvp = camera.mvp(&Mat4::identity()).unwrap();

        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_mesh(&Mesh::cube(2.0), &mvp);
        assert!(renderer.coverage() > 0.0);

        renderer.clear();
        assert_eq!(renderer.coverage(), 0.0);
    }

    #[test]
    fn test_front_face_occludes_back_face() {
        // The cube's front face (+z, toward both light and camera) should win
        // the depth test, so visible cells carry the brightest ramp character.
        let camera = Camera::new(40, 20);
        let mvp = camera.mvp(&Mat4::identity()).unwrap();

        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_mesh(&Mesh::cube(2.0), &mvp);
        let brightest = *LUMINOSITY_RAMP.last().unwrap();
        assert!(renderer.char_buffer.contains(&brightest));
    }
}

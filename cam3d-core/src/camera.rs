//! Camera and projection utilities built on [`Mat4`].

use crate::error::MathError;
use crate::mat4::Mat4;
use crate::vec3::Vec3;

/// Homogeneous `w` values at or below this are treated as on the camera plane.
const W_EPSILON: f32 = 1e-6;

/// Projection mode for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering.
///
/// Holds the look-at and projection parameters and composes them on demand;
/// degenerate configurations (eye on target, bad clip planes) surface as
/// `MathError` instead of NaN-filled matrices.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_deg: 45.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// The view matrix (world to camera space).
    pub fn view_matrix(&self) -> Result<Mat4, MathError> {
        let mut view = Mat4::identity();
        view.set_look_at(self.eye, self.target, self.up)?;
        Ok(view)
    }

    /// The projection matrix (camera to clip space).
    pub fn projection_matrix(&self) -> Result<Mat4, MathError> {
        let mut projection = Mat4::identity();
        match self.mode {
            ProjectionMode::Perspective => {
                projection.set_perspective(self.fov_deg, self.aspect, self.near, self.far)?;
            }
            ProjectionMode::Orthographic => {
                // Frame roughly what the perspective camera would see at the
                // target's distance.
                let height = (self.eye - self.target).length();
                let width = height * self.aspect;
                projection.set_ortho(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )?;
            }
        }
        Ok(projection)
    }

    /// Compose the full model/view/projection matrix for a model transform.
    pub fn mvp(&self, model: &Mat4) -> Result<Mat4, MathError> {
        Ok(self.projection_matrix()? * self.view_matrix()? * *model)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Project a world-space point through a precomposed MVP matrix to screen
/// coordinates.
///
/// Returns `None` when the point lies on the camera plane or falls outside
/// the normalized device cube in x/y. The third component is the NDC depth,
/// usable directly for depth-buffer comparisons.
pub fn project_to_screen(
    mvp: &Mat4,
    point: Vec3,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let (clip, w) = mvp.transform_homogeneous(point);
    if w.abs() <= W_EPSILON {
        return None;
    }

    let ndc_x = clip.x / w;
    let ndc_y = clip.y / w;
    let depth = clip.z / w;

    if !(-1.0..=1.0).contains(&ndc_x)
        || !(-1.0..=1.0).contains(&ndc_y)
        || !(-1.0..=1.0).contains(&depth)
    {
        return None;
    }

    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;
    Some((screen_x, screen_y, depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::new(200, 100);
        let mvp = camera.mvp(&Mat4::identity()).unwrap();
        let (x, y, _depth) = project_to_screen(&mvp, Vec3::ZERO, 200, 100).unwrap();
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(100, 100);
        let mvp = camera.mvp(&Mat4::identity()).unwrap();
        // Well behind the eye at (0,0,5)
        assert!(project_to_screen(&mvp, Vec3::new(0.0, 0.0, 50.0), 100, 100).is_none());
    }

    #[test]
    fn test_degenerate_camera_reports_error() {
        let mut camera = Camera::new(100, 100);
        camera.target = camera.eye;
        let err = camera.view_matrix().unwrap_err();
        assert!(matches!(err, MathError::DegenerateTransform { .. }));
    }

    #[test]
    fn test_bad_clip_planes_report_error() {
        let mut camera = Camera::new(100, 100);
        camera.near = -1.0;
        let err = camera.projection_matrix().unwrap_err();
        assert!(matches!(err, MathError::InvalidArgument { .. }));
    }

    #[test]
    fn test_orthographic_mode() {
        let mut camera = Camera::new(100, 100);
        camera.mode = ProjectionMode::Orthographic;
        let mvp = camera.mvp(&Mat4::identity()).unwrap();
        let (x, y, _) = project_to_screen(&mvp, Vec3::ZERO, 100, 100).unwrap();
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_closer_points_have_smaller_depth() {
        let camera = Camera::new(100, 100);
        let mvp = camera.mvp(&Mat4::identity()).unwrap();
        let (_, _, near_depth) = project_to_screen(&mvp, Vec3::new(0.0, 0.0, 1.0), 100, 100).unwrap();
        let (_, _, far_depth) = project_to_screen(&mvp, Vec3::new(0.0, 0.0, -3.0), 100, 100).unwrap();
        assert!(near_depth < far_depth);
    }
}

//! Terminal-based ASCII front-end for the cam3d math core.

use cam3d_core::{Camera, Mat4, Mesh};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Per-demo rotation state, in degrees about each axis.
///
/// Each demo owns one of these explicitly; nothing here lives in module-level
/// globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinState {
    pub x_deg: f32,
    pub y_deg: f32,
    pub z_deg: f32,
}

impl SpinState {
    pub fn new(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        Self {
            x_deg,
            y_deg,
            z_deg,
        }
    }

    /// Advance the rotation by delta amounts (in degrees).
    pub fn spin(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x_deg += dx;
        self.y_deg += dy;
        self.z_deg += dz;
    }

    /// The model matrix for the current angles: z, then y, then x rotation.
    pub fn model_matrix(&self) -> Mat4 {
        let mut model = Mat4::identity();
        // Axis-aligned rotations cannot fail; the axes are unit length.
        let _ = model
            .set_rotate(self.z_deg, 0.0, 0.0, 1.0)
            .and_then(|m| m.rotate(self.y_deg, 0.0, 1.0, 0.0))
            .and_then(|m| m.rotate(self.x_deg, 1.0, 0.0, 0.0));
        model
    }
}

/// Main application struct for terminal 3D rendering.
pub struct TerminalApp {
    mesh: Mesh,
    spin: SpinState,
    auto_spin: bool,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            mesh,
            spin: SpinState::new(20.0, 20.0, 0.0),
            auto_spin: true,
            camera: Camera::new(width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30);

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char(' ') => self.auto_spin = !self.auto_spin,
                KeyCode::Char('w') | KeyCode::Up => self.spin.spin(5.0, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.spin.spin(-5.0, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.spin.spin(0.0, -5.0, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.spin.spin(0.0, 5.0, 0.0),
                KeyCode::Char('e') => self.spin.spin(0.0, 0.0, 5.0),
                KeyCode::Char('r') => self.spin.spin(0.0, 0.0, -5.0),
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        if self.auto_spin {
            self.spin.spin(0.6, 0.9, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.spin.model_matrix();
        let mvp = match self.camera.mvp(&model) {
            Ok(mvp) => mvp,
            Err(err) => {
                // A bad camera configuration costs us this frame, nothing more
                log::warn!("skipping frame: {err}");
                return Ok(());
            }
        };

        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &mvp);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "cam3d | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll Space=Pause Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cam3d_core::Vec3;

    #[test]
    fn test_spin_state_accumulates() {
        let mut spin = SpinState::default();
        spin.spin(1.0, 2.0, 3.0);
        spin.spin(1.0, 2.0, 3.0);
        assert_eq!(spin.x_deg, 2.0);
        assert_eq!(spin.y_deg, 4.0);
        assert_eq!(spin.z_deg, 6.0);
    }

    #[test]
    fn test_zero_spin_is_identity() {
        let model = SpinState::default().model_matrix();
        assert_eq!(model, Mat4::identity());
    }

    #[test]
    fn test_model_matrix_single_axis() {
        let spin = SpinState::new(0.0, 0.0, 90.0);
        let p = spin.model_matrix().transform_point(Vec3::X);
        assert!((p.x - 0.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }
}

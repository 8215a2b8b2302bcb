//! cam3d terminal demo - rotating cube.
//!
//! Controls:
//!   - WASD / Arrow Keys: rotate the cube
//!   - E/R: roll rotation
//!   - Space: pause the auto-spin
//!   - Q/ESC: quit

use cam3d_core::Mesh;
use cam3d_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let cube = Mesh::cube(2.0);

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(cube)?;
    app.run()
}

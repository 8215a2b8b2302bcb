//! Hello triangle: the smallest possible scene, one spinning triangle.
//!
//! Usage: cargo run --example triangle

use cam3d_core::Mesh;
use cam3d_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut app = TerminalApp::new(Mesh::triangle(2.0))?;
    app.run()
}

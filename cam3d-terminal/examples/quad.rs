//! A spinning quad, one step up from the hello triangle.
//!
//! Usage: cargo run --example quad

use cam3d_core::Mesh;
use cam3d_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut app = TerminalApp::new(Mesh::quad(2.0))?;
    app.run()
}

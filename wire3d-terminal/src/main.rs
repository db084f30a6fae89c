/// Wire3D Terminal Demo - Rotating roofed cube
///
/// Demonstrates the wireframe pipeline drawing into terminal cells.
/// Controls:
///   - WASD / Arrow Keys: Rotate the mesh
///   - E/R: Roll rotation
///   - Space: Toggle automatic spin
///   - Q/ESC: Quit

use std::io;
use wire3d_core::Mesh;
use wire3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    println!("Wire3D Terminal Renderer - Loading...");

    let mesh = Mesh::roofed_cube()
        .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e.to_string()))?;

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal Renderer!");
    Ok(())
}

/// Example: Load and render a face file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj

use std::env;
use std::io;
use wire3d_core::{obj, MeshError};
use wire3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo face file provided, using default cube...");
        let cube = wire3d_core::Mesh::cube(2.0)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e.to_string()))?;
        let mut app = TerminalApp::new(cube)?;
        return app.run();
    }

    let obj_path = &args[1];

    println!("Loading face file: {}", obj_path);

    let mesh = obj::parse_mesh_file(obj_path).map_err(|e| match e {
        MeshError::FileNotFound { .. } => io::Error::new(io::ErrorKind::NotFound, e.to_string()),
        MeshError::Io(inner) => inner,
        other => io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse face file: {}", other),
        ),
    })?;

    println!(
        "Loaded {} vertices, {} edges",
        mesh.vertex_count(),
        mesh.edge_count()
    );
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal Renderer!");
    Ok(())
}

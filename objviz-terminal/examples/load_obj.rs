//! Example: load and render an OBJ file in the terminal
//!
//! Usage: cargo run --example load_obj -- path/to/model.obj

use std::env;
use std::fs;
use std::io;

use objviz_core::{parse_obj, Mesh};
use objviz_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut mesh = if let Some(path) = args.get(1) {
        let text = fs::read_to_string(path).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("failed to read OBJ file: {e}"),
            )
        })?;
        let mesh = parse_obj(&text).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("failed to parse OBJ: {e}"))
        })?;
        println!(
            "Loaded {} vertices, {} faces",
            mesh.vertices().len(),
            mesh.faces().len()
        );
        mesh
    } else {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        Mesh::cube(2.0)
    };
    mesh.normalize();

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()
}

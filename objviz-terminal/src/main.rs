//! objviz terminal viewer
//!
//! Renders a Wavefront OBJ mesh as a rotatable wireframe in the terminal.
//! Usage: objviz-terminal [path/to/model.obj]
//! Without an argument a unit cube is shown.

use std::env;
use std::fs;
use std::io;

use objviz_core::{parse_obj, Mesh};
use objviz_terminal::TerminalApp;

fn load_mesh() -> io::Result<Mesh> {
    let args: Vec<String> = env::args().collect();

    let mut mesh = match args.get(1) {
        None => {
            tracing::info!("no OBJ file given, using the default cube");
            Mesh::cube(2.0)
        }
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("failed to read {path}: {e}"),
                )
            })?;
            parse_obj(&text).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("failed to parse {path}: {e}"),
                )
            })?
        }
    };

    // Bring every mesh into the same coordinate range so the default zoom
    // and scale fit regardless of the model's units.
    mesh.normalize();
    Ok(mesh)
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let mesh = load_mesh()?;
    tracing::info!(
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        "mesh loaded"
    );

    let mut app = TerminalApp::new(mesh)?;
    app.run()
}

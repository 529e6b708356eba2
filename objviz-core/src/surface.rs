//! Render surface contract and the per-tick draw pipeline
use thiserror::Error;

use crate::assemble::{assemble, Canvas, MissingProjection, RenderStyle, Rgb};
use crate::geometry::Mesh;
use crate::pose::Pose;
use crate::projection::{project, DegenerateProjection, ScreenPoint};

/// The three primitives the pipeline emits, once per frame, in draw order.
///
/// Implementors decide what "drawing" means: a terminal cell buffer, a
/// framebuffer, or a recording used by tests. The core never looks at the
/// result.
pub trait RenderSurface {
    /// Wipe the previous frame.
    fn clear(&mut self);

    /// Draw one polygon: outline in `line`, interior in `fill` when given.
    /// Points arrive in face order and may lie outside the surface.
    fn fill_polygon(&mut self, points: &[ScreenPoint], line: Rgb, fill: Option<Rgb>);

    /// Draw a small vertex marker.
    fn draw_marker(&mut self, point: ScreenPoint, color: Rgb, size: u16);
}

/// A frame failed before anything was emitted to the surface.
///
/// Both causes are invariant violations rather than expected runtime
/// conditions; the caller should log the frame and keep the loop running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error(transparent)]
    Projection(#[from] DegenerateProjection),
    #[error(transparent)]
    Assembly(#[from] MissingProjection),
}

/// Run one full render tick: clear, project, assemble, emit.
///
/// The pipeline is synchronous and atomic; pose, mesh, and style are read
/// once at the start and nothing observes a half-drawn frame. Projection and
/// assembly run before the surface is touched, so a failed frame emits
/// nothing at all.
pub fn draw_frame<S: RenderSurface>(
    mesh: &Mesh,
    pose: &Pose,
    style: &RenderStyle,
    canvas: Canvas,
    surface: &mut S,
) -> Result<(), FrameError> {
    let projected = project(mesh, pose)?;
    let polygons = assemble(&projected, mesh, style, canvas)?;

    surface.clear();
    for polygon in &polygons {
        // Markers first, then the polygon over them, per face.
        for &marker in &polygon.markers {
            surface.draw_marker(marker, style.point, style.point_size);
        }
        surface.fill_polygon(&polygon.points, polygon.line, polygon.fill);
    }
    Ok(())
}

//! Face assembly: projected points + face list -> ordered draw polygons
use thiserror::Error;

use crate::geometry::Mesh;
use crate::projection::ScreenPoint;

/// A 24-bit color. The render surface decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
}

/// How faces and vertex markers are drawn. Orthogonal to geometry; the
/// surrounding UI mutates it, the assembler only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub line: Rgb,
    /// `None` draws outlines only.
    pub fill: Option<Rgb>,
    /// Whether to draw per-vertex markers at all.
    pub markers: bool,
    pub point: Rgb,
    pub point_size: u16,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line: Rgb::BLUE,
            fill: Some(Rgb::BLACK),
            markers: true,
            point: Rgb::BLACK,
            point_size: 1,
        }
    }
}

/// The drawable bounds of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Marker culling is strict: points exactly on the edge stay visible,
    /// anything past it loses its marker (but never its place in the
    /// polygon).
    pub fn contains(&self, p: ScreenPoint) -> bool {
        !(p.x < 0 || p.y < 0 || p.x > self.width as i32 || p.y > self.height as i32)
    }
}

/// One face resolved to screen space, ready for a render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    /// Screen points in the face's declared order; never reordered,
    /// triangulated, or clipped.
    pub points: Vec<ScreenPoint>,
    /// The subset of `points` that survive marker culling.
    pub markers: Vec<ScreenPoint>,
    pub line: Rgb,
    pub fill: Option<Rgb>,
}

/// A face referenced a vertex with no projected point. The mesh and the
/// projection are built from the same vertex set, so this means the two
/// went out of sync; the frame is abandoned.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("face {face} references vertex {index} with no projected point")]
pub struct MissingProjection {
    pub face: usize,
    pub index: usize,
}

/// Resolve every face to an ordered polygon of screen points.
///
/// Faces come out in file order; drawing them in that order, later faces
/// painting over earlier ones, is the viewer's whole hidden-surface story.
/// There is deliberately no depth sort and no back-face culling.
pub fn assemble(
    projected: &[ScreenPoint],
    mesh: &Mesh,
    style: &RenderStyle,
    canvas: Canvas,
) -> Result<Vec<Polygon>, MissingProjection> {
    let mut polygons = Vec::with_capacity(mesh.faces().len());
    for (face_no, face) in mesh.faces().iter().enumerate() {
        let mut points = Vec::with_capacity(face.len());
        for &index in face.indices() {
            let point = *projected.get(index).ok_or(MissingProjection {
                face: face_no,
                index,
            })?;
            points.push(point);
        }
        let markers = if style.markers {
            points.iter().copied().filter(|&p| canvas.contains(p)).collect()
        } else {
            Vec::new()
        };
        polygons.push(Polygon {
            points,
            markers,
            line: style.line,
            fill: style.fill,
        });
    }
    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn mesh_with_faces(vertex_count: usize, faces: Vec<Vec<usize>>) -> Mesh {
        Mesh::new(vec![Point3::origin(); vertex_count], faces).unwrap()
    }

    #[test]
    fn test_faces_keep_file_order_and_vertex_order() {
        let mesh = mesh_with_faces(4, vec![vec![4, 2, 1], vec![1, 2, 3]]);
        let projected = [
            ScreenPoint::new(10, 10),
            ScreenPoint::new(20, 10),
            ScreenPoint::new(20, 20),
            ScreenPoint::new(10, 20),
        ];
        let polygons = assemble(
            &projected,
            &mesh,
            &RenderStyle::default(),
            Canvas::new(100, 100),
        )
        .unwrap();

        assert_eq!(polygons.len(), 2);
        assert_eq!(
            polygons[0].points,
            vec![projected[3], projected[1], projected[0]]
        );
        assert_eq!(
            polygons[1].points,
            vec![projected[0], projected[1], projected[2]]
        );
    }

    #[test]
    fn test_marker_culling_is_strict_at_the_boundary() {
        let mesh = mesh_with_faces(4, vec![vec![1, 2, 3, 4]]);
        let canvas = Canvas::new(100, 50);
        let on_edges = ScreenPoint::new(0, 50);
        let inside = ScreenPoint::new(100, 25);
        let past_x = ScreenPoint::new(101, 25);
        let negative_y = ScreenPoint::new(50, -1);
        let projected = [on_edges, inside, past_x, negative_y];

        let polygons =
            assemble(&projected, &mesh, &RenderStyle::default(), canvas).unwrap();

        // Out-of-bounds points lose their marker but still shape the polygon.
        assert_eq!(polygons[0].points.len(), 4);
        assert_eq!(polygons[0].markers, vec![on_edges, inside]);
    }

    #[test]
    fn test_markers_toggle_off() {
        let mesh = mesh_with_faces(3, vec![vec![1, 2, 3]]);
        let projected = [ScreenPoint::new(1, 1); 3];
        let style = RenderStyle {
            markers: false,
            ..RenderStyle::default()
        };
        let polygons =
            assemble(&projected, &mesh, &style, Canvas::new(10, 10)).unwrap();
        assert!(polygons[0].markers.is_empty());
    }

    #[test]
    fn test_no_fill_passes_through() {
        let mesh = mesh_with_faces(3, vec![vec![1, 2, 3]]);
        let projected = [ScreenPoint::new(1, 1); 3];
        let style = RenderStyle {
            fill: None,
            ..RenderStyle::default()
        };
        let polygons =
            assemble(&projected, &mesh, &style, Canvas::new(10, 10)).unwrap();
        assert_eq!(polygons[0].fill, None);
        assert_eq!(polygons[0].line, Rgb::BLUE);
    }

    #[test]
    fn test_missing_projection_is_fatal() {
        let mesh = mesh_with_faces(3, vec![vec![1, 2, 3]]);
        // Two projected points for a three-vertex mesh.
        let projected = [ScreenPoint::new(0, 0), ScreenPoint::new(1, 1)];
        let err = assemble(
            &projected,
            &mesh,
            &RenderStyle::default(),
            Canvas::new(10, 10),
        )
        .unwrap_err();
        assert_eq!(err, MissingProjection { face: 0, index: 2 });
    }
}

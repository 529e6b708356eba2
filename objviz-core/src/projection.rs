//! Per-frame 3D-to-2D projection of the vertex set
use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

use crate::geometry::Mesh;
use crate::pose::Pose;

/// Pseudo-perspective numerator in `K / (zoom - rotated_z)`.
///
/// Legacy variants of the projection used 0.5 or 1.0 here; the value only
/// rescales apparent size. 0.5 is the one this codebase standardizes on.
pub const PERSPECTIVE_K: f32 = 0.5;

/// Zoom coincided with a vertex's rotated depth, so the perspective divide
/// is undefined. Callers are expected to clamp zoom so this never fires;
/// when it does, the frame is abandoned rather than drawn corrupted.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("degenerate projection: zoom equals the rotated depth of vertex {vertex}")]
pub struct DegenerateProjection {
    pub vertex: usize,
}

/// An integer screen coordinate, keyed by vertex position in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Elementary rotation about the X axis.
fn rotation_x(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

/// Elementary rotation about the Y axis.
fn rotation_y(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, s, //
        0.0, 1.0, 0.0, //
        -s, 0.0, c,
    )
}

/// Elementary rotation about the Z axis.
fn rotation_z(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, -s, 0.0, //
        s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// The composed rotation for a pose. Vertices are rotated about Y first,
/// then X, then Z; the order is load-bearing for the viewer's gimbal feel
/// and must not change.
fn rotation(pose: &Pose) -> Matrix3<f32> {
    rotation_z(pose.angle_z) * rotation_x(pose.angle_x) * rotation_y(pose.angle_y)
}

/// Project one already-rotated point to the screen.
fn project_rotated(
    rotated: Vector3<f32>,
    pose: &Pose,
    vertex: usize,
) -> Result<ScreenPoint, DegenerateProjection> {
    let depth = pose.zoom - rotated.z;
    if depth == 0.0 {
        return Err(DegenerateProjection { vertex });
    }
    let factor = PERSPECTIVE_K / depth;
    // Truncation (not rounding) and the negated Y are part of the viewer's
    // observable behavior; screen Y grows downward while model Y grows up.
    let x = (rotated.x * factor * pose.scale).trunc() as i32 + pose.anchor.0;
    let y = -((rotated.y * factor * pose.scale).trunc() as i32) + pose.anchor.1;
    Ok(ScreenPoint::new(x, y))
}

/// Project every vertex of the mesh into screen coordinates.
///
/// The result is indexed like `mesh.vertices()` and fully recomputed on
/// every call; the rotation is built once and reused for all vertices.
pub fn project(mesh: &Mesh, pose: &Pose) -> Result<Vec<ScreenPoint>, DegenerateProjection> {
    let rot = rotation(pose);
    let mut points = Vec::with_capacity(mesh.vertices().len());
    for (vertex, point) in mesh.vertices().iter().enumerate() {
        points.push(project_rotated(rot * point.coords, pose, vertex)?);
    }
    Ok(points)
}

/// Project a single free-standing point with the given pose.
pub fn project_point(
    point: Point3<f32>,
    pose: &Pose,
) -> Result<ScreenPoint, DegenerateProjection> {
    project_rotated(rotation(pose) * point.coords, pose, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pose() -> Pose {
        let mut pose = Pose::centered(840, 525);
        pose.set_zoom(2.0).unwrap();
        pose.scale = 100.0;
        pose
    }

    #[test]
    fn test_origin_maps_to_anchor() {
        let pose = test_pose();
        let p = project_point(Point3::origin(), &pose).unwrap();
        assert_eq!(p, ScreenPoint::new(420, 262));
    }

    #[test]
    fn test_yaw_is_applied_before_pitch() {
        let mut pose = test_pose();
        pose.set_rotation(0.7, 1.1, 0.0).unwrap();
        let v = Vector3::new(0.3, 0.4, 0.5);

        let expected = (rotation_x(0.7) * rotation_y(1.1)) * v;
        let p = project_point(Point3::from(v), &pose).unwrap();
        assert_eq!(p, project_rotated(expected, &pose, 0).unwrap());

        // The reverse composition lands somewhere else entirely.
        let swapped = (rotation_y(1.1) * rotation_x(0.7)) * v;
        assert_ne!(p, project_rotated(swapped, &pose, 0).unwrap());
    }

    #[test]
    fn test_single_axis_rotations_differ() {
        let mut x_pose = test_pose();
        x_pose.set_rotation(0.9, 0.0, 0.0).unwrap();
        let mut y_pose = test_pose();
        y_pose.set_rotation(0.0, 0.9, 0.0).unwrap();

        let off_axis = Point3::new(0.3, 0.4, 0.5);
        assert_ne!(
            project_point(off_axis, &x_pose).unwrap(),
            project_point(off_axis, &y_pose).unwrap()
        );
    }

    #[test]
    fn test_project_is_idempotent() {
        let mut pose = test_pose();
        pose.set_rotation(0.3, -1.2, 2.5).unwrap();
        let mesh = Mesh::cube(1.0);
        assert_eq!(
            project(&mesh, &pose).unwrap(),
            project(&mesh, &pose).unwrap()
        );
    }

    #[test]
    fn test_reset_matches_fresh_pose() {
        let mut pose = test_pose();
        pose.set_rotation(1.0, 2.0, 3.0).unwrap();
        pose.reset_rotation();

        let mesh = Mesh::cube(1.0);
        assert_eq!(
            project(&mesh, &pose).unwrap(),
            project(&mesh, &test_pose()).unwrap()
        );
    }

    #[test]
    fn test_zoom_at_vertex_depth_is_degenerate() {
        let mut pose = test_pose();
        pose.set_zoom(1.0).unwrap();
        let mesh = Mesh::new(vec![Point3::new(0.0, 0.0, 1.0)], vec![]).unwrap();
        assert_eq!(
            project(&mesh, &pose).unwrap_err(),
            DegenerateProjection { vertex: 0 }
        );
    }

    #[test]
    fn test_coordinates_are_truncated_not_rounded() {
        // zoom 2, z 0.5 -> factor 1/3; 0.5 * 1/3 * 100 = 16.66.. -> 16
        let pose = test_pose();
        let p = project_point(Point3::new(0.5, -0.5, 0.5), &pose).unwrap();
        assert_eq!(p, ScreenPoint::new(420 + 16, 262 + 16));
    }
}

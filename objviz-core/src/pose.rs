//! Object pose: rotation angles, screen anchor, zoom, and scale
use thiserror::Error;

/// Default zoom, matching the viewer's startup slider position.
pub const DEFAULT_ZOOM: f32 = 50.0;

/// Object-to-screen magnification applied after projection.
pub const OBJECT_SCALE: f32 = 2000.0;

/// Error for pose setters given non-finite input. The prior pose is kept.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid pose: non-finite {field}")]
pub struct InvalidPose {
    pub field: &'static str,
}

/// The mutable rotation/position/zoom state of the displayed object.
///
/// Angles are radians and unbounded; nothing wraps them. The anchor is the
/// screen-space origin the projected object is drawn around. All setters
/// reject non-finite values and leave the pose untouched on error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub angle_x: f32,
    pub angle_y: f32,
    pub angle_z: f32,
    pub anchor: (i32, i32),
    pub zoom: f32,
    pub scale: f32,
}

impl Pose {
    /// A zero-rotation pose anchored at the center of a canvas.
    pub fn centered(width: u32, height: u32) -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            anchor: (width as i32 / 2, height as i32 / 2),
            zoom: DEFAULT_ZOOM,
            scale: OBJECT_SCALE,
        }
    }

    /// Shift the screen-space anchor by whole pixels.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.anchor.0 += dx;
        self.anchor.1 += dy;
    }

    pub fn set_zoom(&mut self, zoom: f32) -> Result<(), InvalidPose> {
        if !zoom.is_finite() {
            return Err(InvalidPose { field: "zoom" });
        }
        self.zoom = zoom;
        Ok(())
    }

    /// Keep zoom strictly above `min`, the mesh's bounding depth, so the
    /// projection divide can never degenerate.
    pub fn clamp_zoom(&mut self, min: f32) {
        if self.zoom <= min {
            self.zoom = min + 1.0;
        }
    }

    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) -> Result<(), InvalidPose> {
        Self::check_angles(x, y, z)?;
        self.angle_x = x;
        self.angle_y = y;
        self.angle_z = z;
        Ok(())
    }

    /// Increment the orientation on each axis.
    pub fn step_rotation(&mut self, dx: f32, dy: f32, dz: f32) -> Result<(), InvalidPose> {
        Self::check_angles(dx, dy, dz)?;
        self.angle_x += dx;
        self.angle_y += dy;
        self.angle_z += dz;
        Ok(())
    }

    /// Reset all three angles to zero.
    pub fn reset_rotation(&mut self) {
        self.angle_x = 0.0;
        self.angle_y = 0.0;
        self.angle_z = 0.0;
    }

    fn check_angles(x: f32, y: f32, z: f32) -> Result<(), InvalidPose> {
        if !x.is_finite() {
            return Err(InvalidPose { field: "angle_x" });
        }
        if !y.is_finite() {
            return Err(InvalidPose { field: "angle_y" });
        }
        if !z.is_finite() {
            return Err(InvalidPose { field: "angle_z" });
        }
        Ok(())
    }
}

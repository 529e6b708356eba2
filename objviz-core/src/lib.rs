//! objviz core library - mesh loading, pose, and the project/assemble pipeline
//!
//! This library holds the stateless core of the viewer: the OBJ parser, the
//! validated mesh model, the pose-driven 3D-to-2D projection, and the face
//! assembly policy. Rendering itself happens behind the [`RenderSurface`]
//! trait, so the whole pipeline runs (and tests) without a live surface.

pub mod assemble;
pub mod geometry;
pub mod obj;
pub mod pose;
pub mod projection;
pub mod surface;

// Re-export commonly used types
pub use assemble::{assemble, Canvas, Polygon, RenderStyle, Rgb};
pub use geometry::{Face, Mesh, MeshError};
pub use obj::{parse_obj, ObjError};
pub use pose::{InvalidPose, Pose};
pub use projection::{project, DegenerateProjection, ScreenPoint};
pub use surface::{draw_frame, FrameError, RenderSurface};

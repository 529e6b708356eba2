//! Mesh geometry: vertices, faces, and load-time validation
use nalgebra::Point3;
use thiserror::Error;

/// Errors raised while building a [`Mesh`] from file data.
///
/// Any of these is fatal for the load; the caller keeps whatever mesh it was
/// displaying before.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("malformed mesh: face {face} has {count} vertex indices, need at least 3")]
    FaceTooSmall { face: usize, count: usize },
    #[error("malformed mesh: face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// An ordered list of vertex indices describing one polygon of the mesh.
///
/// Indices are zero-based and validated against the vertex set at
/// construction time; the file's 1-based indices never escape the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face(pub Vec<usize>);

impl Face {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A polygonal mesh: a vertex set plus faces referencing it by index.
///
/// Both halves are immutable once built and are replaced wholesale on the
/// next load.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh from raw vertices and faces of 1-based file indices.
    ///
    /// Every face must have at least 3 indices, all within `1..=vertices.len()`.
    /// Indices are translated to zero-based storage.
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<Vec<usize>>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        let mut validated = Vec::with_capacity(faces.len());
        for (face_no, indices) in faces.into_iter().enumerate() {
            if indices.len() < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: face_no,
                    count: indices.len(),
                });
            }
            let mut translated = Vec::with_capacity(indices.len());
            for index in indices {
                if index == 0 || index > vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        face: face_no,
                        index,
                        vertex_count,
                    });
                }
                translated.push(index - 1);
            }
            validated.push(Face(translated));
        }
        Ok(Self {
            vertices,
            faces: validated,
        })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Rescale every coordinate into [-1, 1] per axis, using that axis's
    /// min/max across all vertices.
    ///
    /// Runs once at load time so zoom and scale behave the same for a
    /// millimeter-sized part and a building-sized one. An axis with no
    /// extent collapses to 0.
    pub fn normalize(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        for axis in 0..3 {
            let mut min = f32::INFINITY;
            let mut max = f32::NEG_INFINITY;
            for v in &self.vertices {
                min = min.min(v[axis]);
                max = max.max(v[axis]);
            }
            let diff = max - min;
            for v in &mut self.vertices {
                v[axis] = if diff == 0.0 {
                    0.0
                } else {
                    (v[axis] - min) * 2.0 / diff - 1.0
                };
            }
        }
    }

    /// The largest coordinate magnitude across all vertices.
    ///
    /// An upper bound on any rotated Z component, so any zoom strictly above
    /// it can never hit the degenerate-projection divide.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.coords.norm())
            .fold(0.0, f32::max)
    }

    /// An axis-aligned cube of the given edge length, as 8 vertices and
    /// 6 quad faces. Used as the default object and in tests.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        // Already zero-based; the quads are valid by construction.
        let faces = vec![
            Face(vec![0, 1, 2, 3]),
            Face(vec![4, 5, 6, 7]),
            Face(vec![0, 1, 5, 4]),
            Face(vec![3, 2, 6, 7]),
            Face(vec![0, 3, 7, 4]),
            Face(vec![1, 2, 6, 5]),
        ];
        Self { vertices, faces }
    }
}

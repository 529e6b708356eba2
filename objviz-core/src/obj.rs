//! Wavefront OBJ parser: `v` and `f` statements into a validated mesh
use nalgebra::Point3;
use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{digit1, multispace1},
    combinator::map_res,
    multi::separated_list1,
    number::complete::float,
    IResult,
};
use thiserror::Error;

use crate::geometry::{Mesh, MeshError};

/// Errors raised while loading an OBJ file. All of them abort the load and
/// leave the previously loaded mesh in place.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjError {
    #[error("line {line}: unparseable {what} statement")]
    Parse { line: usize, what: &'static str },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

fn vertex_line(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = tag("v")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Point3::new(x, y, z)))
}

/// One face index token. OBJ allows `i`, `i/t`, `i//n`, and `i/t/n`; only
/// the leading vertex index matters here, the rest is skipped.
fn face_index(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse)(input)?;
    let (input, _) = take_while(|c: char| !c.is_whitespace())(input)?;
    Ok((input, index))
}

fn face_line(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = tag("f")(input)?;
    let (input, _) = multispace1(input)?;
    separated_list1(multispace1, face_index)(input)
}

/// Parse OBJ text into a validated [`Mesh`].
///
/// Only `v` and `f` statements contribute geometry; comments and the other
/// OBJ keywords (`vn`, `vt`, `o`, `g`, `s`, `usemtl`, `mtllib`, ...) are
/// ignored. Face indices are 1-based in the file and validated against the
/// vertex count, so an out-of-range face fails the whole load.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with("f ") {
            let (_, indices) = face_line(line).map_err(|_| ObjError::Parse {
                line: line_no + 1,
                what: "face",
            })?;
            faces.push(indices);
        } else if line.starts_with("v ") {
            let (_, point) = vertex_line(line).map_err(|_| ObjError::Parse {
                line: line_no + 1,
                what: "vertex",
            })?;
            vertices.push(point);
        }
    }

    Ok(Mesh::new(vertices, faces)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangle() {
        let obj = "\
# a single triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces().len(), 1);
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 2]);
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_slash_index_forms() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1/1 2/2/2 3//3 4
";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_other_keywords_are_ignored() {
        let obj = "\
mtllib cube.mtl
o cube
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
vn 0 0 -1
vt 0.5 0.5
s off
usemtl default
f 1 2 3
";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces().len(), 1);
    }

    #[test]
    fn test_scientific_notation_and_negatives() {
        let obj = "v -1.5e-2 2.25 -3\nv 0 0 0\nv 1 1 1\nf 1 2 3\n";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices()[0], Point3::new(-0.015, 2.25, -3.0));
    }

    #[test]
    fn test_face_past_vertex_count_fails_the_load() {
        let obj = "v 0 0 0\nv 1 0 0\nf 1 2 99\n";
        let err = parse_obj(obj).unwrap_err();
        assert_eq!(
            err,
            ObjError::Mesh(MeshError::IndexOutOfRange {
                face: 0,
                index: 99,
                vertex_count: 2,
            })
        );
    }

    #[test]
    fn test_garbage_vertex_line_is_a_parse_error() {
        let obj = "v one two three\n";
        assert_eq!(
            parse_obj(obj).unwrap_err(),
            ObjError::Parse {
                line: 1,
                what: "vertex",
            }
        );
    }
}

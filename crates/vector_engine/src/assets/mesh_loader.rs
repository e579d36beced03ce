//! Line-oriented mesh format
//!
//! ```text
//! v x y z        vertex position
//! f i1 i2 i3     triangle, 1-based vertex indices
//! tc i u v       texture coordinate for vertex i (1-based)
//! ```
//!
//! Any other line is ignored, which covers blank lines and `#` comments.
//! Indices may only refer to vertices defined on earlier lines.

use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;

use crate::assets::mesh::{Face, Mesh, Vertex};
use crate::assets::AssetError;
use crate::foundation::math::{Vec2, Vec3};

/// Mesh parse errors, with 1-based line numbers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A keyword was followed by too few values
    #[error("line {line}: '{keyword}' expects {expected} values")]
    MissingValues {
        /// Line number
        line: usize,
        /// Keyword on the line
        keyword: String,
        /// Values required
        expected: usize,
    },

    /// A value did not parse as a number
    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber {
        /// Line number
        line: usize,
        /// Offending text
        value: String,
    },

    /// An index did not name a previously defined vertex
    #[error("line {line}: vertex index {index} out of range, {defined} vertices defined")]
    IndexOutOfRange {
        /// Line number
        line: usize,
        /// Index as written
        index: i64,
        /// Vertices defined so far
        defined: usize,
    },
}

/// Parser for the mesh text format
pub struct MeshLoader;

impl MeshLoader {
    /// Read and parse a mesh file
    pub fn load(path: impl AsRef<Path>) -> Result<Mesh, AssetError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    /// Parse mesh text
    pub fn parse(text: &str) -> Result<Mesh, MeshError> {
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut faces = Vec::new();

        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let mut parts = raw.split_whitespace();
            match parts.next() {
                Some(keyword @ "v") => {
                    let [x, y, z] = fields::<3>(&mut parts, keyword, line)?;
                    vertices.push(Vertex::new(Vec3::new(
                        parse_number(x, line)?,
                        parse_number(y, line)?,
                        parse_number(z, line)?,
                    )));
                }
                Some(keyword @ "f") => {
                    let [a, b, c] = fields::<3>(&mut parts, keyword, line)?;
                    let defined = vertices.len();
                    faces.push(Face {
                        indices: [
                            parse_index(a, line, defined)?,
                            parse_index(b, line, defined)?,
                            parse_index(c, line, defined)?,
                        ],
                    });
                }
                Some(keyword @ "tc") => {
                    let [index, u, v] = fields::<3>(&mut parts, keyword, line)?;
                    let index = parse_index(index, line, vertices.len())?;
                    vertices[index].tex_coord = Vec2::new(parse_number(u, line)?, parse_number(v, line)?);
                }
                _ => {}
            }
        }

        log::debug!("Parsed mesh: {} vertices, {} faces", vertices.len(), faces.len());
        Ok(Mesh::new(vertices, faces))
    }
}

fn fields<'a, const N: usize>(
    parts: &mut SplitWhitespace<'a>,
    keyword: &str,
    line: usize,
) -> Result<[&'a str; N], MeshError> {
    let mut values = [""; N];
    for value in &mut values {
        *value = parts.next().ok_or_else(|| MeshError::MissingValues {
            line,
            keyword: keyword.to_string(),
            expected: N,
        })?;
    }
    Ok(values)
}

fn parse_number<T: FromStr>(value: &str, line: usize) -> Result<T, MeshError> {
    value.parse().map_err(|_| MeshError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

/// Resolve a 1-based index against the vertices defined so far
fn parse_index(value: &str, line: usize, defined: usize) -> Result<usize, MeshError> {
    let index: i64 = parse_number(value, line)?;
    usize::try_from(index)
        .ok()
        .filter(|&i| (1..=defined).contains(&i))
        .map(|i| i - 1)
        .ok_or(MeshError::IndexOutOfRange { line, index, defined })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TRIANGLE: &str = "\
# unit triangle
v 0 0 0
v 1 0 0
v 0 1 0

tc 2 1.0 0.0
f 1 2 3
tc 3 0.0 1.0
";

    #[test]
    fn test_parse_triangle() {
        let mesh = MeshLoader::parse(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face { indices: [0, 1, 2] }]);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_texture_coords_apply_regardless_of_face_order() {
        let mesh = MeshLoader::parse(TRIANGLE).unwrap();
        assert_relative_eq!(mesh.vertices()[0].tex_coord, Vec2::zeros());
        assert_relative_eq!(mesh.vertices()[1].tex_coord, Vec2::new(1.0, 0.0));
        assert_relative_eq!(mesh.vertices()[2].tex_coord, Vec2::new(0.0, 1.0));

        let stream = mesh.interleaved();
        assert_eq!(stream[2].tex_coord, [0.0, 1.0]);
    }

    #[test]
    fn test_unknown_keywords_are_ignored() {
        let mesh = MeshLoader::parse("o cube\nvn 0 1 0\nv 1 2 3\n").unwrap();
        assert_eq!(mesh.vertices().len(), 1);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_extra_whitespace() {
        let mesh = MeshLoader::parse("v   1.5\t2  3  \n").unwrap();
        assert_relative_eq!(mesh.vertices()[0].position, Vec3::new(1.5, 2.0, 3.0));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            MeshLoader::parse("v 0 0 0\nv 1 x 0\n").unwrap_err(),
            MeshError::InvalidNumber { line: 2, value: "x".to_string() }
        );
        assert_eq!(
            MeshLoader::parse("v 0 0\n").unwrap_err(),
            MeshError::MissingValues { line: 1, keyword: "v".to_string(), expected: 3 }
        );
    }

    #[test]
    fn test_face_index_must_be_defined() {
        assert_eq!(
            MeshLoader::parse("v 0 0 0\nf 1 2 3\n").unwrap_err(),
            MeshError::IndexOutOfRange { line: 2, index: 2, defined: 1 }
        );
        assert!(matches!(
            MeshLoader::parse("v 0 0 0\nf 0 1 1\n"),
            Err(MeshError::IndexOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            MeshLoader::parse("tc 1 0 0\n"),
            Err(MeshError::IndexOutOfRange { index: 1, defined: 0, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.mesh");
        std::fs::write(&path, TRIANGLE).unwrap();

        let mesh = MeshLoader::load(&path).unwrap();
        assert_eq!(mesh.faces().len(), 1);

        assert!(matches!(
            MeshLoader::load(dir.path().join("missing.mesh")),
            Err(AssetError::Io(_))
        ));
    }
}

//! Wavefront `.obj` reader and writer.
//!
//! # Supported format
//! - `v x y z [w]` vertices (`w` is ignored).
//! - `f a b c ...` faces; indices may be `v`, `v/vt`, `v//vn` or
//!   `v/vt/vn`, and negative (relative) indices are accepted. Polygons are
//!   fan-triangulated.
//! - `g name` and `o name` start a patch. Faces appearing before any group
//!   are assigned to the `default` patch.
//!
//! # Limitations
//! - Texture coordinates, normals, materials and smoothing groups are ignored.
//! - Free-form geometry is not supported.

use std::io::{Read, Write};

use crate::geometry::surface::DEFAULT_PATCH;
use crate::geometry::{Edge, Geometry, SurfaceMesh};
use crate::io::{SurfaceReader, SurfaceWriter};
use crate::mesh_error::MeshPrepError;

/// Wavefront OBJ reader.
#[derive(Debug, Default, Clone)]
pub struct ObjReader;

/// Wavefront OBJ writer; one group per patch.
#[derive(Debug, Default, Clone)]
pub struct ObjWriter;

impl ObjReader {
    fn parse_coord(raw: &str, line: usize) -> Result<f64, MeshPrepError> {
        raw.parse::<f64>().map_err(|_| MeshPrepError::ObjParse {
            line,
            message: format!("invalid coordinate: {raw}"),
        })
    }

    fn parse_index(raw: &str, n_vertices: usize, line: usize) -> Result<usize, MeshPrepError> {
        let head = raw.split('/').next().unwrap_or(raw);
        let value = head.parse::<i64>().map_err(|_| MeshPrepError::ObjParse {
            line,
            message: format!("invalid vertex index: {raw}"),
        })?;
        let index = match value {
            v if v > 0 => Some(v as usize - 1),
            v if v < 0 => n_vertices.checked_sub(v.unsigned_abs() as usize),
            _ => None,
        };
        index.ok_or_else(|| MeshPrepError::ObjParse {
            line,
            message: format!("vertex index out of range: {raw}"),
        })
    }
}

impl SurfaceReader for ObjReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<SurfaceMesh, MeshPrepError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut mesh = SurfaceMesh::new();
        let mut group: Option<String> = None;
        // Faces may reference vertices declared later in the file, so they
        // are resolved once every vertex is known.
        let mut faces: Vec<(usize, [usize; 3], String)> = Vec::new();

        for (number, line) in contents.lines().enumerate() {
            let number = number + 1;
            let line = line.trim();
            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let mut coords = [0.0; 3];
                    for c in &mut coords {
                        let raw = parts.next().ok_or_else(|| MeshPrepError::ObjParse {
                            line: number,
                            message: "vertex needs three coordinates".into(),
                        })?;
                        *c = Self::parse_coord(raw, number)?;
                    }
                    mesh.add_vertex(coords);
                }
                Some("f") => {
                    let indices = parts
                        .map(|raw| Self::parse_index(raw, mesh.n_vertices(), number))
                        .collect::<Result<Vec<_>, _>>()?;
                    if indices.len() < 3 {
                        return Err(MeshPrepError::ObjParse {
                            line: number,
                            message: "face needs at least three vertices".into(),
                        });
                    }
                    let name = group.clone().unwrap_or_else(|| DEFAULT_PATCH.to_string());
                    for k in 1..indices.len() - 1 {
                        faces.push((number, [indices[0], indices[k], indices[k + 1]], name.clone()));
                    }
                }
                Some("g") | Some("o") => {
                    let name = parts.collect::<Vec<_>>().join(" ");
                    group = Some(if name.is_empty() {
                        DEFAULT_PATCH.to_string()
                    } else {
                        name
                    });
                }
                _ => {
                    // comments, normals, texture coordinates, materials
                }
            }
        }

        for (number, vertices, name) in faces {
            let patch = mesh.add_patch(&name);
            mesh.add_face(vertices, patch).map_err(|e| match e {
                MeshPrepError::IndexOutOfRange { index, .. } => MeshPrepError::ObjParse {
                    line: number,
                    message: format!("vertex index out of range: {}", index + 1),
                },
                other => other,
            })?;
        }
        Ok(mesh)
    }
}

impl SurfaceWriter for ObjWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &SurfaceMesh) -> Result<(), MeshPrepError> {
        for [x, y, z] in mesh.vertices() {
            writeln!(writer, "v {x} {y} {z}")?;
        }
        for (index, patch) in mesh.patches().iter().enumerate() {
            let mut faces = mesh.faces().iter().filter(|f| f.patch == index).peekable();
            if faces.peek().is_none() {
                continue;
            }
            writeln!(writer, "g {}", patch.name())?;
            for face in faces {
                let [a, b, c] = face.vertices.map(|v| v + 1);
                writeln!(writer, "f {a} {b} {c}")?;
            }
        }
        Ok(())
    }
}

/// Writes half edges as OBJ line elements, sharing repeated vertices.
pub fn write_obj_edges<W: Write>(
    mut writer: W,
    mesh: &SurfaceMesh,
    edges: &[Edge],
) -> Result<(), MeshPrepError> {
    let mut local = vec![usize::MAX; mesh.n_vertices()];
    let mut order = Vec::new();
    for edge in edges {
        for v in [edge.p, edge.q] {
            if local[v] == usize::MAX {
                local[v] = order.len();
                order.push(v);
            }
        }
    }
    for &v in &order {
        let [x, y, z] = mesh.vertices()[v];
        writeln!(writer, "v {x} {y} {z}")?;
    }
    for edge in edges {
        writeln!(writer, "l {} {}", local[edge.p] + 1, local[edge.q] + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# two patches
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
f 1 2 3 4
g wall
f 1/1/1 2/2/2 5/5/5
";

    #[test]
    fn reads_groups_and_triangulates() {
        let mesh = ObjReader.read(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.n_vertices(), 5);
        assert_eq!(mesh.n_faces(), 3);
        let names: Vec<_> = mesh.patches().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["default", "wall"]);
        assert_eq!(mesh.faces()[1].vertices, [0, 2, 3]);
        assert_eq!(mesh.faces()[2].patch, 1);
    }

    #[test]
    fn negative_indices_are_relative() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng tri\nf -3 -2 -1\n";
        let mesh = ObjReader.read(text.as_bytes()).unwrap();
        assert_eq!(mesh.faces()[0].vertices, [0, 1, 2]);
    }

    #[test]
    fn empty_groups_do_not_create_patches() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng unused\ng tri\nf 1 2 3\n";
        let mesh = ObjReader.read(text.as_bytes()).unwrap();
        assert_eq!(mesh.n_patches(), 1);
        assert_eq!(mesh.patch(0).unwrap().name(), "tri");
    }

    #[test]
    fn bad_input_reports_the_line() {
        let err = ObjReader.read("v 0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshPrepError::ObjParse { line: 1, .. }));

        let err = ObjReader.read("v 0 0 0\nf 1 2 7\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshPrepError::ObjParse { line: 2, .. }));

        let err = ObjReader.read("v 0 0 0\nf 1 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshPrepError::ObjParse { line: 2, .. }));
    }

    #[test]
    fn writer_round_trips_patches() {
        let mesh = ObjReader.read(QUAD.as_bytes()).unwrap();
        let mut out = Vec::new();
        ObjWriter.write(&mut out, &mesh).unwrap();
        let back = ObjReader.read(out.as_slice()).unwrap();
        assert_eq!(back, mesh);
    }

    #[test]
    fn edges_share_vertices() {
        let mesh = ObjReader.read(QUAD.as_bytes()).unwrap();
        let edges = [mesh.edge(0).unwrap(), mesh.edge(1).unwrap()];
        let mut out = Vec::new();
        write_obj_edges(&mut out, &mesh, &edges).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 3);
        assert_eq!(
            text.lines().filter(|l| l.starts_with("l ")).collect::<Vec<_>>(),
            vec!["l 1 2", "l 2 3"]
        );
    }
}

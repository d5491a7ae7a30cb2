//! In-memory triangulated surface with named patches.
//!
//! Face `f` owns half edges `3f`, `3f + 1` and `3f + 2`, running
//! `v0 -> v1`, `v1 -> v2` and `v2 -> v0`. No connectivity is stored; the
//! edge groups needed for feature detection are rebuilt on demand.

use std::collections::HashMap;
use std::path::Path;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::{Edge, Geometry, Patch};
use crate::io::wavefront::{ObjReader, ObjWriter, write_obj_edges};
use crate::io::{SurfaceReader, SurfaceWriter, open_reader, write_file};
use crate::mesh_error::MeshPrepError;

const EPS: f64 = 1e-12;

/// Name given to faces that appear before any group statement.
pub const DEFAULT_PATCH: &str = "default";

/// Triangle referencing three vertices and its owning patch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub patch: usize,
}

/// Triangulated surface mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceMesh {
    vertices: Vec<[f64; 3]>,
    faces: Vec<Face>,
    patches: Vec<Patch>,
}

impl SurfaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, point: [f64; 3]) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    /// Returns the index of patch `name`, creating it if needed.
    pub fn add_patch(&mut self, name: &str) -> usize {
        match self.patch_index(name) {
            Some(index) => index,
            None => {
                self.patches.push(Patch::new(name));
                self.patches.len() - 1
            }
        }
    }

    /// Appends a triangle; fails if a vertex or the patch does not exist.
    pub fn add_face(&mut self, vertices: [usize; 3], patch: usize) -> Result<usize, MeshPrepError> {
        if let Some(&bad) = vertices.iter().find(|&&v| v >= self.vertices.len()) {
            return Err(MeshPrepError::IndexOutOfRange {
                kind: "vertex",
                index: bad,
            });
        }
        if patch >= self.patches.len() {
            return Err(MeshPrepError::IndexOutOfRange {
                kind: "patch",
                index: patch,
            });
        }
        self.faces.push(Face { vertices, patch });
        Ok(self.faces.len() - 1)
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of half edges (three per face).
    pub fn n_edges(&self) -> usize {
        3 * self.faces.len()
    }

    pub fn n_patches(&self) -> usize {
        self.patches.len()
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn patch_index(&self, name: &str) -> Option<usize> {
        self.patches.iter().position(|p| p.name() == name)
    }

    /// Unit normal of face `index`, or `None` for a degenerate triangle.
    pub fn face_normal(&self, index: usize) -> Option<[f64; 3]> {
        let [a, b, c] = self.faces.get(index)?.vertices.map(|v| self.vertices[v]);
        let n = cross(sub(b, a), sub(c, a));
        let len = norm(n);
        if len <= EPS {
            return None;
        }
        Some([n[0] / len, n[1] / len, n[2] / len])
    }

    /// Half edges grouped by the undirected vertex pair they span, in order
    /// of first appearance.
    pub fn edge_groups(&self) -> Vec<Vec<usize>> {
        let mut lookup: HashMap<(usize, usize), usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (f, face) in self.faces.iter().enumerate() {
            for k in 0..3 {
                let p = face.vertices[k];
                let q = face.vertices[(k + 1) % 3];
                let key = (p.min(q), p.max(q));
                let slot = *lookup.entry(key).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[slot].push(3 * f + k);
            }
        }
        groups
    }

    /// Open edges, non-manifold edges and edges whose two faces meet with
    /// normals more than `angle` radians apart are features.
    fn is_feature(&self, group: &[usize], angle: f64) -> bool {
        match group {
            [a, b] => {
                let (Some(na), Some(nb)) = (self.face_normal(a / 3), self.face_normal(b / 3))
                else {
                    return false;
                };
                dot(na, nb).clamp(-1.0, 1.0).acos() > angle
            }
            _ => true,
        }
    }
}

impl Geometry for SurfaceMesh {
    fn import(path: &Path) -> Result<Self, MeshPrepError> {
        let reader = open_reader(path)?;
        let mesh = ObjReader.read(reader).map_err(|e| e.at_path(path))?;
        mesh.debug_assert_invariants();
        log::debug!(
            "Imported {} ({} vertices, {} faces, {} patches)",
            path.display(),
            mesh.n_vertices(),
            mesh.n_faces(),
            mesh.n_patches()
        );
        Ok(mesh)
    }

    fn merge(&mut self, other: &Self) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        let patch_map: Vec<usize> = other
            .patches
            .iter()
            .map(|p| self.add_patch(p.name()))
            .collect();
        self.faces.extend(other.faces.iter().map(|face| Face {
            vertices: face.vertices.map(|v| v + offset),
            patch: patch_map[face.patch],
        }));
        self.debug_assert_invariants();
    }

    fn patches(&self) -> &[Patch] {
        &self.patches
    }

    fn patch(&self, index: usize) -> Result<&Patch, MeshPrepError> {
        self.patches
            .get(index)
            .ok_or(MeshPrepError::IndexOutOfRange {
                kind: "patch",
                index,
            })
    }

    fn edge(&self, index: usize) -> Result<Edge, MeshPrepError> {
        let face = self
            .faces
            .get(index / 3)
            .ok_or(MeshPrepError::IndexOutOfRange { kind: "edge", index })?;
        let k = index % 3;
        Ok(Edge {
            p: face.vertices[k],
            q: face.vertices[(k + 1) % 3],
            face: index / 3,
            patch: face.patch,
        })
    }

    fn feature_edges(&self, angle: f64) -> Vec<Vec<usize>> {
        self.edge_groups()
            .into_iter()
            .filter(|group| self.is_feature(group, angle))
            .collect()
    }

    fn extract_patches<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let mut keep = vec![false; self.patches.len()];
        for name in names {
            if let Some(index) = self.patch_index(name.as_ref()) {
                keep[index] = true;
            }
        }

        let mut out = SurfaceMesh::new();
        let mut patch_map = vec![usize::MAX; self.patches.len()];
        for (index, patch) in self.patches.iter().enumerate() {
            if keep[index] && self.faces.iter().any(|f| f.patch == index) {
                patch_map[index] = out.add_patch(patch.name());
            }
        }

        let mut vertex_map = vec![usize::MAX; self.vertices.len()];
        for face in self.faces.iter().filter(|f| keep[f.patch]) {
            let vertices = face.vertices.map(|v| {
                if vertex_map[v] == usize::MAX {
                    vertex_map[v] = out.add_vertex(self.vertices[v]);
                }
                vertex_map[v]
            });
            out.faces.push(Face {
                vertices,
                patch: patch_map[face.patch],
            });
        }
        out
    }

    fn export(&self, path: &Path) -> Result<(), MeshPrepError> {
        write_file(path, |w| ObjWriter.write(w, self))
    }

    fn export_edges(&self, path: &Path, edges: &[usize]) -> Result<(), MeshPrepError> {
        let edges = edges
            .iter()
            .map(|&i| self.edge(i))
            .collect::<Result<Vec<_>, _>>()?;
        write_file(path, |w| write_obj_edges(w, self, &edges))
    }
}

impl DebugInvariants for SurfaceMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "SurfaceMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshPrepError> {
        for face in &self.faces {
            if let Some(&bad) = face.vertices.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(MeshPrepError::IndexOutOfRange {
                    kind: "vertex",
                    index: bad,
                });
            }
            if face.patch >= self.patches.len() {
                return Err(MeshPrepError::IndexOutOfRange {
                    kind: "patch",
                    index: face.patch,
                });
            }
        }
        Ok(())
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

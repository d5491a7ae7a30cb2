//! Triangulated surface geometry.
//!
//! The classification pipeline only talks to geometry through the
//! [`Geometry`] trait; [`SurfaceMesh`] is the in-crate implementation backed
//! by Wavefront OBJ files.
//!
//! # Edge numbering
//! Edges are *half edges*: every triangle owns three of them, so an interior
//! edge shared by two triangles appears twice, once per side, each carrying
//! the patch of its own triangle. Feature edges are reported as groups of
//! half-edge indices that describe the same geometric edge.

pub mod surface;

pub use surface::{Face, SurfaceMesh};

use std::path::Path;

use crate::mesh_error::MeshPrepError;

/// Named group of faces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Patch {
    name: String,
}

impl Patch {
    pub fn new(name: impl Into<String>) -> Self {
        Patch { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One side of a mesh edge: vertices `p -> q` of `face`, belonging to `patch`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub p: usize,
    pub q: usize,
    pub face: usize,
    pub patch: usize,
}

/// Surface geometry operations consumed by the pipeline.
pub trait Geometry: Sized {
    /// Reads a surface from `path`.
    fn import(path: &Path) -> Result<Self, MeshPrepError>;

    /// Appends `other` to this surface without welding duplicates.
    fn merge(&mut self, other: &Self);

    /// All patches, in a stable order.
    fn patches(&self) -> &[Patch];

    /// The patch at `index`.
    fn patch(&self, index: usize) -> Result<&Patch, MeshPrepError>;

    /// The half edge at `index`.
    fn edge(&self, index: usize) -> Result<Edge, MeshPrepError>;

    /// Groups of half edges forming sharp or open edges at dihedral
    /// threshold `angle` (radians), in discovery order.
    fn feature_edges(&self, angle: f64) -> Vec<Vec<usize>>;

    /// The subset of faces belonging to the named patches.
    fn extract_patches<S: AsRef<str>>(&self, names: &[S]) -> Self;

    /// Writes the surface to `path`.
    fn export(&self, path: &Path) -> Result<(), MeshPrepError>;

    /// Writes the given half edges to `path` as line elements.
    fn export_edges(&self, path: &Path, edges: &[usize]) -> Result<(), MeshPrepError>;
}

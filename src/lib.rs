#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-prep
//!
//! mesh-prep prepares surface geometry for snappyHexMesh-style volume meshing in
//! CFD pre-processing. It reads a declarative case configuration and one or more
//! triangulated surfaces, decides which patches bound which fluid region and which
//! act as volume refinement controls, resolves per-surface meshing parameters, and
//! groups sharp feature edges by refinement level.
//!
//! ## Features
//! - YAML case configuration with validated refinement levels and layer settings
//! - Prefix-anchored regular-expression patterns for regions and mesh controls
//! - Defaults cascade for surface controls, checked once before any lookup
//! - Deterministic patch classification (last match for controls, first match for regions)
//! - Feature edge grouping by the strictest bordering feature level
//! - Wavefront OBJ import/export with transparent gzip support
//! - Optional Rayon-parallel feature classification (`rayon` feature)
//!
//! ## Usage
//! ```no_run
//! use mesh_prep::backend::MeshBackend;
//! use mesh_prep::config::Config;
//!
//! let config = Config::from_yaml("case/config.yml")?;
//! let mut backend = MeshBackend::without_writer(config);
//! let report = backend.setup()?;
//! println!("wrote {} surfaces", report.geometry_files.len());
//! # Ok::<(), mesh_prep::mesh_error::MeshPrepError>(())
//! ```
//!
//! ## Determinism
//! Classification holds no state between runs: every pass rebuilds its lookup
//! index and results from the configuration and geometry, so repeated runs on the
//! same inputs produce identical groupings.

pub mod backend;
pub mod classify;
pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::backend::{DictionaryWriter, MeshBackend, UnimplementedWriter, WriterContext};
    pub use crate::classify::{
        Classification, ControlIndex, FeatureGroups, classify_features, classify_patches,
    };
    pub use crate::config::{
        Config, Control, ControlType, Level, Matchable, Mesh, MeshDefaults, MeshSurface,
        MeshVolume, Pattern, Region, SurfaceControl,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{Geometry, SurfaceMesh};
    pub use crate::mesh_error::MeshPrepError;
}

//! Case configuration: geometry inputs, fluid regions and mesh parameters.
//!
//! Configurations are written in YAML:
//!
//! ```yaml
//! geometry:
//!   - body.obj
//!   - refinement_boxes.obj.gz
//! regions:
//!   - name: air
//!     type: fluid
//!     match: "body.*"
//!     location_in_mesh: [0.0, 0.0, 10.0]
//! mesh:
//!   base_size: 0.5
//!   buffer_cells: 4
//!   feature_angle: 30
//!   defaults:
//!     target_level: 2
//!     curvature_level: 3
//!     feature_level: 2
//!   surfaces:
//!     - match: "body_wing.*"
//!       feature_level: 4
//!   volumes:
//!     - match: "box_.*"
//!       level: 3
//! ```
//!
//! The working directory is the directory containing the configuration file;
//! geometry paths are relative to it.

pub mod level;
pub mod mesh;
pub mod pattern;
pub mod regions;

pub use level::Level;
pub use mesh::{Control, ControlType, Mesh, MeshDefaults, MeshSurface, MeshVolume, SurfaceControl};
pub use pattern::{Matchable, Pattern};
pub use regions::{Region, RegionType};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::check_file_stem;
use crate::mesh_error::MeshPrepError;

/// Validated case configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    pub working_directory: PathBuf,
    pub geometry: Vec<PathBuf>,
    pub regions: Vec<Region>,
    pub mesh: Mesh,
}

impl Config {
    /// Loads and validates a YAML configuration file.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, MeshPrepError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| MeshPrepError::io(path, e))?;
        let absolute = std::path::absolute(path).map_err(|e| MeshPrepError::io(path, e))?;
        let working_directory = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        log::info!("Loading configuration from {}", absolute.display());
        Self::from_yaml_str(&content, working_directory)
    }

    /// Parses and validates YAML text rooted at `working_directory`.
    pub fn from_yaml_str(
        content: &str,
        working_directory: impl Into<PathBuf>,
    ) -> Result<Self, MeshPrepError> {
        let mut config: Config = serde_yaml::from_str(content)?;
        config.working_directory = working_directory.into();
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), MeshPrepError> {
        let mut names = HashSet::with_capacity(self.regions.len());
        for region in &self.regions {
            check_file_stem("region", &region.name)?;
            if !names.insert(region.name.as_str()) {
                return Err(MeshPrepError::InvalidConfig(format!(
                    "duplicate region name `{}`",
                    region.name
                )));
            }
        }
        self.mesh.validate()
    }

    /// Geometry files resolved against the working directory, in order.
    pub fn geometry_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.geometry
            .iter()
            .map(|path| self.working_directory.join(path))
    }
}

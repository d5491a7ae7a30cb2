//! snappyHexMesh case preparation.
//!
//! [`MeshBackend::setup`] runs the whole pipeline in order, each stage
//! finishing before the next starts:
//!
//! 1. clean the working directory and recreate the case layout;
//! 2. import and merge the geometry files;
//! 3. classify patches into volume controls and regions;
//! 4. export one surface per volume-controlled patch and per region;
//! 5. classify feature edges and export one edge set per level.
//!
//! Output layout under the working directory:
//!
//! ```text
//! constant/triSurface/<region>.obj.gz
//! constant/triSurface/controls/<patch>.obj.gz
//! constant/triSurface/features/edges_<level>.obj
//! ```
//!
//! File system effects are not transactional. A failed run may leave a
//! partially written case behind; re-running `setup` starts from a clean
//! layout again.

pub mod writers;

pub use writers::{DictionaryWriter, UnimplementedWriter, WriterContext};

use std::fs;
use std::path::PathBuf;

use crate::classify::{
    Classification, ControlIndex, FeatureGroups, classify_features, classify_patches,
};
use crate::config::Config;
use crate::geometry::{Geometry, SurfaceMesh};
use crate::mesh_error::MeshPrepError;

/// Directories removed by [`MeshBackend::clean`].
pub const CASE_DIRECTORIES: [&str; 3] = ["0.orig", "constant", "system"];
/// Region surfaces.
pub const TRI_SURFACE_DIR: &str = "constant/triSurface";
/// Volume-control surfaces.
pub const CONTROLS_DIR: &str = "constant/triSurface/controls";
/// Feature edge sets.
pub const FEATURES_DIR: &str = "constant/triSurface/features";

/// Files written by one [`MeshBackend::setup`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupReport {
    pub geometry_files: Vec<PathBuf>,
    pub feature_files: Vec<PathBuf>,
}

/// File name of the feature edge set for `level`.
pub fn feature_file_name(level: crate::config::Level) -> String {
    format!("edges_{:02}.obj", level.get())
}

/// Prepares a snappyHexMesh case from a configuration.
#[derive(Debug)]
pub struct MeshBackend<W = UnimplementedWriter> {
    config: Config,
    writer: W,
    geometry: Option<SurfaceMesh>,
    classification: Classification,
    features: FeatureGroups,
}

impl MeshBackend<UnimplementedWriter> {
    /// Backend without solver dictionary support.
    pub fn without_writer(config: Config) -> Self {
        Self::new(config, UnimplementedWriter)
    }
}

impl<W: DictionaryWriter> MeshBackend<W> {
    pub fn new(config: Config, writer: W) -> Self {
        MeshBackend {
            config,
            writer,
            geometry: None,
            classification: Classification::default(),
            features: FeatureGroups::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// The merged geometry, once imported.
    pub fn geometry(&self) -> Option<&SurfaceMesh> {
        self.geometry.as_ref()
    }

    /// Result of the latest successful classification.
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Result of the latest feature classification.
    pub fn features(&self) -> &FeatureGroups {
        &self.features
    }

    /// Runs the full preparation pipeline.
    pub fn setup(&mut self) -> Result<SetupReport, MeshPrepError> {
        self.clean()?;
        self.import_geometry()?;
        self.assign_geometry()?;
        let geometry_files = self.write_geometry()?;
        let feature_files = self.write_features()?;
        log::info!(
            "Case prepared in {}: {} surfaces, {} feature sets",
            self.config.working_directory.display(),
            geometry_files.len(),
            feature_files.len()
        );
        Ok(SetupReport {
            geometry_files,
            feature_files,
        })
    }

    /// Removes previous case output and recreates the directory layout.
    pub fn clean(&self) -> Result<(), MeshPrepError> {
        let root = &self.config.working_directory;
        for dir in CASE_DIRECTORIES {
            let path = root.join(dir);
            if path.exists() {
                log::debug!("Removing {}", path.display());
                fs::remove_dir_all(&path).map_err(|e| MeshPrepError::io(&path, e))?;
            }
        }
        for dir in ["0.orig", CONTROLS_DIR, FEATURES_DIR, "system"] {
            let path = root.join(dir);
            fs::create_dir_all(&path).map_err(|e| MeshPrepError::io(&path, e))?;
        }
        Ok(())
    }

    /// Imports every configured geometry file and merges them in order.
    pub fn import_geometry(&mut self) -> Result<(), MeshPrepError> {
        self.geometry = None;
        let mut merged: Option<SurfaceMesh> = None;
        for path in self.config.geometry_paths() {
            log::info!("Importing geometry {}", path.display());
            let geometry = SurfaceMesh::import(&path)?;
            match merged.as_mut() {
                Some(m) => m.merge(&geometry),
                None => merged = Some(geometry),
            }
        }
        if merged.is_none() {
            log::warn!("No geometry files configured");
        }
        self.geometry = merged;
        Ok(())
    }

    /// Assigns every patch to a volume control or a region.
    ///
    /// Previous results are discarded first; on error none are kept.
    pub fn assign_geometry(&mut self) -> Result<(), MeshPrepError> {
        self.classification = Classification::default();
        self.features = FeatureGroups::new();
        let geometry = self
            .geometry
            .as_ref()
            .ok_or(MeshPrepError::GeometryNotImported)?;
        let index = ControlIndex::from_config(&self.config)?;
        let classification = classify_patches(geometry, &index)?;
        for region in &self.config.regions {
            if !classification.regions.contains_key(&region.name) {
                log::warn!("Region {} has no patches", region.name);
            }
        }
        self.classification = classification;
        Ok(())
    }

    /// Exports volume-control and region surfaces; returns the files written.
    pub fn write_geometry(&self) -> Result<Vec<PathBuf>, MeshPrepError> {
        let geometry = self
            .geometry
            .as_ref()
            .ok_or(MeshPrepError::GeometryNotImported)?;
        let root = &self.config.working_directory;
        let mut written = Vec::new();

        for name in self.classification.controls.keys() {
            let path = root.join(CONTROLS_DIR).join(format!("{name}.obj.gz"));
            geometry.extract_patches(&[name]).export(&path)?;
            written.push(path);
        }
        for (name, patches) in &self.classification.regions {
            let path = root.join(TRI_SURFACE_DIR).join(format!("{name}.obj.gz"));
            geometry.extract_patches(patches.as_slice()).export(&path)?;
            written.push(path);
        }
        log::info!("Wrote {} surface files", written.len());
        Ok(written)
    }

    /// Classifies feature edges of the imported geometry by level.
    ///
    /// Uses the classification of the last [`assign_geometry`](Self::assign_geometry).
    pub fn assign_features(&mut self) -> Result<(), MeshPrepError> {
        self.features = FeatureGroups::new();
        let geometry = self
            .geometry
            .as_ref()
            .ok_or(MeshPrepError::GeometryNotImported)?;
        let index = ControlIndex::from_config(&self.config)?;
        self.features = classify_features(
            geometry,
            self.config.mesh.feature_angle,
            &index,
            &self.classification,
        )?;
        Ok(())
    }

    /// Classifies feature edges and exports one edge set per level.
    pub fn write_features(&mut self) -> Result<Vec<PathBuf>, MeshPrepError> {
        self.assign_features()?;
        let geometry = self
            .geometry
            .as_ref()
            .ok_or(MeshPrepError::GeometryNotImported)?;

        let dir = self.config.working_directory.join(FEATURES_DIR);
        let mut written = Vec::with_capacity(self.features.len());
        for (&level, edges) in &self.features {
            let path = dir.join(feature_file_name(level));
            geometry.export_edges(&path, edges)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Writes the solver dictionaries through the injected writer.
    pub fn write_dictionaries(&mut self) -> Result<(), MeshPrepError> {
        let ctx = WriterContext {
            config: &self.config,
            classification: &self.classification,
            features: &self.features,
        };
        self.writer.write_block_mesh_dict(&ctx)?;
        self.writer.write_control_dict(&ctx)?;
        self.writer.write_decompose_par_dict(&ctx)?;
        self.writer.write_fv_schemes(&ctx)?;
        self.writer.write_fv_solution(&ctx)?;
        self.writer.write_snappy_hex_mesh_dict(&ctx)
    }
}

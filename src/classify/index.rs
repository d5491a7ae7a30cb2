//! Patch-name lookup of surface controls, volume controls and regions.
//!
//! # Tie-break rules
//! Several entries may match the same patch name. The rules differ by kind
//! and must not be unified:
//!
//! - **Surface and volume controls: last match wins.** Entries are scanned
//!   in configuration order and a later match replaces an earlier one, so a
//!   specific entry listed after a broad one overrides it.
//! - **Regions: first match wins.** The first region in configuration order
//!   whose pattern matches owns the patch.
//!
//! Unmatched names fall back to the mesh defaults for surface controls, to
//! *no* control for volume controls, and to an error for regions.

use crate::config::{
    Config, Control, Matchable, Mesh, MeshDefaults, MeshVolume, Region, SurfaceControl,
};
use crate::mesh_error::MeshPrepError;

/// Resolved view of the mesh controls and regions of one configuration.
///
/// Building the index runs the defaults cascade for every surface control,
/// so a cascade violation is reported before any lookup is served.
#[derive(Clone, Debug)]
pub struct ControlIndex<'a> {
    defaults: &'a MeshDefaults,
    surfaces: Vec<SurfaceControl>,
    volumes: &'a [MeshVolume],
    regions: &'a [Region],
}

impl<'a> ControlIndex<'a> {
    /// Resolves the surface controls of `mesh` and indexes `regions`.
    pub fn new(mesh: &'a Mesh, regions: &'a [Region]) -> Result<Self, MeshPrepError> {
        Ok(ControlIndex {
            defaults: &mesh.defaults,
            surfaces: mesh.assign_defaults()?,
            volumes: &mesh.volumes,
            regions,
        })
    }

    /// Index over the mesh and regions of `config`.
    pub fn from_config(config: &'a Config) -> Result<Self, MeshPrepError> {
        Self::new(&config.mesh, &config.regions)
    }

    /// The effective surface control for `name`: the last matching control,
    /// or the defaults pseudo-control if none matches.
    ///
    /// The result is an owned copy; the index is never modified.
    pub fn resolve_surface_control(&self, name: &str) -> SurfaceControl {
        self.surfaces
            .iter()
            .rev()
            .find(|surface| surface.matches(name))
            .cloned()
            .unwrap_or_else(|| SurfaceControl::from_defaults(self.defaults))
    }

    /// The last matching volume control for `name`, if any.
    pub fn resolve_volume_control(&self, name: &str) -> Option<MeshVolume> {
        self.volumes
            .iter()
            .rev()
            .find(|volume| volume.matches(name))
            .cloned()
    }

    /// The first region in configuration order whose pattern matches `name`.
    pub fn resolve_region(&self, name: &str) -> Result<&'a Region, MeshPrepError> {
        let mut matches = self.regions.iter().filter(|region| region.matches(name));
        let first = matches
            .next()
            .ok_or_else(|| MeshPrepError::UnclassifiablePatch(name.to_string()))?;
        let others = matches.count();
        if others > 0 {
            log::debug!(
                "Patch {name} matches {} regions; assigning to `{}`",
                others + 1,
                first.name
            );
        }
        Ok(first)
    }

    /// The control governing `name`: its volume control if one matches,
    /// otherwise its effective surface control.
    pub fn resolve_control(&self, name: &str) -> Control {
        match self.resolve_volume_control(name) {
            Some(volume) => Control::Volume(volume),
            None => Control::Surface(self.resolve_surface_control(name)),
        }
    }
}

//! Assignment of geometry patches to volume controls and regions.

use std::collections::BTreeMap;

use crate::classify::index::ControlIndex;
use crate::config::MeshVolume;
use crate::geometry::Geometry;
use crate::io::check_file_stem;
use crate::mesh_error::MeshPrepError;

/// Result of one classification pass.
///
/// Every patch of the geometry appears exactly once: either as a key of
/// `controls` or in exactly one list of `regions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    /// Volume-controlled patches and the control that selected them.
    pub controls: BTreeMap<String, MeshVolume>,
    /// Region name to member patches, in geometry iteration order.
    pub regions: BTreeMap<String, Vec<String>>,
}

impl Classification {
    /// True if `patch` was assigned to a volume control.
    pub fn is_volume_controlled(&self, patch: &str) -> bool {
        self.controls.contains_key(patch)
    }

    /// The region `patch` was assigned to, if any.
    pub fn region_of(&self, patch: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|(_, patches)| patches.iter().any(|p| p == patch))
            .map(|(name, _)| name.as_str())
    }

    /// Number of classified patches.
    pub fn len(&self) -> usize {
        self.controls.len() + self.regions.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assigns every patch of `geometry` to a volume control or a region.
///
/// Patches selected by a volume control are never placed in a region, even
/// if a region pattern would also match. A patch that matches neither fails
/// the whole pass with [`MeshPrepError::UnclassifiablePatch`]; no partial
/// classification is returned.
///
/// Volume-controlled patch names and region names become output file names
/// and must be single path components ([`MeshPrepError::InvalidName`]).
pub fn classify_patches<G: Geometry>(
    geometry: &G,
    index: &ControlIndex<'_>,
) -> Result<Classification, MeshPrepError> {
    let mut classification = Classification::default();

    for patch in geometry.patches() {
        let name = patch.name();
        if let Some(control) = index.resolve_volume_control(name) {
            check_file_stem("patch", name)?;
            log::debug!("Patch {name} -> volume control (level {})", control.level);
            classification.controls.insert(name.to_string(), control);
        } else {
            let region = index.resolve_region(name)?;
            check_file_stem("region", &region.name)?;
            log::debug!("Patch {name} -> region {}", region.name);
            classification
                .regions
                .entry(region.name.clone())
                .or_default()
                .push(name.to_string());
        }
    }

    log::info!(
        "Classified {} patches: {} volume-controlled, {} regions",
        classification.len(),
        classification.controls.len(),
        classification.regions.len()
    );
    Ok(classification)
}

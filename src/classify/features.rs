//! Grouping of sharp feature edges by refinement level.
//!
//! Each feature edge takes the strictest (highest) feature level among the
//! patches it borders, ignoring volume-controlled patches. Edges that only
//! border volume-controlled patches are dropped. The result has one edge
//! list per level so each level can be exported to its own file.

use std::collections::BTreeMap;

use crate::classify::index::ControlIndex;
use crate::classify::patches::Classification;
use crate::config::Level;
use crate::geometry::Geometry;
use crate::mesh_error::MeshPrepError;

/// Level to half-edge indices, each list in feature discovery order.
pub type FeatureGroups = BTreeMap<Level, Vec<usize>>;

/// Classifies the feature edges of `geometry` detected at `feature_angle`
/// degrees.
///
/// For every feature edge, the half edges on patches that are not volume
/// controlled contribute their surface control's feature level; the edge is
/// filed under the maximum, represented by the last contributing half edge.
pub fn classify_features<G>(
    geometry: &G,
    feature_angle: f64,
    index: &ControlIndex<'_>,
    classification: &Classification,
) -> Result<FeatureGroups, MeshPrepError>
where
    G: Geometry + Sync,
{
    let features = geometry.feature_edges(feature_angle.to_radians());
    log::info!(
        "Found {} feature edges at {feature_angle} degrees",
        features.len()
    );

    // None marks a volume-controlled patch.
    let patch_levels: Vec<Option<Level>> = geometry
        .patches()
        .iter()
        .map(|patch| {
            (!classification.is_volume_controlled(patch.name()))
                .then(|| index.resolve_surface_control(patch.name()).feature_level())
        })
        .collect();

    let levels = edge_levels(geometry, &features, &patch_levels)?;

    let mut groups = FeatureGroups::new();
    for (level, edge) in levels.into_iter().flatten() {
        groups.entry(level).or_default().push(edge);
    }
    for (level, edges) in &groups {
        log::debug!("Feature level {level}: {} edges", edges.len());
    }
    Ok(groups)
}

fn edge_level<G: Geometry>(
    geometry: &G,
    feature: &[usize],
    patch_levels: &[Option<Level>],
) -> Result<Option<(Level, usize)>, MeshPrepError> {
    let mut best: Option<(Level, usize)> = None;
    for &i in feature {
        let edge = geometry.edge(i)?;
        let level = *patch_levels
            .get(edge.patch)
            .ok_or(MeshPrepError::IndexOutOfRange {
                kind: "patch",
                index: edge.patch,
            })?;
        if let Some(level) = level {
            let max = best.map_or(level, |(seen, _)| seen.max(level));
            best = Some((max, i));
        }
    }
    Ok(best)
}

#[cfg(not(feature = "rayon"))]
fn edge_levels<G: Geometry>(
    geometry: &G,
    features: &[Vec<usize>],
    patch_levels: &[Option<Level>],
) -> Result<Vec<Option<(Level, usize)>>, MeshPrepError> {
    features
        .iter()
        .map(|feature| edge_level(geometry, feature, patch_levels))
        .collect()
}

/// Parallel variant; `collect` keeps discovery order.
#[cfg(feature = "rayon")]
fn edge_levels<G: Geometry + Sync>(
    geometry: &G,
    features: &[Vec<usize>],
    patch_levels: &[Option<Level>],
) -> Result<Vec<Option<(Level, usize)>>, MeshPrepError> {
    use rayon::prelude::*;

    features
        .par_iter()
        .map(|feature| edge_level(geometry, feature, patch_levels))
        .collect()
}

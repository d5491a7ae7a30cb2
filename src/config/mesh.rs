//! Mesh parameters: defaults, surface controls and volume controls.
//!
//! Surface controls leave any parameter unset that should be inherited from
//! [`MeshDefaults`]. The inheritance (the *defaults cascade*) is an explicit
//! field-by-field merge, [`MeshSurface::assign_defaults`], which produces a
//! fully resolved [`SurfaceControl`] and never mutates the configured entry.
//!
//! # Layer invariant
//! Whenever `n_layers > 0`, both `first_layer_height` and
//! `layer_growth_rate` must be present. The check runs when defaults are
//! constructed or deserialized and again after every cascade, because a
//! surface may request layers while inheriting unset layer parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::level::Level;
use crate::config::pattern::{Matchable, Pattern};
use crate::mesh_error::MeshPrepError;

fn check_layers(
    n_layers: u32,
    first_layer_height: Option<f64>,
    layer_growth_rate: Option<f64>,
) -> Result<(), MeshPrepError> {
    if let Some(h) = first_layer_height {
        if !(h > 0.0) {
            return Err(MeshPrepError::InvalidConfig(format!(
                "first_layer_height must be > 0, got {h}"
            )));
        }
    }
    if let Some(g) = layer_growth_rate {
        if !(g >= 1.0) {
            return Err(MeshPrepError::InvalidConfig(format!(
                "layer_growth_rate must be >= 1, got {g}"
            )));
        }
    }
    if n_layers > 0 && first_layer_height.is_none() {
        return Err(MeshPrepError::MissingLayerParameter {
            field: "first_layer_height",
        });
    }
    if n_layers > 0 && layer_growth_rate.is_none() {
        return Err(MeshPrepError::MissingLayerParameter {
            field: "layer_growth_rate",
        });
    }
    Ok(())
}

/// Mesh-wide refinement and layer defaults.
///
/// Also used as the fully resolved parameter set of a surface control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMeshDefaults")]
pub struct MeshDefaults {
    pub target_level: Level,
    pub curvature_level: Level,
    pub feature_level: Level,
    pub n_layers: u32,
    pub first_layer_height: Option<f64>,
    pub layer_growth_rate: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMeshDefaults {
    target_level: Level,
    curvature_level: Level,
    feature_level: Level,
    #[serde(default)]
    n_layers: u32,
    #[serde(default)]
    first_layer_height: Option<f64>,
    #[serde(default)]
    layer_growth_rate: Option<f64>,
}

impl TryFrom<RawMeshDefaults> for MeshDefaults {
    type Error = MeshPrepError;

    fn try_from(raw: RawMeshDefaults) -> Result<Self, Self::Error> {
        MeshDefaults::try_new(
            raw.target_level,
            raw.curvature_level,
            raw.feature_level,
            raw.n_layers,
            raw.first_layer_height,
            raw.layer_growth_rate,
        )
    }
}

impl MeshDefaults {
    /// Defaults without boundary layers.
    pub fn new(target_level: Level, curvature_level: Level, feature_level: Level) -> Self {
        MeshDefaults {
            target_level,
            curvature_level,
            feature_level,
            n_layers: 0,
            first_layer_height: None,
            layer_growth_rate: None,
        }
    }

    /// Defaults with every field given; fails if the layer invariant is broken.
    pub fn try_new(
        target_level: Level,
        curvature_level: Level,
        feature_level: Level,
        n_layers: u32,
        first_layer_height: Option<f64>,
        layer_growth_rate: Option<f64>,
    ) -> Result<Self, MeshPrepError> {
        let defaults = MeshDefaults {
            target_level,
            curvature_level,
            feature_level,
            n_layers,
            first_layer_height,
            layer_growth_rate,
        };
        defaults.validate()?;
        Ok(defaults)
    }

    /// Checks the layer invariant and the layer value ranges.
    pub fn validate(&self) -> Result<(), MeshPrepError> {
        check_layers(self.n_layers, self.first_layer_height, self.layer_growth_rate)
    }
}

/// Surface refinement control; unset fields inherit from [`MeshDefaults`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshSurface {
    #[serde(rename = "match")]
    pub pattern: Pattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curvature_level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_layers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_layer_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_growth_rate: Option<f64>,
}

impl MeshSurface {
    /// A control for `pattern` that inherits everything.
    pub fn new(pattern: Pattern) -> Self {
        MeshSurface {
            pattern,
            target_level: None,
            curvature_level: None,
            feature_level: None,
            n_layers: None,
            first_layer_height: None,
            layer_growth_rate: None,
        }
    }

    /// Runs the defaults cascade: every unset field takes its value from
    /// `defaults`, then the layer invariant is checked on the result.
    pub fn assign_defaults(&self, defaults: &MeshDefaults) -> Result<SurfaceControl, MeshPrepError> {
        let settings = MeshDefaults {
            target_level: self.target_level.unwrap_or(defaults.target_level),
            curvature_level: self.curvature_level.unwrap_or(defaults.curvature_level),
            feature_level: self.feature_level.unwrap_or(defaults.feature_level),
            n_layers: self.n_layers.unwrap_or(defaults.n_layers),
            first_layer_height: self.first_layer_height.or(defaults.first_layer_height),
            layer_growth_rate: self.layer_growth_rate.or(defaults.layer_growth_rate),
        };
        settings.validate()?;
        Ok(SurfaceControl {
            pattern: Some(self.pattern.clone()),
            settings,
        })
    }
}

impl Matchable for MeshSurface {
    fn matches(&self, name: &str) -> bool {
        self.pattern.matches(name)
    }
}

/// A surface control after the defaults cascade.
///
/// `pattern` is `None` for the pseudo-control built from the mesh defaults,
/// which applies to patches no configured surface control selects.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceControl {
    pub pattern: Option<Pattern>,
    pub settings: MeshDefaults,
}

impl SurfaceControl {
    /// Wraps the mesh defaults as the fallback control.
    pub fn from_defaults(defaults: &MeshDefaults) -> Self {
        SurfaceControl {
            pattern: None,
            settings: defaults.clone(),
        }
    }

    /// True for the defaults pseudo-control.
    pub fn is_default(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn target_level(&self) -> Level {
        self.settings.target_level
    }

    pub fn curvature_level(&self) -> Level {
        self.settings.curvature_level
    }

    pub fn feature_level(&self) -> Level {
        self.settings.feature_level
    }

    pub fn n_layers(&self) -> u32 {
        self.settings.n_layers
    }
}

impl Matchable for SurfaceControl {
    fn matches(&self, name: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.matches(name))
    }
}

/// Volume refinement control. Fully specified; no defaults cascade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshVolume {
    #[serde(rename = "match")]
    pub pattern: Pattern,
    pub level: Level,
}

impl MeshVolume {
    pub fn new(pattern: Pattern, level: Level) -> Self {
        MeshVolume { pattern, level }
    }
}

impl Matchable for MeshVolume {
    fn matches(&self, name: &str) -> bool {
        self.pattern.matches(name)
    }
}

/// Kind of a mesh control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    Surface,
    Volume,
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlType::Surface => f.pad("surface"),
            ControlType::Volume => f.pad("volume"),
        }
    }
}

/// A resolved control of either kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Surface(SurfaceControl),
    Volume(MeshVolume),
}

impl Control {
    pub fn kind(&self) -> ControlType {
        match self {
            Control::Surface(_) => ControlType::Surface,
            Control::Volume(_) => ControlType::Volume,
        }
    }

    /// The refinement level this control drives: the volume level, or the
    /// surface target level.
    pub fn level(&self) -> Level {
        match self {
            Control::Surface(surface) => surface.target_level(),
            Control::Volume(volume) => volume.level,
        }
    }
}

impl Matchable for Control {
    fn matches(&self, name: &str) -> bool {
        match self {
            Control::Surface(surface) => surface.matches(name),
            Control::Volume(volume) => volume.matches(name),
        }
    }
}

/// Mesh definition: background sizing, defaults and ordered controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mesh {
    pub base_size: f64,
    pub buffer_cells: u32,
    /// Dihedral angle threshold for feature edges, in degrees.
    pub feature_angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curvature_level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_cells: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_level: Option<Level>,
    pub defaults: MeshDefaults,
    #[serde(default)]
    pub surfaces: Vec<MeshSurface>,
    #[serde(default)]
    pub volumes: Vec<MeshVolume>,
}

impl Mesh {
    /// Mesh with no optional settings and no controls.
    pub fn new(base_size: f64, buffer_cells: u32, feature_angle: f64, defaults: MeshDefaults) -> Self {
        Mesh {
            base_size,
            buffer_cells,
            feature_angle,
            curvature_level: None,
            proximity_cells: None,
            proximity_level: None,
            defaults,
            surfaces: Vec::new(),
            volumes: Vec::new(),
        }
    }

    /// Runs the defaults cascade over every surface control, in
    /// configuration order.
    pub fn assign_defaults(&self) -> Result<Vec<SurfaceControl>, MeshPrepError> {
        self.surfaces
            .iter()
            .map(|surface| surface.assign_defaults(&self.defaults))
            .collect()
    }

    /// True when both proximity settings are present and non-zero.
    pub fn is_proximity_enabled(&self) -> bool {
        self.proximity_cells.is_some_and(|cells| cells > 0)
            && self.proximity_level.is_some_and(|level| level.get() > 0)
    }

    /// Feature angle converted to radians.
    pub fn feature_angle_radians(&self) -> f64 {
        self.feature_angle.to_radians()
    }

    /// Checks value ranges and that every surface control resolves.
    pub fn validate(&self) -> Result<(), MeshPrepError> {
        if !(self.base_size > 0.0) {
            return Err(MeshPrepError::InvalidConfig(format!(
                "base_size must be > 0, got {}",
                self.base_size
            )));
        }
        if !(self.feature_angle >= 0.0) {
            return Err(MeshPrepError::InvalidConfig(format!(
                "feature_angle must be >= 0, got {}",
                self.feature_angle
            )));
        }
        if self.proximity_cells == Some(0) {
            return Err(MeshPrepError::InvalidConfig(
                "proximity_cells must be >= 1".into(),
            ));
        }
        self.defaults.validate()?;
        self.assign_defaults().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lvl(raw: u32) -> Level {
        Level::new(raw).unwrap()
    }

    fn defaults() -> MeshDefaults {
        MeshDefaults::new(lvl(2), lvl(3), lvl(1))
    }

    #[test]
    fn defaults_with_layers_require_height() {
        let err = MeshDefaults::try_new(lvl(1), lvl(1), lvl(1), 3, None, Some(1.2)).unwrap_err();
        assert!(matches!(
            err,
            MeshPrepError::MissingLayerParameter {
                field: "first_layer_height"
            }
        ));
    }

    #[test]
    fn defaults_with_layers_require_growth_rate() {
        let err = MeshDefaults::try_new(lvl(1), lvl(1), lvl(1), 3, Some(1e-3), None).unwrap_err();
        assert!(matches!(
            err,
            MeshPrepError::MissingLayerParameter {
                field: "layer_growth_rate"
            }
        ));
    }

    #[test]
    fn layer_values_are_range_checked() {
        assert!(MeshDefaults::try_new(lvl(1), lvl(1), lvl(1), 0, Some(0.0), None).is_err());
        assert!(MeshDefaults::try_new(lvl(1), lvl(1), lvl(1), 0, None, Some(0.5)).is_err());
        assert!(MeshDefaults::try_new(lvl(1), lvl(1), lvl(1), 2, Some(1e-3), Some(1.0)).is_ok());
    }

    #[test]
    fn cascade_fills_every_unset_field() {
        let surface = MeshSurface {
            feature_level: Some(lvl(5)),
            ..MeshSurface::new(Pattern::new("wing").unwrap())
        };
        let control = surface.assign_defaults(&defaults()).unwrap();
        assert_eq!(control.target_level(), lvl(2));
        assert_eq!(control.curvature_level(), lvl(3));
        assert_eq!(control.feature_level(), lvl(5));
        assert_eq!(control.n_layers(), 0);
        assert!(!control.is_default());
        // The configured entry is left untouched.
        assert_eq!(surface.target_level, None);
    }

    #[test]
    fn cascade_revalidates_layers() {
        let surface = MeshSurface {
            n_layers: Some(4),
            first_layer_height: Some(1e-4),
            ..MeshSurface::new(Pattern::new("hull").unwrap())
        };
        let err = surface.assign_defaults(&defaults()).unwrap_err();
        assert!(matches!(
            err,
            MeshPrepError::MissingLayerParameter {
                field: "layer_growth_rate"
            }
        ));
    }

    #[test]
    fn cascade_inherits_layer_parameters() {
        let defaults =
            MeshDefaults::try_new(lvl(1), lvl(1), lvl(1), 0, Some(2e-3), Some(1.3)).unwrap();
        let surface = MeshSurface {
            n_layers: Some(5),
            ..MeshSurface::new(Pattern::new("hull").unwrap())
        };
        let control = surface.assign_defaults(&defaults).unwrap();
        assert_eq!(control.settings.n_layers, 5);
        assert_eq!(control.settings.first_layer_height, Some(2e-3));
        assert_eq!(control.settings.layer_growth_rate, Some(1.3));
    }

    #[test]
    fn deserialized_defaults_are_validated() {
        let yaml = "target_level: 1\ncurvature_level: 1\nfeature_level: 1\nn_layers: 2\n";
        assert!(serde_yaml::from_str::<MeshDefaults>(yaml).is_err());
        let yaml = "target_level: 1\ncurvature_level: 2\nfeature_level: 3\n";
        let d: MeshDefaults = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(d.n_layers, 0);
        assert_eq!(d.feature_level, lvl(3));
    }

    #[test]
    fn control_kind_and_matching() {
        let volume = Control::Volume(MeshVolume::new(Pattern::new("box").unwrap(), lvl(4)));
        let fallback = Control::Surface(SurfaceControl::from_defaults(&defaults()));
        assert_eq!(volume.kind(), ControlType::Volume);
        assert_eq!(fallback.kind(), ControlType::Surface);
        assert!(volume.matches("box_refine"));
        assert!(!fallback.matches("anything"));
        assert_eq!(volume.level(), lvl(4));
        assert_eq!(fallback.level(), lvl(2));
    }

    #[test]
    fn proximity_requires_both_settings() {
        let mut mesh = Mesh::new(0.5, 4, 30.0, defaults());
        assert!(!mesh.is_proximity_enabled());
        mesh.proximity_cells = Some(3);
        assert!(!mesh.is_proximity_enabled());
        mesh.proximity_level = Some(lvl(0));
        assert!(!mesh.is_proximity_enabled());
        mesh.proximity_level = Some(lvl(4));
        assert!(mesh.is_proximity_enabled());
    }

    #[test]
    fn control_type_display_pads() {
        assert_eq!(format!("{:<8}|", ControlType::Volume), "volume  |");
        assert_eq!(ControlType::Surface.to_string(), "surface");
    }

    #[test]
    fn mesh_validation_rejects_bad_ranges() {
        assert!(Mesh::new(0.0, 4, 30.0, defaults()).validate().is_err());
        assert!(Mesh::new(1.0, 4, -1.0, defaults()).validate().is_err());
        let mut mesh = Mesh::new(1.0, 4, 30.0, defaults());
        mesh.proximity_cells = Some(0);
        assert!(mesh.validate().is_err());
    }
}

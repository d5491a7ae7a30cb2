//! Named fluid regions.

use serde::{Deserialize, Serialize};

use crate::config::pattern::{Matchable, Pattern};

/// Kind of simulation region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    #[default]
    Fluid,
}

/// A named fluid volume bounded by the patches its pattern selects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub name: String,
    #[serde(rename = "type", default)]
    pub region_type: RegionType,
    #[serde(rename = "match")]
    pub pattern: Pattern,
    /// A point strictly inside the region, used by the mesher to pick
    /// which side of the surface to keep.
    pub location_in_mesh: [f64; 3],
}

impl Region {
    /// Creates a fluid region.
    pub fn fluid(name: impl Into<String>, pattern: Pattern, location_in_mesh: [f64; 3]) -> Self {
        Region {
            name: name.into(),
            region_type: RegionType::Fluid,
            pattern,
            location_in_mesh,
        }
    }
}

impl Matchable for Region {
    fn matches(&self, name: &str) -> bool {
        self.pattern.matches(name)
    }
}

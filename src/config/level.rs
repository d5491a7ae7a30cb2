//! `Level`: a bounded refinement level.
//!
//! Refinement levels are small non-negative integers; each level halves the
//! background cell size. The valid range is checked once, when the value is
//! constructed or deserialized, so the rest of the pipeline can treat a
//! `Level` as an opaque ordered key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshPrepError;

/// Refinement level in `0..=Level::MAX`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct Level(u8);

impl Level {
    /// Highest accepted refinement level.
    pub const MAX: u8 = 15;

    /// Creates a level, rejecting values above [`Level::MAX`].
    pub fn new(raw: u32) -> Result<Self, MeshPrepError> {
        if raw > u32::from(Self::MAX) {
            return Err(MeshPrepError::InvalidLevel(raw));
        }
        Ok(Level(raw as u8))
    }

    /// Returns the raw level value.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Level {
    type Error = MeshPrepError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Level::new(raw)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        u32::from(level.0)
    }
}

/// Prints the bare level number.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

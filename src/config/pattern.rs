//! Name patterns for regions and mesh controls.
//!
//! A [`Pattern`] is a regular expression tested against patch names with
//! *prefix-anchored* semantics: the expression must match starting at the
//! first character of the name, but it does not have to consume the whole
//! name. `wing` therefore matches `wing_tip`, while `tip` does not.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mesh_error::MeshPrepError;

/// Compiled, prefix-anchored name pattern.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source`; malformed expressions are configuration errors.
    pub fn new(source: &str) -> Result<Self, MeshPrepError> {
        let regex =
            Regex::new(&format!("^(?:{source})")).map_err(|e| MeshPrepError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// Returns true if the pattern matches at the start of `text`.
    #[inline]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The expression as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Anything selected by matching a patch name against a pattern.
///
/// Implemented by regions and by both kinds of mesh control.
pub trait Matchable {
    /// Returns true if `name` is selected by this entry.
    fn matches(&self, name: &str) -> bool;
}

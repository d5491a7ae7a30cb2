//! Patch and feature-edge classification.
//!
//! The pipeline runs in three steps, each recomputed from scratch on every
//! pass:
//!
//! 1. [`ControlIndex`] resolves the configured controls (running the
//!    defaults cascade) and answers per-patch lookups.
//! 2. [`classify_patches`] assigns every patch to a volume control or a
//!    region.
//! 3. [`classify_features`] groups sharp feature edges by refinement level.

pub mod features;
pub mod index;
pub mod patches;

pub use features::{FeatureGroups, classify_features};
pub use index::ControlIndex;
pub use patches::{Classification, classify_patches};

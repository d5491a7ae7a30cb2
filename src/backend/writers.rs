//! Port for the solver dictionary writers.
//!
//! The backend prepares geometry and classification results; turning them
//! into solver dictionaries is delegated to an injected [`DictionaryWriter`].
//! [`UnimplementedWriter`] is the stand-in used when no solver-specific
//! writer is available.

use crate::classify::{Classification, FeatureGroups};
use crate::config::Config;
use crate::mesh_error::MeshPrepError;

/// Everything a dictionary writer may read.
#[derive(Clone, Copy, Debug)]
pub struct WriterContext<'a> {
    pub config: &'a Config,
    pub classification: &'a Classification,
    pub features: &'a FeatureGroups,
}

/// Writes the solver dictionaries of a prepared case.
///
/// [`MeshBackend::write_dictionaries`](crate::backend::MeshBackend::write_dictionaries)
/// calls the methods in declaration order and stops at the first error.
pub trait DictionaryWriter {
    fn write_block_mesh_dict(&mut self, ctx: &WriterContext<'_>) -> Result<(), MeshPrepError>;
    fn write_control_dict(&mut self, ctx: &WriterContext<'_>) -> Result<(), MeshPrepError>;
    fn write_decompose_par_dict(&mut self, ctx: &WriterContext<'_>) -> Result<(), MeshPrepError>;
    fn write_fv_schemes(&mut self, ctx: &WriterContext<'_>) -> Result<(), MeshPrepError>;
    fn write_fv_solution(&mut self, ctx: &WriterContext<'_>) -> Result<(), MeshPrepError>;
    fn write_snappy_hex_mesh_dict(&mut self, ctx: &WriterContext<'_>)
    -> Result<(), MeshPrepError>;
}

/// Writer whose every method reports [`MeshPrepError::Unimplemented`].
#[derive(Clone, Debug, Default)]
pub struct UnimplementedWriter;

impl DictionaryWriter for UnimplementedWriter {
    fn write_block_mesh_dict(&mut self, _ctx: &WriterContext<'_>) -> Result<(), MeshPrepError> {
        Err(MeshPrepError::Unimplemented("blockMeshDict"))
    }

    fn write_control_dict(&mut self, _ctx: &WriterContext<'_>) -> Result<(), MeshPrepError> {
        Err(MeshPrepError::Unimplemented("controlDict"))
    }

    fn write_decompose_par_dict(&mut self, _ctx: &WriterContext<'_>) -> Result<(), MeshPrepError> {
        Err(MeshPrepError::Unimplemented("decomposeParDict"))
    }

    fn write_fv_schemes(&mut self, _ctx: &WriterContext<'_>) -> Result<(), MeshPrepError> {
        Err(MeshPrepError::Unimplemented("fvSchemes"))
    }

    fn write_fv_solution(&mut self, _ctx: &WriterContext<'_>) -> Result<(), MeshPrepError> {
        Err(MeshPrepError::Unimplemented("fvSolution"))
    }

    fn write_snappy_hex_mesh_dict(
        &mut self,
        _ctx: &WriterContext<'_>,
    ) -> Result<(), MeshPrepError> {
        Err(MeshPrepError::Unimplemented("snappyHexMeshDict"))
    }
}

//! Surface mesh I/O.
//!
//! This module provides trait-based readers and writers for surface meshes
//! plus path helpers that transparently handle gzip compression: any path
//! ending in `.gz` is decompressed on read and compressed on write.

pub mod wavefront;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::geometry::SurfaceMesh;
use crate::mesh_error::MeshPrepError;

/// Trait for readers that produce a surface mesh.
pub trait SurfaceReader {
    /// Parse a surface mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<SurfaceMesh, MeshPrepError>;
}

/// Trait for writers that serialize a surface mesh.
pub trait SurfaceWriter {
    /// Write a surface mesh to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &SurfaceMesh) -> Result<(), MeshPrepError>;
}

/// Returns true if `path` has a `.gz` extension (case-insensitive).
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Checks that `name` is a single path component usable as a file stem.
///
/// Exported surfaces are named after patches and regions; a separator or a
/// `.`/`..` name would place the file outside its directory.
pub fn check_file_stem(kind: &'static str, name: &str) -> Result<(), MeshPrepError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        || Path::new(name).is_absolute();
    if bad {
        return Err(MeshPrepError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Opens `path` for reading, decompressing `.gz` files.
pub fn open_reader(path: &Path) -> Result<Box<dyn Read>, MeshPrepError> {
    let file = File::open(path).map_err(|e| MeshPrepError::io(path, e))?;
    let reader = BufReader::new(file);
    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Creates `path` and hands a writer to `body`, compressing `.gz` files.
///
/// The output is flushed (and the gzip trailer written) before returning, so
/// write errors surface here rather than on drop.
pub fn write_file<F>(path: &Path, body: F) -> Result<(), MeshPrepError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), MeshPrepError>,
{
    let file = File::create(path).map_err(|e| MeshPrepError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    if is_gzip(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        body(&mut encoder).map_err(|e| e.at_path(path))?;
        writer = encoder.finish().map_err(|e| MeshPrepError::io(path, e))?;
    } else {
        body(&mut writer).map_err(|e| e.at_path(path))?;
    }
    writer.flush().map_err(|e| MeshPrepError::io(path, e))
}

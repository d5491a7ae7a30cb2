//! Structural self-checks for in-memory geometry.
//!
//! A [`SurfaceMesh`](crate::geometry::SurfaceMesh) is consistent when every
//! face references existing vertices and an existing patch. Imported and
//! merged surfaces are checked in debug builds, or in release builds with
//! the `check-invariants` feature.

use crate::mesh_error::MeshPrepError;

/// Types that can verify their own index consistency.
pub trait DebugInvariants {
    /// Panics on a broken invariant when checks are compiled in; no-op otherwise.
    fn debug_assert_invariants(&self);
    /// Returns the first broken invariant as an error.
    fn validate_invariants(&self) -> Result<(), MeshPrepError>;
}

/// Panics with `$ctx` if the fallible check `$expr` fails, when debug
/// assertions or the `check-invariants` feature are enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

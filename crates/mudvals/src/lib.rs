//! # Mudvals
//!
//! Tagged values and copy-on-write hybrid arrays for a stack-based MUD
//! scripting VM.
//!
//! Mudvals is the value engine under the interpreter: every datum a script
//! pushes, stores, or passes lives in a [`Value`], and every container is a
//! hybrid [`ArrayRef`] that stores itself as a packed vector when its keys
//! are consecutive integers and as an ordered dictionary otherwise.
//!
//! ## Architecture
//!
//! - **Values**: a closed tagged enum; heap payloads (strings, locks,
//!   arrays) are reference-counted and released by `Drop`
//! - **Comparison**: one total order over all values, reused as the
//!   dictionary key ordering
//! - **Arrays**: shared handles with copy-on-write mutation; pinning opts
//!   a container into deliberate shared-state semantics
//!
//! The VM, object database, and network layer live in the host server;
//! this crate is a pure library with no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod error;
pub mod value;

// Re-export main types
pub use array::{ArrayMode, ArrayRef};
pub use error::{ArrayError, Result};
pub use value::{Case, LockExpr, ObjRef, ProgAddr, TypeTag, Value};

/// Mudvals version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}

//! Target extension pipeline for the Girder build toolkit.
//!
//! A build description declares targets (libraries, programs, objects,
//! tests, installers) as flat parameter maps. This crate resolves each
//! declaration into environment mutations and a builder invocation:
//!
//! 1. control keys are extracted (`name`, `signed`, `also64bit`, ...)
//! 2. library declarations register their `dependent_target_settings` for
//!    later consumers
//! 3. platform-prefixed parameters are merged for the active platforms
//! 4. list-valued parameters append or prepend to the environment's
//!    construction variables; everything else replaces
//! 5. the builder runs, optionally followed by a signing pass or a
//!    parallel 64-bit build
//!
//! The build environment itself is an external capability behind the
//! [`BuildEnv`] trait; [`MemoryEnv`] is an in-memory implementation for
//! tests and dry runs.

pub mod context;
pub mod env;
pub mod error;
pub mod extend;
pub mod media;
pub mod memory;
pub mod paths;

// Re-exports for convenience.
pub use context::{BuildContext, LibraryRecord};
pub use env::{BuildEnv, BuildNode, BuilderKind};
pub use error::{BuildError, Result};
pub use extend::BuildOutput;
pub use memory::MemoryEnv;
pub use paths::{components, expand_build_script};

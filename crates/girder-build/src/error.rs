//! Error types for target extension.

use crate::env::BuilderKind;

/// Errors that can occur while extending a target declaration.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Every target declaration must carry a `name` parameter.
    #[error("{kind:?} target declaration is missing the required 'name' parameter")]
    MissingName {
        /// The builder kind that was requested.
        kind: BuilderKind,
    },

    /// `signed` and `also64bit` cannot be combined: the 64-bit pass would
    /// bypass the signing step.
    #[error("target '{name}' requests both 'signed' and 'also64bit'; the variants are mutually exclusive")]
    SignedConflict {
        /// The offending target.
        name: String,
    },
}

/// Result type for target extension.
pub type Result<T> = std::result::Result<T, BuildError>;

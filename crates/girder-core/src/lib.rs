//! Parameter model and platform merging for the Girder build toolkit.
//!
//! Build targets are declared as flat maps of named parameters. A parameter
//! may be restricted to one platform by a fixed key prefix (`lin_`, `mac_`,
//! `posix_`, `win_`); resolving a declaration means dropping the keys of
//! inactive platforms, stripping the prefixes of active ones, and merging
//! the resulting collisions. This crate owns those primitives:
//!
//! - [`ParamValue`] / [`ParamMap`] — values and insertion-ordered maps
//! - [`Platform`] / [`ActivePlatforms`] / [`merge_by_platform`] — the
//!   platform-prefix merger
//! - [`read_version`] — comma-separated version files with build-number
//!   override

pub mod error;
pub mod params;
pub mod platform;
pub mod value;
pub mod version;

// Re-exports for convenience.
pub use error::{CoreError, Result};
pub use params::ParamMap;
pub use platform::{merge_by_platform, ActivePlatforms, Platform, PlatformBit};
pub use value::ParamValue;
pub use version::{read_version, read_version_with_build};

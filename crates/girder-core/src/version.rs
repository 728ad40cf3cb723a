//! Version-file reading.
//!
//! A version file is a line-oriented `key = value` definition file exposing
//! a `version` entry of comma-separated components, e.g.
//!
//! ```text
//! # product version
//! version = 4, 1, 0, 0
//! ```
//!
//! The final component may be overridden by a build number, so that CI
//! builds stamp artifacts without editing the file.

use std::path::Path;

use crate::error::{CoreError, Result};

/// Environment variable holding the build number override.
pub const BUILD_NUMBER_VAR: &str = "GIRDER_BUILD_NUMBER";

/// Version string used when the file defines no `version` entry.
const DEFAULT_VERSION: &str = "0.0.0.0";

/// Read a version file, overriding the last component from the
/// `GIRDER_BUILD_NUMBER` environment variable when it is set.
pub fn read_version(path: &Path) -> Result<String> {
    let build = std::env::var(BUILD_NUMBER_VAR).ok();
    read_version_with_build(path, build.as_deref())
}

/// Read a version file with an explicit build-number override.
///
/// Returns `0.0.0.0` when the file has no `version` entry. Component
/// separators are commas in the file and dots in the result.
pub fn read_version_with_build(path: &Path, build: Option<&str>) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(raw) = extract_version(&content) else {
        return Ok(DEFAULT_VERSION.to_string());
    };

    let mut parts: Vec<String> = raw.split(',').map(|p| p.trim().to_string()).collect();
    if let (Some(build), Some(last)) = (build, parts.last_mut()) {
        *last = build.to_string();
    }
    Ok(parts.join("."))
}

/// Find the `version` definition in the file body, stripping optional
/// quotes around the value.
fn extract_version(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() != "version" {
            continue;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'');
        return Some(value.to_string());
    }
    None
}

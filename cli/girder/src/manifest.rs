//! `girder.toml` manifest parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The top-level manifest structure for a girder project.
#[derive(Debug, Clone, Deserialize)]
pub struct GirderManifest {
    /// Suppression-check configuration.
    #[serde(default)]
    pub check: Option<CheckConfig>,
}

/// `[check]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// Files or directories to scan when `girder check` gets no arguments.
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl GirderManifest {
    /// Search upward from `start_dir` for a `girder.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("girder.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: GirderManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Paths the `check` command should scan when none are given.
    pub fn check_paths(&self) -> &[PathBuf] {
        match &self.check {
            Some(check) => &check.paths,
            None => &[],
        }
    }
}

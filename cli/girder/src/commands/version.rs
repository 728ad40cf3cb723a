//! `girder version` — resolve a product version string.

use std::path::Path;

use anyhow::Result;
use girder_core::{read_version, read_version_with_build};

/// Print the dotted version from a comma-separated version file. With
/// `build` given, the last component is replaced; otherwise the
/// `GIRDER_BUILD_NUMBER` environment variable applies when set.
pub fn run(file: &Path, build: Option<&str>) -> Result<()> {
    let version = match build {
        Some(build) => read_version_with_build(file, Some(build))?,
        None => read_version(file)?,
    };
    println!("{version}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_version_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("VERSION");
        std::fs::write(&file, "version=1,2,3,4\n").unwrap();

        run(&file, None).unwrap();
        run(&file, Some("99")).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(run(Path::new("/nonexistent/VERSION"), None).is_err());
    }
}

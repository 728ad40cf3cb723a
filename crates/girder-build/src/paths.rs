//! Path helpers for build-description files.
//!
//! Build descriptions follow the `directory/directory.build` naming
//! convention: the description for `media/codecs` lives at
//! `media/codecs/codecs.build`. These helpers complete directory paths to
//! the description files a top-level build pulls in.

use std::path::{Path, PathBuf};

/// Expand a directory path to its build-description file.
///
/// `media/codecs` becomes `media/codecs/codecs.build`. Paths without a
/// final component are returned unchanged.
pub fn expand_build_script(path: &Path) -> PathBuf {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => path.join(format!("{name}.build")),
        None => path.to_path_buf(),
    }
}

/// Complete a list of component paths: existing files pass through,
/// directories expand via [`expand_build_script`].
pub fn components<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| {
            let path = p.as_ref();
            if path.is_file() {
                path.to_path_buf()
            } else {
                expand_build_script(path)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_expand_to_description_files() {
        let expanded = expand_build_script(Path::new("media/codecs"));
        assert_eq!(expanded, PathBuf::from("media/codecs/codecs.build"));
    }

    #[test]
    fn existing_files_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.build");
        std::fs::write(&file, "").unwrap();

        let missing = dir.path().join("plugin");
        let completed = components([file.clone(), missing.clone()]);
        assert_eq!(completed[0], file);
        assert_eq!(completed[1], missing.join("plugin.build"));
    }
}

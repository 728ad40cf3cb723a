//! `girder check` — lint Valgrind suppression files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use girder_suppressions::{is_suppression_file, CheckReport, SuppressionCheck};

/// Run the suppression checker over the given paths and print the report.
///
/// Directories are scanned for suppression files; explicit file paths are
/// checked regardless of name. Returns an error when any diagnostics were
/// found, so the process exits nonzero.
pub fn run(paths: &[PathBuf], report_format: Option<&str>) -> Result<()> {
    let files = collect_files(paths)?;
    if files.is_empty() {
        bail!("no suppression files to check (pass paths or set [check] paths in girder.toml)");
    }

    let mut check = SuppressionCheck::new();
    for file in &files {
        check.check_path(file)?;
    }
    let report = check.finish();
    print_report(&report, report_format)?;

    if !report.is_clean() {
        bail!("{} problem(s) found", report.diagnostics.len());
    }
    Ok(())
}

fn print_report(report: &CheckReport, format: Option<&str>) -> Result<()> {
    match format {
        None | Some("human") => print!("{}", report.render_human()),
        Some("json") => println!("{}", report.to_json()?),
        Some(other) => bail!("unknown report format: {other} (expected human or json)"),
    }
    Ok(())
}

/// Expand the path list: files pass through, directories are walked for
/// suppression files.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if is_suppression_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

//! The suppression-file line classifier.

use std::collections::HashMap;
use std::path::Path;

use crate::report::{CheckReport, Diagnostic};

/// Errors that can occur while checking suppression files.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// I/O error reading a suppression file.
    #[error("I/O error reading {file}: {source}")]
    Io {
        /// The file being read.
        file: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Placeholder name that template suppressions ship with.
const PLACEHOLDER_NAME: &str = "insert_a_suppression_name_here";

/// What the previous line says the next content line must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    /// Any grammar line.
    Content,
    /// The line after `{` names the suppression.
    SuppressionName,
    /// The line after `Memcheck:Param` names the system-call parameter.
    ParamName,
}

/// A multi-file suppression check.
///
/// Feed it every changed suppression file, then [`finish`] to get the
/// accumulated report. Duplicate suppression names are detected across the
/// whole file set.
///
/// [`finish`]: SuppressionCheck::finish
#[derive(Debug, Default)]
pub struct SuppressionCheck {
    /// Suppression name -> (file, line) of first definition.
    seen_names: HashMap<String, (String, usize)>,
    diagnostics: Vec<Diagnostic>,
    files_checked: usize,
}

impl SuppressionCheck {
    /// Start a check over an empty file set.
    pub fn new() -> Self {
        SuppressionCheck::default()
    }

    /// Read and check one file from disk.
    pub fn check_path(&mut self, path: &Path) -> Result<(), CheckError> {
        let file = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
            file: file.clone(),
            source,
        })?;
        self.check_file(&file, &content);
        Ok(())
    }

    /// Check one file's contents under the given display name.
    pub fn check_file(&mut self, file: &str, content: &str) {
        self.files_checked += 1;
        let mut expect = Expectation::Content;
        let mut require_memcheck_type = false;

        for (line_num, raw) in content.lines().enumerate() {
            let line_num = line_num + 1;
            let line = raw.trim_start();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match expect {
                Expectation::SuppressionName => {
                    self.record_name(file, line_num, line);
                    require_memcheck_type = true;
                    expect = Expectation::Content;
                    continue;
                }
                Expectation::ParamName => {
                    expect = Expectation::Content;
                    continue;
                }
                Expectation::Content => {}
            }

            if require_memcheck_type {
                if !line.starts_with("Memcheck:") {
                    self.push(
                        file,
                        line_num,
                        format!("\"{line}\" should be \"Memcheck:...\""),
                    );
                }
                require_memcheck_type = false;
            }

            if line == "{" {
                expect = Expectation::SuppressionName;
                continue;
            }
            if line == "Memcheck:Param" {
                expect = Expectation::ParamName;
                continue;
            }

            if line.starts_with("fun:")
                || line.starts_with("obj:")
                || line.starts_with("Memcheck:")
                || line == "}"
                || line == "..."
            {
                continue;
            }

            self.push(file, line_num, format!("\"{line}\" is probably wrong"));
        }
    }

    /// Finish the check and take the accumulated report.
    pub fn finish(self) -> CheckReport {
        CheckReport {
            diagnostics: self.diagnostics,
            files_checked: self.files_checked,
        }
    }

    fn record_name(&mut self, file: &str, line_num: usize, name: &str) {
        if name.contains(PLACEHOLDER_NAME) {
            self.push(
                file,
                line_num,
                format!("\"{PLACEHOLDER_NAME}\" is not a valid suppression name"),
            );
        }
        match self.seen_names.get(name) {
            Some((first_file, first_line)) if first_file == file => {
                self.push(
                    file,
                    line_num,
                    format!(
                        "suppression with name \"{name}\" has already been defined at line {first_line}"
                    ),
                );
            }
            Some((first_file, first_line)) => {
                self.push(
                    file,
                    line_num,
                    format!(
                        "suppression with name \"{name}\" has already been defined at {first_file} line {first_line}"
                    ),
                );
            }
            None => {
                self.seen_names
                    .insert(name.to_string(), (file.to_string(), line_num));
            }
        }
    }

    fn push(&mut self, file: &str, line: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            file: file.to_string(),
            line,
            message,
        });
    }
}

/// Whether a path looks like a suppression file worth checking
/// (`...suppressions....txt`).
pub fn is_suppression_file(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.contains("suppressions") && name.ends_with(".txt"),
        None => false,
    }
}

//! Accumulated check results.

use std::fmt;

use serde::Serialize;

/// One problem found in a suppression file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The file the problem was found in.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

/// The outcome of checking a set of suppression files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// Every problem found, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl CheckReport {
    /// Whether the file set passed with no findings.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Render the report for terminal output.
    pub fn render_human(&self) -> String {
        if self.is_clean() {
            return format!(
                "checked {} file(s): no suppression problems found",
                self.files_checked
            );
        }
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
        out.push_str(&format!(
            "checked {} file(s): {} problem(s) found",
            self.files_checked,
            self.diagnostics.len()
        ));
        out
    }

    /// Render the report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//! Formatted output artifact rendered by the CI system after the step runs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

/// Markdown status file. Without a path every write is a no-op.
///
/// Writes are best effort: failures are logged and never abort the step.
#[derive(Debug, Clone, Default)]
pub struct FormattedOutput {
    path: Option<PathBuf>,
}

impl FormattedOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.filter(|path| !path.as_os_str().is_empty()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Truncate whatever a previous run left behind.
    pub fn clear(&self) {
        let Some(path) = self.path() else {
            return;
        };
        if let Err(err) = fs::write(path, "") {
            warn!(path = %path.display(), error = %err, "failed to clear formatted output");
        }
    }

    /// Append a block of text followed by a blank line.
    pub fn section(&self, text: &str) {
        let Some(path) = self.path() else {
            return;
        };
        if let Err(err) = append(path, &format!("{text}\n\n")) {
            warn!(path = %path.display(), error = %err, "failed to write formatted output");
        }
    }

    pub fn report_error(&self, message: &str) {
        self.section(&format!(
            "## Message send failed!\n\nError message:\n{message}"
        ));
    }

    pub fn report_success(&self, from: &str, to: &str, body: &str) {
        self.section(&format!(
            "## Message successfully sent!\n\nFrom:\n{from}\nTo:\n{to}\nMessage:\n{body}"
        ));
    }
}

fn append(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

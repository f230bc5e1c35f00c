//! README listing the placeholders a deployer must replace.

use crate::error::Result;
use crate::fs_utils::{resolve_output_path, write_file};
use crate::placeholder::PlaceholderSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "PARAMETERIZED MONITORING STACK SETUP";
pub const DEFAULT_INTRO: &str =
    "Before running the stack, please replace the following placeholders in the files:";
pub const DEFAULT_FILE_NAME: &str = "README.txt";

/// Fixed text written above the placeholder list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceHeader {
    pub title: String,
    pub intro: String,
}

impl Default for GuidanceHeader {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            intro: DEFAULT_INTRO.to_string(),
        }
    }
}

/// Formats the guidance text: title, underline, intro, then one
/// `TOKEN: prompt` line per placeholder.
pub fn render_guidance(header: &GuidanceHeader, placeholders: &PlaceholderSet) -> String {
    let mut out = String::new();
    out.push_str(&header.title);
    out.push('\n');
    out.push_str(&"=".repeat(header.title.chars().count()));
    out.push_str("\n\n");
    out.push_str(&header.intro);
    out.push_str("\n\n");

    for placeholder in placeholders {
        out.push_str(&format!("{}: {}\n", placeholder.token, placeholder.prompt));
    }

    out
}

/// Writes the guidance file under `root` and returns its full path
///
/// # Errors
///
/// - `StackgenError::PathTraversal` if `file_name` leaves the output root.
/// - `StackgenError::Io` if the file cannot be written.
pub fn write_guidance(
    root: &Path,
    file_name: &str,
    header: &GuidanceHeader,
    placeholders: &PlaceholderSet,
) -> Result<PathBuf> {
    let path = resolve_output_path(root, file_name)?;
    write_file(&path, &render_guidance(header, placeholders))?;
    tracing::debug!(path = %path.display(), "wrote guidance file");
    Ok(path)
}

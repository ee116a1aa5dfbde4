//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A small, valid cheat sheet with direct entries, a subsection and a config block.
pub const BASIC_SHEET: &str = r#"title: "Vim Basics"
config:
  columns: 3
  paper_size: letter
sections:
  Movement:
    h: Left
    j: Down
    k: Up
    l: Right
  Editing:
    x: Delete character
    dd: Delete line
    Insert mode:
      i: Insert before cursor
      a: Append after cursor
  Files:
    ":w": Save
    ":q": Quit
"#;

/// Number of hotkeys in [`BASIC_SHEET`].
pub const BASIC_SHEET_HOTKEYS: usize = 10;

/// A cheat sheet missing its title and with a broken section.
pub const INVALID_SHEET: &str = r"sections:
  Movement: [h, j, k, l]
";

/// Builds a cheat sheet with `sections` sections of `entries` hotkeys each.
///
/// Every other section groups its hotkeys under two subsections.
pub fn generated_sheet(title: &str, sections: usize, entries: usize) -> String {
    let mut yaml = format!("title: \"{title}\"\nsections:\n");

    for s in 0..sections {
        let _ = writeln!(yaml, "  Section {s}:");
        if s % 2 == 0 {
            for e in 0..entries {
                let _ = writeln!(yaml, "    Ctrl+{s}-{e}: Action {e} of section {s}");
            }
        } else {
            let half = entries / 2;
            for (name, range) in [("First", 0..half), ("Second", half..entries)] {
                if range.is_empty() {
                    continue;
                }
                let _ = writeln!(yaml, "    {name}:");
                for e in range {
                    let _ = writeln!(yaml, "      Alt+{s}-{e}: Grouped action {e}");
                }
            }
        }
    }

    yaml
}

/// Writes a cheat sheet to a temporary directory.
///
/// # Returns
/// The file path and the directory guard (keep it alive for the test's duration).
pub fn create_temp_sheet_file(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("sheet.yaml");
    fs::write(&path, content).expect("Failed to write cheat sheet");
    (path, temp_dir)
}

/// Writes a TOML config file next to the cheat sheet.
pub fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// Path to the cheatsheet binary
pub fn cheatsheet_bin() -> &'static str {
    env!("CARGO_BIN_EXE_cheatsheet")
}

/// A command isolated from the user's real config directory and log settings.
pub fn cheatsheet_command(temp_dir: &TempDir) -> Command {
    let mut command = Command::new(cheatsheet_bin());
    command
        .env("XDG_CONFIG_HOME", temp_dir.path().join("xdg-config"))
        .env_remove("RUST_LOG");
    command
}

/// Counts page objects in a PDF.
pub fn count_pdf_pages(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
}

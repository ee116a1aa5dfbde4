//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the typographic ratios shared by
//! the flow planner and the renderer.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Cheatsheet Generator";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "cheatsheet";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "cheatsheet";

/// Line height of a section header bar, as a multiple of `header_font_size`.
pub const SECTION_HEADER_LEADING: f32 = 1.2;

/// Title font size is the header font size plus this many points.
pub const TITLE_FONT_BUMP: f32 = 3.0;

/// Line height of the title, as a multiple of its font size.
pub const TITLE_LEADING: f32 = 1.25;

/// Gap between the title line and the first slot.
pub const TITLE_SPACE_AFTER: f32 = 12.0;

/// Horizontal text inset inside a column.
pub const COLUMN_PADDING: f32 = 3.0;

/// Indent of subsection headers relative to the column padding.
pub const SUBSECTION_INDENT: f32 = 8.0;

/// Share of the column width given to the key combo of an entry row.
pub const KEY_COLUMN_SHARE: f32 = 0.35;

/// Tolerance used when deciding whether a unit still fits a slot.
pub const FIT_EPSILON: f32 = 0.01;

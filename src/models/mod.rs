//! Data models for cheat sheet content and layout configuration.
//!
//! This module contains the content model consumed by the flow planner.
//! Models are independent of parsing, layout and rendering.

pub mod document;
pub mod layout_config;

// Re-export all model types
pub use document::{Document, Entry, Section, SectionContent, Subsection};
pub use layout_config::{
    default_layout_config, ConfigLayers, LayoutConfig, LayoutOverrides, Orientation, PaperSize,
};

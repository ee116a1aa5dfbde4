//! Cheatsheet Generator Library
//!
//! Turns YAML hotkey lists into printable multi-column PDF cheat sheets.
//! The [`layout`] module holds the flow planner that decides where every
//! header and row lands; [`export`] draws the plan.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod layout;
pub mod models;
pub mod parser;

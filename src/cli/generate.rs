//! The cheat sheet command: validate, estimate or generate a PDF.

use crate::cli::common::{
    print_json, CliError, CliResult, EstimateResponse, GenerateResponse, ValidationResponse,
};
use crate::config::Config;
use crate::export::export_to_pdf;
use crate::layout::estimate_pages;
use crate::models::{ConfigLayers, Document, LayoutOverrides, Orientation, PaperSize};
use crate::parser::{inspect_document_str, read_document_file, ValidationReport};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Generate a printable PDF cheat sheet from a YAML hotkey file
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to the cheat sheet YAML file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF path (defaults to the input path with a .pdf extension)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only validate the YAML file
    #[arg(short, long)]
    pub validate: bool,

    /// Only estimate the number of pages
    #[arg(short, long)]
    pub estimate_pages: bool,

    /// Paper size (letter or a4), overrides the file's config
    #[arg(short, long, value_name = "SIZE", value_parser = parse_paper_size)]
    pub paper_size: Option<PaperSize>,

    /// Page orientation (portrait or landscape), overrides the file's config
    #[arg(short = 'r', long, value_name = "ORIENTATION", value_parser = parse_orientation)]
    pub orientation: Option<Orientation>,

    /// Fill the top half of every column before the bottom half
    #[arg(short = 't', long)]
    pub fill_top_half: bool,

    /// Layout defaults file (TOML) used instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_paper_size(value: &str) -> Result<PaperSize, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_orientation(value: &str) -> Result<Orientation, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl GenerateArgs {
    /// Execute the command
    pub fn execute(&self) -> CliResult<()> {
        let layers = self.config_layers()?;

        let content = read_document_file(&self.input).map_err(|e| CliError::io(e.to_string()))?;
        let outcome = inspect_document_str(&content, &layers);

        for warning in &outcome.report.warnings {
            warn!("{warning}");
        }

        if self.validate {
            return self.report_validation(&outcome.report);
        }

        let Some(document) = outcome.document else {
            print_errors(&outcome.report);
            return Err(CliError::validation(format!(
                "{} has {} validation error(s)",
                self.input.display(),
                outcome.report.errors.len()
            )));
        };

        if self.estimate_pages {
            return self.report_estimate(&document);
        }

        self.generate(&document)
    }

    /// Builds the configuration layers around the document's own settings.
    fn config_layers(&self) -> CliResult<ConfigLayers> {
        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::io(format!("{e:#}")))?;

        Ok(ConfigLayers {
            defaults: config.layout,
            overrides: self.flag_overrides(),
        })
    }

    fn flag_overrides(&self) -> LayoutOverrides {
        LayoutOverrides {
            paper_size: self.paper_size,
            orientation: self.orientation,
            fill_top_half: self.fill_top_half.then_some(true),
            ..LayoutOverrides::default()
        }
    }

    fn report_validation(&self, report: &ValidationReport) -> CliResult<()> {
        if self.json {
            print_json(&ValidationResponse {
                valid: report.is_valid(),
                errors: report.errors.clone(),
                warnings: report.warnings.clone(),
            })?;
        } else if report.is_valid() {
            println!("✓ YAML file is valid");
        } else {
            print_errors(report);
        }

        if report.is_valid() {
            Ok(())
        } else {
            Err(CliError::validation("Validation failed"))
        }
    }

    fn report_estimate(&self, document: &Document) -> CliResult<()> {
        let pages = estimate_pages(document)
            .map_err(|e| CliError::validation(format!("Failed to estimate pages: {e}")))?;
        let hotkeys = document.entry_count();

        if self.json {
            print_json(&EstimateResponse { hotkeys, pages })?;
        } else {
            println!("Parsed {} hotkeys from {}", hotkeys, self.input.display());
            println!("Estimated pages: {pages}");
        }

        Ok(())
    }

    fn generate(&self, document: &Document) -> CliResult<()> {
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("pdf"));

        let sheet = export_to_pdf(document)
            .map_err(|e| CliError::validation(format!("Failed to render cheat sheet: {e}")))?;

        fs::write(&output, &sheet.bytes).map_err(|e| {
            CliError::io(format!("Failed to write PDF to {}: {e}", output.display()))
        })?;
        info!(path = %output.display(), pages = sheet.pages, "cheat sheet written");

        let hotkeys = document.entry_count();
        if self.json {
            print_json(&GenerateResponse {
                output: output.display().to_string(),
                title: document.title.clone(),
                hotkeys,
                pages: sheet.pages,
            })?;
        } else {
            println!("✓ Generated cheat sheet: {}", output.display());
            println!("  - Title: {}", document.title);
            println!("  - Hotkeys: {hotkeys}");
            println!("  - Estimated pages: {}", sheet.pages);
        }

        Ok(())
    }
}

fn print_errors(report: &ValidationReport) {
    eprintln!("YAML validation errors:");
    for error in &report.errors {
        eprintln!("  - {error}");
    }
}

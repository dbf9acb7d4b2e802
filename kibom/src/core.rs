//! Core BoM generation shared by the library and the CLI.

use std::path::{Path, PathBuf};

use crate::bom::csv::write_csv;
use crate::bom::group::BomGroup;
use crate::bom::input::{Bom, BomInput};
use crate::bom::xml::write_xml;

#[derive(Debug, thiserror::Error)]
pub enum KiBomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid input document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Header name {0:?} is not a valid XML attribute name")]
    InvalidAttributeName(String),
    #[error("Several header names map to the attribute {0:?}")]
    DuplicateAttribute(String),
    #[error("Group {group} has {found} cells, expected {expected}")]
    RowLength {
        group: usize,
        expected: usize,
        found: usize,
    },
    #[error("{0}")]
    InvalidInput(String),
}

/// BoM output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xml,
    Csv,
}

impl OutputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "xml" => Some(OutputFormat::Xml),
            "csv" | "tsv" | "txt" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Command-line overrides applied on top of the input document's options.
#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub number: Option<u32>,
    pub variant: Option<String>,
    pub ignore_dnf: Option<bool>,
    pub hide_stats: Option<bool>,
    pub csv_separator: Option<char>,
}

/// What a generation run produced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BomSummary {
    pub output: PathBuf,
    pub groups_written: usize,
    pub n_groups: usize,
    pub total_components: String,
    pub fitted_components: String,
    pub build_quantity: usize,
}

/// Core BoM API used by the CLI.
pub struct KiBomCore;

impl KiBomCore {
    /// Load an input document, apply overrides and group the components.
    pub fn load(input: &Path, overrides: &GenerateOptions) -> Result<Bom, KiBomError> {
        let mut document = BomInput::from_path(input)?;
        let options = &mut document.options;
        if let Some(number) = overrides.number {
            options.number = number;
        }
        if let Some(ref variant) = overrides.variant {
            options.variant = variant.clone();
        }
        if let Some(ignore_dnf) = overrides.ignore_dnf {
            options.ignore_dnf = ignore_dnf;
        }
        if let Some(hide_stats) = overrides.hide_stats {
            options.csv.hide_stats = hide_stats;
        }
        if let Some(separator) = overrides.csv_separator {
            options.csv.separator = separator;
        }
        document.build()
    }

    /// Read `input`, group its components and write the BoM to `output`.
    pub fn generate(
        input: &Path,
        output: &Path,
        format: OutputFormat,
        overrides: &GenerateOptions,
    ) -> Result<BomSummary, KiBomError> {
        let bom = Self::load(input, overrides)?;

        match format {
            OutputFormat::Xml => write_xml(
                output,
                &bom.groups,
                &bom.headings,
                &bom.header_names,
                &bom.config,
            )?,
            OutputFormat::Csv => write_csv(
                output,
                &bom.groups,
                &bom.headings,
                &bom.header_names,
                &bom.config,
                &bom.csv,
            )?,
        }

        let groups_written = bom
            .groups
            .iter()
            .filter(|g| !bom.config.ignore_dnf || g.is_fitted())
            .count();

        Ok(BomSummary {
            output: output.to_path_buf(),
            groups_written,
            n_groups: bom.config.n_groups,
            total_components: bom.config.total_str.clone(),
            fitted_components: bom.config.fitted_str.clone(),
            build_quantity: bom.config.n_build,
        })
    }
}

//! KiBoM - KiCad bill of materials library
//!
//! Groups schematic components into BoM lines, recognizing equal values
//! written in different ways (`100n` and `0.1uF`, `0R1` and `100mOhm`), and
//! writes the result as XML or CSV.
//!
//! # Quick Start
//!
//! ```no_run
//! use kibom::{GenerateOptions, KiBomCore, OutputFormat};
//! use std::path::Path;
//!
//! let summary = KiBomCore::generate(
//!     Path::new("design_bom.json"),
//!     Path::new("design_bom.xml"),
//!     OutputFormat::Xml,
//!     &GenerateOptions::default(),
//! ).unwrap();
//!
//! println!("{} groups written", summary.groups_written);
//! ```
//!
//! # Features
//!
//! - **Value normalization**: SI prefixes, unit spellings, `4k7`/`0R05` notation
//! - **Grouping**: by reference prefix, footprint, value and configurable fields
//! - **Aggregation**: several schematic projects merged into one BoM
//! - **Output**: XML (`KiCad_BOM` root, one `group` element per line) and CSV

pub mod bom;
pub mod core;
pub mod units;

// Re-export main types
pub use crate::core::{BomSummary, GenerateOptions, KiBomCore, KiBomError, OutputFormat};
pub use bom::{
    group_components, write_csv, write_xml, Bom, BomConfig, BomGroup, BomInput, BomOptions,
    Component, ComponentGroup, Project, SchematicInfo, Variant,
};
pub use units::{compare_values, parse_value, ComponentValue, Prefix, UnitClass, ValueParser};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        compare_values, parse_value, write_xml, BomConfig, BomGroup, Component, ComponentGroup,
        GenerateOptions, KiBomCore, KiBomError, OutputFormat,
    };
}

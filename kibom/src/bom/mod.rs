//! Bill of materials generation
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  Components  │───▶│   Grouping   │───▶│  BomConfig   │
//! │ (input JSON) │    │ (value eq.)  │    │ (statistics) │
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │
//!                                   ┌────────────┴────────────┐
//!                                   ▼                         ▼
//!                            ┌────────────┐           ┌────────────┐
//!                            │ XML writer │           │ CSV writer │
//!                            └────────────┘           └────────────┘
//! ```
//!
//! Writers only need the [`BomGroup`] capability, so callers with their own
//! grouping logic can feed them directly.

pub mod columns;
pub mod config;
pub mod csv;
pub mod group;
pub mod input;
pub mod xml;

// Re-exports for convenience
pub use columns::{sanitize_header_name, Column, ColumnSpec};
pub use config::{BomConfig, BomOptions, CsvOptions, Project, SchematicInfo, Variant};
pub use group::{group_components, BomGroup, Component, ComponentGroup, GroupOptions};
pub use input::{Bom, BomInput, ProjectInput};
pub use xml::{render_xml, write_xml};
pub use self::csv::{write_csv, write_csv_to};

//! BoM columns: known headings, default header names and the mapping from
//! human-facing header names to XML attribute names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::KiBomError;

/// A column a [`ComponentGroup`](super::ComponentGroup) knows how to fill.
///
/// Anything not listed here is looked up in the component's free-form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    References,
    Value,
    Footprint,
    QuantityPerPcb,
    BuildQuantity,
    Status,
    Field(String),
}

impl Column {
    pub fn from_heading(heading: &str) -> Self {
        match heading.trim().to_lowercase().as_str() {
            "references" | "reference" | "ref" | "refs" => Column::References,
            "value" => Column::Value,
            "footprint" => Column::Footprint,
            "quantity per pcb" | "quantity" | "qty" => Column::QuantityPerPcb,
            "build quantity" => Column::BuildQuantity,
            "status" => Column::Status,
            _ => Column::Field(heading.trim().to_string()),
        }
    }
}

/// Headings understood without consulting component fields, with a short
/// description for `kibom columns`.
pub const KNOWN_COLUMNS: &[(&str, &str)] = &[
    ("References", "Space separated list of references in the group"),
    ("Value", "Component value as written in the schematic"),
    ("Footprint", "Footprint name"),
    ("Quantity Per PCB", "Number of fitted components in the group on one board"),
    ("Build Quantity", "Fitted components multiplied by the number of boards"),
    ("Status", "Empty for fitted groups, DNF otherwise"),
];

/// One requested BoM column: the heading used to ask a group for a cell and
/// the header name shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColumnSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: None,
        }
    }

    pub fn named(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: Some(name.into()),
        }
    }

    pub fn header_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.field)
    }
}

pub fn default_columns() -> Vec<ColumnSpec> {
    KNOWN_COLUMNS
        .iter()
        .map(|(field, _)| ColumnSpec::new(*field))
        .collect()
}

/// Turn a header name into an XML attribute name.
///
/// Substitutions are applied in order over the whole string: space and `/`
/// become `_`, quotes are dropped and `#` becomes `_num` (also mid-string,
/// `A#B` -> `A_numB`).
pub fn sanitize_header_name(name: &str) -> String {
    name.replace(' ', "_")
        .replace('/', "_")
        .replace('"', "")
        .replace('\'', "")
        .replace('#', "_num")
}

fn is_name_start_char(c: char) -> bool {
    c == '_' || c == ':' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || c == '-'
        || c == '.'
        || c.is_ascii_digit()
        || c == '\u{B7}'
        || (!c.is_ascii() && c.is_alphanumeric())
}

/// Whether `name` can be used as an XML attribute name.
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Sanitize every header name and check the results are usable, distinct
/// XML attribute names.
pub fn attribute_keys(header_names: &[String]) -> Result<Vec<String>, KiBomError> {
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(header_names.len());
    for header in header_names {
        let key = sanitize_header_name(header);
        if !is_valid_xml_name(&key) {
            return Err(KiBomError::InvalidAttributeName(header.clone()));
        }
        if !seen.insert(key.clone()) {
            return Err(KiBomError::DuplicateAttribute(key));
        }
        keys.push(key);
    }
    Ok(keys)
}

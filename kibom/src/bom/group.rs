//! Components and component groups.
//!
//! Components that share a reference prefix, footprint, fitted status, value
//! and any extra configured fields are merged into one [`ComponentGroup`],
//! which becomes a single BoM line.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::columns::Column;
use crate::units::ValueParser;

/// What a BoM writer needs from a group of components.
pub trait BomGroup {
    /// Whether the group's components are populated on the board.
    fn is_fitted(&self) -> bool;

    /// One cell per heading, in the same order as `headings`.
    fn get_row(&self, headings: &[String]) -> Vec<String>;
}

impl<T: BomGroup + ?Sized> BomGroup for &T {
    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }

    fn get_row(&self, headings: &[String]) -> Vec<String> {
        (**self).get_row(headings)
    }
}

impl<T: BomGroup + ?Sized> BomGroup for Box<T> {
    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }

    fn get_row(&self, headings: &[String]) -> Vec<String> {
        (**self).get_row(headings)
    }
}

fn default_true() -> bool {
    true
}

fn default_boards() -> u32 {
    1
}

/// A schematic component as seen by the BoM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(alias = "ref")]
    pub reference: String,
    /// Project prefix shown in front of the reference when aggregating.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ref_id: String,
    pub value: String,
    #[serde(default)]
    pub footprint: String,
    #[serde(default = "default_true")]
    pub fitted: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Boards this component is built on (number of PCBs times the project
    /// multiplier when aggregating).
    #[serde(default = "default_boards")]
    pub boards: u32,
}

impl Component {
    pub fn new(
        reference: impl Into<String>,
        value: impl Into<String>,
        footprint: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            ref_id: String::new(),
            value: value.into(),
            footprint: footprint.into(),
            fitted: true,
            fields: BTreeMap::new(),
            boards: 1,
        }
    }

    /// Mark the component as Do Not Fit.
    pub fn dnf(mut self) -> Self {
        self.fitted = false;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Case-insensitive lookup of a free-form field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Reference as printed in the BoM, including the project prefix.
    pub fn full_reference(&self) -> String {
        format!("{}{}", self.ref_id, self.reference)
    }

    /// Alphabetic part of the reference: `R` for `R12`, `SW` for `SW3`.
    pub fn ref_prefix(&self) -> &str {
        let end = self
            .reference
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.reference.len());
        &self.reference[..end]
    }
}

/// Split a reference into text and numeric runs so `R2` sorts before `R10`.
fn natural_key(reference: &str) -> Vec<(String, u64)> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = reference.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut digits = c.to_string();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            let number = digits.parse::<u64>().unwrap_or(u64::MAX);
            parts.push((std::mem::take(&mut text), number));
        } else {
            text.push(c);
        }
    }
    if !text.is_empty() {
        parts.push((text, 0));
    }
    parts
}

/// Natural ordering of references (`C1 < C2 < C10 < R1`).
pub fn compare_references(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}

/// Options controlling which components end up in the same group.
#[derive(Debug, Clone)]
pub struct GroupOptions {
    /// Extra fields that must match (case-insensitively) for two components
    /// to be grouped.
    pub group_fields: Vec<String>,
    pub parser: ValueParser,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            group_fields: vec![],
            parser: ValueParser::from_locale(),
        }
    }
}

/// Whether two schematic value fields name the same value.
///
/// Values that both parse are compared by magnitude and unit only, so `1M`
/// and `1m` stay apart. Text equality decides when either side is free text.
pub fn values_match(a: &str, b: &str, parser: &ValueParser) -> bool {
    match (parser.parse(a), parser.parse(b)) {
        (Some(x), Some(y)) => x.same_quantity(&y),
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}

/// A set of components reported as one BoM line.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGroup {
    components: Vec<Component>,
}

impl ComponentGroup {
    pub fn new(first: Component) -> Self {
        Self {
            components: vec![first],
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    fn first(&self) -> &Component {
        &self.components[0]
    }

    /// Whether `component` belongs in this group.
    pub fn accepts(&self, component: &Component, options: &GroupOptions) -> bool {
        let first = self.first();
        first.ref_prefix() == component.ref_prefix()
            && first.fitted == component.fitted
            && first.footprint.eq_ignore_ascii_case(&component.footprint)
            && values_match(&first.value, &component.value, &options.parser)
            && options.group_fields.iter().all(|name| {
                let a = first.field(name).unwrap_or_default().trim();
                let b = component.field(name).unwrap_or_default().trim();
                a.eq_ignore_ascii_case(b)
            })
    }

    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn references(&self) -> Vec<String> {
        self.components.iter().map(Component::full_reference).collect()
    }

    pub fn value(&self) -> &str {
        &self.first().value
    }

    pub fn footprint(&self) -> &str {
        &self.first().footprint
    }

    /// Components in the group.
    pub fn quantity(&self) -> usize {
        self.components.len()
    }

    /// Fitted components in the group.
    pub fn fitted_quantity(&self) -> usize {
        self.components.iter().filter(|c| c.fitted).count()
    }

    /// Fitted components summed over every board they are built on.
    ///
    /// Saturates at `usize::MAX`.
    pub fn build_quantity(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.fitted)
            .fold(0usize, |acc, c| acc.saturating_add(c.boards as usize))
    }

    fn cell(&self, column: &Column) -> String {
        match column {
            Column::References => self.references().join(" "),
            Column::Value => self.value().to_string(),
            Column::Footprint => self.footprint().to_string(),
            Column::QuantityPerPcb => self.fitted_quantity().to_string(),
            Column::BuildQuantity => self.build_quantity().to_string(),
            Column::Status => {
                if self.is_fitted() {
                    String::new()
                } else {
                    "DNF".to_string()
                }
            }
            Column::Field(name) => self
                .components
                .iter()
                .find_map(|c| c.field(name))
                .unwrap_or_default()
                .to_string(),
        }
    }

    fn sort_members(&mut self) {
        self.components
            .sort_by(|a, b| compare_references(&a.full_reference(), &b.full_reference()));
    }
}

impl BomGroup for ComponentGroup {
    fn is_fitted(&self) -> bool {
        self.components.iter().any(|c| c.fitted)
    }

    fn get_row(&self, headings: &[String]) -> Vec<String> {
        headings
            .iter()
            .map(|heading| self.cell(&Column::from_heading(heading)))
            .collect()
    }
}

/// Merge components into groups.
///
/// Members of each group are sorted naturally by reference and groups are
/// ordered by their first reference.
pub fn group_components(
    components: impl IntoIterator<Item = Component>,
    options: &GroupOptions,
) -> Vec<ComponentGroup> {
    let mut groups: Vec<ComponentGroup> = Vec::new();
    for component in components {
        match groups.iter_mut().find(|g| g.accepts(&component, options)) {
            Some(group) => group.push(component),
            None => groups.push(ComponentGroup::new(component)),
        }
    }

    for group in &mut groups {
        group.sort_members();
    }
    groups.sort_by(|a, b| {
        compare_references(&a.first().full_reference(), &b.first().full_reference())
    });

    tracing::debug!("Grouped components into {} groups", groups.len());
    groups
}

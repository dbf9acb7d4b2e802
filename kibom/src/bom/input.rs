//! JSON input document and BoM assembly.
//!
//! ```json
//! {
//!   "options": { "number": 5, "columns": [{"field": "References", "name": "Reference #"}] },
//!   "projects": [
//!     {
//!       "name": "top",
//!       "revision": "A",
//!       "date": "2024-01-01",
//!       "components": [
//!         { "ref": "R1", "value": "1k", "footprint": "R_0603" },
//!         { "ref": "R2", "value": "1k", "footprint": "R_0603", "fitted": false }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::{BomConfig, BomOptions, CsvOptions, Project, SchematicInfo, Variant};
use super::group::{group_components, Component, ComponentGroup, GroupOptions};
use crate::core::KiBomError;

fn default_number() -> u32 {
    1
}

/// One schematic project in the input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default)]
    pub date: String,
    /// Reference prefix used when several projects are aggregated.
    #[serde(default)]
    pub ref_id: String,
    /// Boards of this project per assembled unit.
    #[serde(default = "default_number")]
    pub number: u32,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// The whole input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomInput {
    #[serde(default)]
    pub options: BomOptions,
    pub projects: Vec<ProjectInput>,
}

/// A grouped BoM ready to be written.
#[derive(Debug, Clone)]
pub struct Bom {
    pub config: BomConfig,
    pub groups: Vec<ComponentGroup>,
    pub headings: Vec<String>,
    pub header_names: Vec<String>,
    pub csv: CsvOptions,
}

/// `"N"` for one project, `"N (a+b+...)"` for several.
fn count_str(total: usize, parts: &[usize]) -> String {
    if parts.len() <= 1 {
        total.to_string()
    } else {
        let parts: Vec<String> = parts.iter().map(|n| n.to_string()).collect();
        format!("{} ({})", total, parts.join("+"))
    }
}

impl BomInput {
    pub fn from_json(json: &str) -> Result<Self, KiBomError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, KiBomError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded BoM input from {}", path.display());
        Self::from_json(&content)
    }

    /// Group the components of every project and compute the statistics
    /// reported alongside the groups.
    pub fn build(self) -> Result<Bom, KiBomError> {
        let BomInput { options, projects } = self;
        if projects.is_empty() {
            return Err(KiBomError::InvalidInput(
                "at least one project is required".to_string(),
            ));
        }
        if options.number == 0 {
            return Err(KiBomError::InvalidInput(
                "number of boards must be at least 1".to_string(),
            ));
        }

        let group_options = GroupOptions {
            group_fields: options.group_fields.clone(),
            parser: options.value_parser(),
        };
        let aggregating = projects.len() > 1;

        let mut aggregate = Vec::with_capacity(projects.len());
        let mut all_components = Vec::new();
        let mut totals = Vec::with_capacity(projects.len());
        let mut fitted_totals = Vec::with_capacity(projects.len());

        for project in projects {
            let boards = options.number.checked_mul(project.number).ok_or_else(|| {
                KiBomError::InvalidInput(format!(
                    "project {}: {} x {} boards does not fit in a board count",
                    project.name, options.number, project.number
                ))
            })?;
            let components: Vec<Component> = project
                .components
                .into_iter()
                .map(|mut c| {
                    if aggregating {
                        c.ref_id = project.ref_id.clone();
                    }
                    c.boards = boards;
                    c
                })
                .collect();

            let total = components.len();
            let fitted = components.iter().filter(|c| c.fitted).count();
            let comp_build = fitted.checked_mul(boards as usize).ok_or_else(|| {
                KiBomError::InvalidInput(format!(
                    "project {}: build quantity overflows",
                    project.name
                ))
            })?;
            let comp_groups = group_components(components.iter().cloned(), &group_options).len();
            tracing::debug!(
                "Project {}: {} components, {} fitted, {} groups",
                project.name,
                total,
                fitted,
                comp_groups
            );

            aggregate.push(Project {
                name: project.name,
                sch: SchematicInfo {
                    revision: project.revision,
                    date: project.date,
                },
                ref_id: project.ref_id,
                comp_groups,
                total_str: total.to_string(),
                fitted_str: fitted.to_string(),
                number: project.number,
                comp_build,
            });
            totals.push(total);
            fitted_totals.push(fitted);
            all_components.extend(components);
        }

        let n_build = aggregate
            .iter()
            .try_fold(0usize, |acc, p| acc.checked_add(p.comp_build))
            .ok_or_else(|| KiBomError::InvalidInput("build quantity overflows".to_string()))?;
        let groups = group_components(all_components, &group_options);

        let config = BomConfig {
            variant: Variant {
                name: options.variant.clone(),
            },
            kicad_version: options.kicad_version.clone(),
            n_groups: groups.len(),
            total_str: count_str(totals.iter().sum(), &totals),
            fitted_str: count_str(fitted_totals.iter().sum(), &fitted_totals),
            number: options.number,
            n_build,
            ignore_dnf: options.ignore_dnf,
            aggregate,
        };

        Ok(Bom {
            config,
            groups,
            headings: options.headings(),
            header_names: options.header_names(),
            csv: options.csv,
        })
    }
}

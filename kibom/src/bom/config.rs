//! BoM configuration: user options and the configuration view handed to the
//! writers.

use serde::{Deserialize, Serialize};

use super::columns::{default_columns, ColumnSpec};
use crate::units::ValueParser;

/// Assembly variant the BoM was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
        }
    }
}

/// Title block data of a schematic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchematicInfo {
    pub revision: String,
    pub date: String,
}

/// One schematic project contributing to the BoM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub sch: SchematicInfo,
    /// Prefix prepended to this project's references when aggregating.
    pub ref_id: String,
    /// Number of groups formed from this project's components alone.
    pub comp_groups: usize,
    pub total_str: String,
    pub fitted_str: String,
    /// Boards of this project per assembled unit.
    pub number: u32,
    pub comp_build: usize,
}

/// Everything a writer reads besides the groups themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomConfig {
    pub variant: Variant,
    pub kicad_version: String,
    pub n_groups: usize,
    pub total_str: String,
    pub fitted_str: String,
    pub number: u32,
    pub n_build: usize,
    pub ignore_dnf: bool,
    /// Contributing projects, at least one.
    pub aggregate: Vec<Project>,
}

impl Default for BomConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            kicad_version: String::new(),
            n_groups: 0,
            total_str: "0".to_string(),
            fitted_str: "0".to_string(),
            number: 1,
            n_build: 0,
            ignore_dnf: true,
            aggregate: vec![Project::default()],
        }
    }
}

impl BomConfig {
    /// Global and per-project statistics as `(key, value)` pairs.
    ///
    /// These become the attributes of the XML root element and the
    /// statistics block of the CSV output.
    pub fn summary_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![
            ("PCB_Variant".to_string(), self.variant.name.clone()),
            ("KiCad_Version".to_string(), self.kicad_version.clone()),
            ("Component_Groups".to_string(), self.n_groups.to_string()),
            ("Component_Count".to_string(), self.total_str.clone()),
            ("Fitted_Components".to_string(), self.fitted_str.clone()),
            ("Number_of_PCBs".to_string(), self.number.to_string()),
            ("Total_Components".to_string(), self.n_build.to_string()),
        ];

        match self.aggregate.as_slice() {
            [] => {}
            [project] => {
                attrs.push(("Schematic_Source".to_string(), project.name.clone()));
                attrs.push(("Schematic_Revision".to_string(), project.sch.revision.clone()));
                attrs.push(("Schematic_Date".to_string(), project.sch.date.clone()));
            }
            projects => {
                for (n, project) in projects.iter().enumerate() {
                    attrs.push((format!("Schematic{n}_Source"), project.name.clone()));
                    attrs.push((format!("Schematic{n}_Revision"), project.sch.revision.clone()));
                    attrs.push((format!("Schematic{n}_Date"), project.sch.date.clone()));
                    attrs.push((format!("Schematic{n}_ID"), project.ref_id.clone()));
                    attrs.push((format!("Component_Groups{n}"), project.comp_groups.to_string()));
                    attrs.push((format!("Component_Count{n}"), project.total_str.clone()));
                    attrs.push((format!("Fitted_Components{n}"), project.fitted_str.clone()));
                    attrs.push((format!("Number_of_PCBs{n}"), project.number.to_string()));
                    attrs.push((format!("Total_Components{n}"), project.comp_build.to_string()));
                }
            }
        }
        attrs
    }
}

/// CSV output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field separator, a single ASCII character.
    pub separator: char,
    /// Omit the statistics block after the component rows.
    pub hide_stats: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            hide_stats: false,
        }
    }
}

/// User options for a BoM run, read from the `options` object of the input
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BomOptions {
    /// Number of boards to build.
    pub number: u32,
    /// Leave Do Not Fit groups out of the output.
    pub ignore_dnf: bool,
    pub variant: String,
    pub kicad_version: String,
    pub columns: Vec<ColumnSpec>,
    /// Extra component fields that must match for grouping.
    pub group_fields: Vec<String>,
    /// Decimal separator of the component values. The process locale
    /// decides when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_point: Option<char>,
    pub csv: CsvOptions,
}

impl Default for BomOptions {
    fn default() -> Self {
        Self {
            number: 1,
            ignore_dnf: true,
            variant: Variant::default().name,
            kicad_version: String::new(),
            columns: default_columns(),
            group_fields: vec![],
            decimal_point: None,
            csv: CsvOptions::default(),
        }
    }
}

impl BomOptions {
    pub fn value_parser(&self) -> ValueParser {
        match self.decimal_point {
            Some(c) => ValueParser::with_decimal_point(c),
            None => ValueParser::from_locale(),
        }
    }

    /// Headings used to request cells from groups.
    pub fn headings(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.field.clone()).collect()
    }

    /// Header names shown to the reader.
    pub fn header_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.header_name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> Project {
        Project {
            name: name.to_string(),
            sch: SchematicInfo {
                revision: "A".to_string(),
                date: "2024-01-01".to_string(),
            },
            ref_id: format!("{name}-"),
            comp_groups: 2,
            total_str: "3".to_string(),
            fitted_str: "2".to_string(),
            number: 1,
            comp_build: 2,
        }
    }

    #[test]
    fn test_single_project_attributes() {
        let cfg = BomConfig {
            aggregate: vec![project("top")],
            ..Default::default()
        };
        let attrs = cfg.summary_attributes();
        assert_eq!(attrs.len(), 7 + 3);
        assert!(attrs.contains(&("Schematic_Source".to_string(), "top".to_string())));
        assert!(!attrs.iter().any(|(k, _)| k.starts_with("Schematic0")));
    }

    #[test]
    fn test_multi_project_attributes() {
        let cfg = BomConfig {
            aggregate: vec![project("a"), project("b"), project("c")],
            ..Default::default()
        };
        let attrs = cfg.summary_attributes();
        assert_eq!(attrs.len(), 7 + 9 * 3);
        assert!(attrs.contains(&("Schematic2_ID".to_string(), "c-".to_string())));
        assert!(attrs.contains(&("Total_Components1".to_string(), "2".to_string())));
        assert!(!attrs.iter().any(|(k, _)| k == "Schematic_Source"));
    }

    #[test]
    fn test_options_defaults_from_empty_json() {
        let options: BomOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, BomOptions::default());
        assert_eq!(options.headings(), options.header_names());
        assert!(options.ignore_dnf);
        assert_eq!(options.number, 1);
    }

    #[test]
    fn test_options_custom_columns() {
        let options: BomOptions = serde_json::from_str(
            r#"{"columns": [{"field": "References", "name": "Reference #"}, {"field": "Value"}]}"#,
        )
        .unwrap();
        assert_eq!(options.headings(), vec!["References", "Value"]);
        assert_eq!(options.header_names(), vec!["Reference #", "Value"]);
    }
}

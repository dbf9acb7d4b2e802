//! Group a handful of components and write an XML BoM.

use kibom::prelude::*;
use kibom::bom::{group_components, GroupOptions};
use kibom::{Project, SchematicInfo};
use std::path::Path;

fn main() -> Result<(), KiBomError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bom.xml".to_string());
    let path = Path::new(&path);

    let components = vec![
        Component::new("R1", "10k", "R_0603"),
        Component::new("R2", "10000", "R_0603"),
        Component::new("R3", "0R1", "R_1206"),
        Component::new("R4", "100mOhm", "R_1206"),
        Component::new("C1", "100n", "C_0603"),
        Component::new("C2", "0.1uF", "C_0603"),
        Component::new("C3", "10uF", "C_0805").dnf(),
    ];
    let total = components.len();
    let fitted = components.iter().filter(|c| c.fitted).count();

    let groups = group_components(components, &GroupOptions::default());

    let cfg = BomConfig {
        kicad_version: "7.0".to_string(),
        n_groups: groups.len(),
        total_str: total.to_string(),
        fitted_str: fitted.to_string(),
        n_build: groups.iter().map(|g| g.build_quantity()).sum(),
        aggregate: vec![Project {
            name: "example".to_string(),
            sch: SchematicInfo {
                revision: "1".to_string(),
                date: "2024-01-01".to_string(),
            },
            ..Default::default()
        }],
        ..Default::default()
    };

    let headings: Vec<String> = ["References", "Value", "Footprint", "Quantity Per PCB"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    write_xml(path, &groups, &headings, &headings, &cfg)?;

    println!("Wrote {} groups to {}", groups.len(), path.display());
    Ok(())
}

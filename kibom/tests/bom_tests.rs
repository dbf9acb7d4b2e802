//! End-to-end tests: JSON input -> grouping -> XML/CSV output

mod common;

use common::{fixture_path, parse_bom_xml};
use kibom::prelude::*;
use kibom::{BomInput, GenerateOptions};
use tempfile::TempDir;

#[test]
fn test_generate_single_board_xml() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sensor_board.xml");

    let summary = KiBomCore::generate(
        &fixture_path("single_board.json"),
        &output,
        OutputFormat::Xml,
        &GenerateOptions::default(),
    )
    .expect("Generation should succeed");

    assert_eq!(summary.n_groups, 5);
    assert_eq!(summary.groups_written, 4);
    assert_eq!(summary.total_components, "9");
    assert_eq!(summary.fitted_components, "8");
    assert_eq!(summary.build_quantity, 40);

    let (root, groups) = parse_bom_xml(&std::fs::read(&output).unwrap());
    assert_eq!(root["Schematic_Source"], "sensor_board");
    assert_eq!(root["Schematic_Revision"], "B");
    assert_eq!(root["KiCad_Version"], "7.0");
    assert_eq!(root["Number_of_PCBs"], "5");
    assert_eq!(root["Total_Components"], "40");
    assert_eq!(groups.len(), 4);

    let resistors = groups
        .iter()
        .find(|g| g["Reference__num"] == "R1 R2 R10")
        .expect("10k resistors should be grouped");
    assert_eq!(resistors["Value"], "10k");
    assert_eq!(resistors["Quantity_Per_PCB"], "3");
    assert_eq!(resistors["Build_Quantity"], "15");
    assert_eq!(resistors["Manufacturer"], "");

    let shunts = groups
        .iter()
        .find(|g| g["Reference__num"] == "R3 R4")
        .expect("0R1 and 100mOhm should be grouped");
    assert_eq!(shunts["Manufacturer"], "Yageo");

    assert!(groups.iter().any(|g| g["Reference__num"] == "C1 C2"));
    assert!(!groups.iter().any(|g| g["Reference__num"].contains("C3")));
}

#[test]
fn test_generate_keeps_dnf_when_requested() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bom.xml");

    let overrides = GenerateOptions {
        ignore_dnf: Some(false),
        number: Some(1),
        ..Default::default()
    };
    let summary = KiBomCore::generate(
        &fixture_path("single_board.json"),
        &output,
        OutputFormat::Xml,
        &overrides,
    )
    .unwrap();

    assert_eq!(summary.groups_written, 5);
    assert_eq!(summary.build_quantity, 8);
    let (_, groups) = parse_bom_xml(&std::fs::read(&output).unwrap());
    assert!(groups.iter().any(|g| g["Reference__num"] == "C3"));
}

#[test]
fn test_generate_panel_aggregate() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("panel.xml");

    KiBomCore::generate(
        &fixture_path("panel.json"),
        &output,
        OutputFormat::Xml,
        &GenerateOptions::default(),
    )
    .unwrap();

    let (root, groups) = parse_bom_xml(&std::fs::read(&output).unwrap());
    assert_eq!(root.len(), 7 + 9 * 2);
    assert_eq!(root["PCB_Variant"], "production");
    assert_eq!(root["Component_Count"], "4 (2+2)");
    assert_eq!(root["Fitted_Components"], "3 (1+2)");
    assert_eq!(root["Total_Components"], "9");
    assert_eq!(root["Schematic0_Source"], "main");
    assert_eq!(root["Schematic0_ID"], "M");
    assert_eq!(root["Component_Groups0"], "2");
    assert_eq!(root["Total_Components0"], "1");
    assert_eq!(root["Schematic1_Source"], "led");
    assert_eq!(root["Number_of_PCBs1"], "4");
    assert_eq!(root["Total_Components1"], "8");

    assert_eq!(groups.len(), 3);
    let shared = groups
        .iter()
        .find(|g| g["References"] == "LR1 MR1")
        .expect("1k and 1000 from both boards should be grouped");
    assert_eq!(shared["Value"], "1000");
    assert_eq!(shared["Build_Quantity"], "5");
    assert_eq!(shared["Status"], "");

    let dnf = groups.iter().find(|g| g["References"] == "MR2").unwrap();
    assert_eq!(dnf["Status"], "DNF");
}

#[test]
fn test_generate_csv() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bom.csv");

    let overrides = GenerateOptions {
        hide_stats: Some(true),
        ..Default::default()
    };
    KiBomCore::generate(
        &fixture_path("single_board.json"),
        &output,
        OutputFormat::Csv,
        &overrides,
    )
    .unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Reference #,Value,Footprint,Quantity Per PCB,Build Quantity,Manufacturer"
    );
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"R1 R2 R10,10k,R_0603,3,15,"));
    assert!(lines.contains(&"U1,STM32F411CEU6,QFN-48,1,5,ST"));
}

#[test]
fn test_variant_override() {
    let overrides = GenerateOptions {
        variant: Some("assembly_b".to_string()),
        ..Default::default()
    };
    let bom = KiBomCore::load(&fixture_path("single_board.json"), &overrides).unwrap();
    assert_eq!(bom.config.variant.name, "assembly_b");
    assert_eq!(bom.headings.len(), bom.header_names.len());
}

#[test]
fn test_input_round_trips_through_serde() {
    let content = std::fs::read_to_string(fixture_path("panel.json")).unwrap();
    let input = BomInput::from_json(&content).unwrap();
    assert_eq!(input.projects.len(), 2);
    assert_eq!(input.projects[1].components[1].reference, "D1");
    assert!(!input.projects[0].components[1].fitted);
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let result = KiBomCore::generate(
        &dir.path().join("nope.json"),
        &dir.path().join("out.xml"),
        OutputFormat::Xml,
        &GenerateOptions::default(),
    );
    assert!(matches!(result, Err(KiBomError::Io(_))));
}

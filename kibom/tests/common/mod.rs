//! Shared helpers for integration tests.

use std::collections::HashMap;
use std::path::PathBuf;

use quick_xml::events::Event;
use quick_xml::Reader;

pub type Attributes = HashMap<String, String>;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Parse a BoM XML document into the root attributes and the attributes of
/// every `group` element.
pub fn parse_bom_xml(xml: &[u8]) -> (Attributes, Vec<Attributes>) {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut root = None;
    let mut groups = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) => {
                let attrs: Attributes = e
                    .attributes()
                    .map(|a| {
                        let a = a.expect("valid attribute");
                        (
                            String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                            a.unescape_value().unwrap().into_owned(),
                        )
                    })
                    .collect();
                match e.name().as_ref() {
                    b"KiCad_BOM" => root = Some(attrs),
                    b"group" => groups.push(attrs),
                    other => panic!("unexpected element {:?}", String::from_utf8_lossy(other)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    (root.expect("KiCad_BOM root element"), groups)
}

//! XML BoM writer.
//!
//! Output shape:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <KiCad_BOM PCB_Variant="default" KiCad_Version="7.0" ... Schematic_Source="top">
//! 	<group References="R1 R2" Value="1k" .../>
//! </KiCad_BOM>
//! ```
//!
//! The document is first rendered compactly, then re-read and written again
//! with one tab of indentation per level.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::columns::attribute_keys;
use super::config::BomConfig;
use super::group::BomGroup;
use crate::core::KiBomError;

pub const ROOT_ELEMENT: &str = "KiCad_BOM";
pub const GROUP_ELEMENT: &str = "group";

/// Write an XML BoM to `path`, replacing any existing file.
///
/// Groups that are not fitted are skipped when `cfg.ignore_dnf` is set. Each
/// retained group contributes one `group` element whose attributes are the
/// sanitized `header_names` mapped to the cells of `get_row(headings)`.
pub fn write_xml<G: BomGroup>(
    path: &Path,
    groups: &[G],
    headings: &[String],
    header_names: &[String],
    cfg: &BomConfig,
) -> Result<(), KiBomError> {
    let bytes = render_xml(groups, headings, header_names, cfg)?;

    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&bytes)?;
    out.flush()?;

    tracing::info!("Wrote XML BoM to {}", path.display());
    Ok(())
}

/// Render the XML BoM document to UTF-8 bytes.
pub fn render_xml<G: BomGroup>(
    groups: &[G],
    headings: &[String],
    header_names: &[String],
    cfg: &BomConfig,
) -> Result<Vec<u8>, KiBomError> {
    let compact = render_compact(groups, headings, header_names, cfg)?;
    pretty_print(&compact)
}

fn render_compact<G: BomGroup>(
    groups: &[G],
    headings: &[String],
    header_names: &[String],
    cfg: &BomConfig,
) -> Result<Vec<u8>, KiBomError> {
    let keys = attribute_keys(header_names)?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    for (key, value) in cfg.summary_attributes() {
        root.push_attribute((key.as_str(), value.as_str()));
    }

    let mut children = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        if cfg.ignore_dnf && !group.is_fitted() {
            tracing::trace!("Skipping DNF group {}", index);
            continue;
        }
        let row = group.get_row(headings);
        if row.len() < keys.len() {
            return Err(KiBomError::RowLength {
                group: index,
                expected: keys.len(),
                found: row.len(),
            });
        }
        let mut element = BytesStart::new(GROUP_ELEMENT);
        for (key, cell) in keys.iter().zip(&row) {
            element.push_attribute((key.as_str(), cell.as_str()));
        }
        children.push(element);
    }
    tracing::debug!(
        "Rendering {} of {} groups as XML",
        children.len(),
        groups.len()
    );

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    if children.is_empty() {
        writer.write_event(Event::Empty(root))?;
    } else {
        writer.write_event(Event::Start(root))?;
        for child in children {
            writer.write_event(Event::Empty(child))?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    }
    Ok(writer.into_inner())
}

/// Re-indent an XML document with one tab per nesting level.
fn pretty_print(xml: &[u8]) -> Result<Vec<u8>, KiBomError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

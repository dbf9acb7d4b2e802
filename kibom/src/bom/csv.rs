//! CSV BoM writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::config::{BomConfig, CsvOptions};
use super::group::BomGroup;
use crate::core::KiBomError;

/// Write a CSV BoM to `path`, replacing any existing file.
///
/// The first row holds the header names as given. Group filtering follows
/// the XML writer. Unless `options.hide_stats` is set, a blank line and one
/// `key,value` row per summary statistic follow the component rows.
///
/// The whole document is rendered before `path` is opened, so a failed
/// render leaves an existing file untouched.
pub fn write_csv<G: BomGroup>(
    path: &Path,
    groups: &[G],
    headings: &[String],
    header_names: &[String],
    cfg: &BomConfig,
    options: &CsvOptions,
) -> Result<(), KiBomError> {
    let mut bytes = Vec::new();
    write_csv_to(&mut bytes, groups, headings, header_names, cfg, options)?;

    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&bytes)?;
    file.flush()?;
    tracing::info!("Wrote CSV BoM to {}", path.display());
    Ok(())
}

/// Write a CSV BoM to any writer.
pub fn write_csv_to<W: Write, G: BomGroup>(
    out: W,
    groups: &[G],
    headings: &[String],
    header_names: &[String],
    cfg: &BomConfig,
    options: &CsvOptions,
) -> Result<(), KiBomError> {
    if !options.separator.is_ascii() {
        return Err(KiBomError::InvalidInput(format!(
            "CSV separator must be an ASCII character, got {:?}",
            options.separator
        )));
    }

    let mut out = out;
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(options.separator as u8).flexible(true);

    let mut writer = builder.from_writer(&mut out);
    writer.write_record(header_names)?;

    let mut written = 0;
    for (index, group) in groups.iter().enumerate() {
        if cfg.ignore_dnf && !group.is_fitted() {
            continue;
        }
        let row = group.get_row(headings);
        if row.len() < header_names.len() {
            return Err(KiBomError::RowLength {
                group: index,
                expected: header_names.len(),
                found: row.len(),
            });
        }
        writer.write_record(&row[..header_names.len()])?;
        written += 1;
    }
    writer.flush()?;
    drop(writer);
    tracing::debug!("Wrote {} of {} groups as CSV", written, groups.len());

    if !options.hide_stats {
        out.write_all(b"\n")?;
        let mut writer = builder.from_writer(&mut out);
        for (key, value) in cfg.summary_attributes() {
            writer.write_record([key, value])?;
        }
        writer.flush()?;
    }

    Ok(())
}

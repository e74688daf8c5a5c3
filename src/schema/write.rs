use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serializer;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use super::FlattenedRow;

/// Spreadsheet-friendly date-time, e.g. `1/09/2023 11:00 am`.
pub const OUTPUT_DATETIME_FORMAT: &str = "%-m/%d/%Y %-I:%M %P";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn reference_datetime<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&dt.format(OUTPUT_DATETIME_FORMAT))
}

/// Whole counts print as integers ("2"), legacy fractional ones as decimals ("1.5").
pub fn co_instructor_count<S: Serializer>(count: &f64, s: S) -> Result<S::Ok, S::Error> {
    if count.fract() == 0.0 {
        s.serialize_u64(*count as u64)
    } else {
        s.collect_str(count)
    }
}

/// Output file name for a term: `SoC_<term>.csv`.
pub fn output_file_name(term: &str) -> String {
    format!("SoC_{}.csv", term)
}

/// Serialize `rows` as UTF-8 CSV with a BOM into any writer.
pub fn write_rows<W: Write>(mut out: W, rows: &[FlattenedRow]) -> Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row).context("serializing output row")?;
    }
    // an empty table still gets its header line
    if rows.is_empty() {
        wtr.write_record(OUTPUT_COLUMNS)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Column order of the written schedule.
pub const OUTPUT_COLUMNS: &[&str] = &[
    "Instructor team",
    "Instructor",
    "Start_time",
    "End_time",
    "Course number",
    "Course title",
    "Room",
    "Section",
    "Type",
    "Seats",
    "Registered",
    "co-instructors",
    "Term",
];

/// Write `SoC_<term>.csv` under `dir`.
///
/// Writes to a hidden temp file first and renames it over the target, so a failed run never
/// leaves a half-written schedule behind.
pub fn write_schedule<P: AsRef<Path>>(dir: P, term: &str, rows: &[FlattenedRow]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating output dir {:?}", dir))?;

    let file_name = output_file_name(term);
    let path = dir.join(&file_name);
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let tmp = fs::File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    write_rows(std::io::BufWriter::new(tmp), rows)
        .with_context(|| format!("writing {:?}", tmp_path))?;

    fs::rename(&tmp_path, &path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;

    info!(path = %path.display(), rows = rows.len(), "wrote schedule");
    Ok(path)
}

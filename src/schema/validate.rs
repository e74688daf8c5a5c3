// src/schema/validate.rs

use anyhow::{bail, Result};
use csv::StringRecord;
use tracing::debug;

/// Columns every program feed must carry.
pub const FEED_COLUMNS: &[&str] = &[
    "Course number",
    "Course title",
    "Units",
    "Instructor",
    "Days",
    "Time",
    "Room",
    "Section",
    "Type",
    "Seats",
    "Registered",
];

/// Fail if any of `required` is absent from `headers`. Extra columns are allowed.
pub fn require_columns(source: &str, headers: &StringRecord, required: &[&str]) -> Result<()> {
    let present: Vec<&str> = headers.iter().map(str::trim).collect();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if !missing.is_empty() {
        bail!(
            "{}: missing required column(s) {:?}; found {:?}",
            source,
            missing,
            present
        );
    }

    for extra in present.iter().filter(|c| !required.contains(*c)) {
        debug!(source, column = %extra, "ignoring extra column");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_header_in_any_order() {
        let mut cols: Vec<&str> = FEED_COLUMNS.to_vec();
        cols.reverse();
        cols.push("Notes");
        let headers = StringRecord::from(cols);
        assert!(require_columns("comm.csv", &headers, FEED_COLUMNS).is_ok());
    }

    #[test]
    fn names_the_missing_columns() {
        let cols: Vec<&str> = FEED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "Days" && *c != "Units")
            .collect();
        let headers = StringRecord::from(cols);
        let err = require_columns("jour.csv", &headers, FEED_COLUMNS).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("jour.csv"), "{msg}");
        assert!(msg.contains("\"Days\""), "{msg}");
        assert!(msg.contains("\"Units\""), "{msg}");
    }
}

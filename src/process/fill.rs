// src/process/fill.rs
use anyhow::{anyhow, Result};
use tracing::{debug, instrument};

use crate::schema::{RawScheduleRow, ScheduleRow};

/// Last value seen in one column, carried onto continuation lines.
struct Carry {
    column: &'static str,
    last: Option<String>,
}

impl Carry {
    fn new(column: &'static str) -> Self {
        Self { column, last: None }
    }

    fn fill(&mut self, value: Option<String>, origin: &str, idx: usize) -> Result<String> {
        if let Some(v) = value {
            self.last = Some(v.clone());
            return Ok(v);
        }
        self.last.clone().ok_or_else(|| {
            anyhow!(
                "{}: record {} has no {} and nothing above it to inherit",
                origin,
                idx,
                self.column
            )
        })
    }
}

/// Propagate course number, title and units down one feed and tag every row with `term`.
///
/// Each column is filled independently from the nearest non-empty value above it. Filling
/// never crosses feeds, so callers pass one feed at a time.
#[instrument(level = "debug", skip(rows), fields(rows = rows.len()))]
pub fn forward_fill(origin: &str, term: &str, rows: Vec<RawScheduleRow>) -> Result<Vec<ScheduleRow>> {
    let mut number = Carry::new("Course number");
    let mut title = Carry::new("Course title");
    let mut units = Carry::new("Units");

    let mut out = Vec::with_capacity(rows.len());
    for (idx, raw) in rows.into_iter().enumerate() {
        out.push(ScheduleRow {
            course_number: number.fill(raw.course_number, origin, idx)?,
            course_title: title.fill(raw.course_title, origin, idx)?,
            units: units.fill(raw.units, origin, idx)?,
            instructor_team: raw.instructor,
            days: raw.days,
            time: raw.time,
            room: raw.room,
            section: raw.section,
            kind: raw.kind,
            seats: raw.seats,
            registered: raw.registered,
            term: term.to_string(),
        });
    }
    debug!(origin, filled = out.len(), "forward-filled feed");
    Ok(out)
}

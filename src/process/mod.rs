// src/process/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::{debug, info, instrument, warn};

pub mod aliases;
pub mod days;
pub mod fill;
pub mod instructor;
pub mod time;
pub mod trimming;
pub mod utils;

use crate::config::NormalizeOptions;
use crate::fetch::Feed;
use crate::schema::{require_columns, FlattenedRow, RawScheduleRow, ScheduleRow, FEED_COLUMNS};
use aliases::NameAliases;
use days::{DayPatterns, ReferenceWeek};

/// Parse one program feed into raw rows.
///
/// The header must name every column in [`FEED_COLUMNS`]; anything else fails the run so a
/// reshaped export cannot silently corrupt the schedule. Cells are trimmed and blank cells
/// become `None`. Fully blank records are skipped.
#[instrument(level = "debug", skip(feed), fields(origin = %feed.origin))]
pub fn load_feed(feed: &Feed) -> Result<Vec<RawScheduleRow>> {
    let text = feed.text.strip_prefix('\u{feff}').unwrap_or(feed.text.as_str());
    // header names are matched trimmed, both here and by serde
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(Cursor::new(text.as_bytes()));

    let headers = rdr
        .headers()
        .with_context(|| format!("reading header of {}", feed.origin))?
        .clone();
    require_columns(&feed.origin, &headers, FEED_COLUMNS)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<RawScheduleRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV parse error in {} at record {}", feed.origin, idx))?;
        let row = trimming::apply_trimming(raw);
        if row == RawScheduleRow::default() {
            debug!(record = idx, "skipping blank record");
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Concatenate a term's feeds into forward-filled, term-tagged rows, in feed order.
#[instrument(level = "info", skip(feeds), fields(feeds = feeds.len()))]
pub fn load_schedule(feeds: &[Feed]) -> Result<Vec<ScheduleRow>> {
    let mut all = Vec::new();
    for feed in feeds {
        if feed.text.trim().is_empty() {
            warn!(origin = %feed.origin, "empty feed; skipping");
            continue;
        }
        let raw = load_feed(feed)?;
        debug!(origin = %feed.origin, program = %feed.program, rows = raw.len(), "parsed feed");
        all.extend(fill::forward_fill(&feed.origin, &feed.term, raw)?);
    }
    info!(rows = all.len(), "loaded schedule rows");
    Ok(all)
}

/// The read-only lookup tables and options the transform stages share for a run.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub aliases: NameAliases,
    pub day_patterns: DayPatterns,
    pub week: ReferenceWeek,
    pub options: NormalizeOptions,
}

impl Pipeline {
    pub fn new(aliases: NameAliases, options: NormalizeOptions) -> Self {
        Self {
            aliases,
            options,
            ..Default::default()
        }
    }

    /// Instructor split → time normalization → day expansion.
    pub fn flatten(&self, rows: Vec<ScheduleRow>) -> Vec<FlattenedRow> {
        let instructors = instructor::normalize_instructors(
            rows,
            &self.aliases,
            self.options.co_instructor_mode,
        );
        let timed = time::normalize_times(instructors);
        days::normalize_days(
            timed,
            &self.day_patterns,
            &self.week,
            self.options.max_meeting_days,
        )
    }

    /// Load a term's feeds and flatten them.
    pub fn run(&self, feeds: &[Feed]) -> Result<Vec<FlattenedRow>> {
        let rows = load_schedule(feeds)?;
        Ok(self.flatten(rows))
    }
}

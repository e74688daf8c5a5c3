// src/process/days.rs
use chrono::{Days, NaiveDate, NaiveDateTime, Weekday};
use tracing::{debug, info, instrument, warn};

use super::time::TimedRow;
use crate::schema::FlattenedRow;

/// Compact day codes used by the SoC export, mapped to full day names.
const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("Fri, Sat", "Friday,Saturday"),
    ("MTuW", "Monday,Tuesday,Wednesday"),
    ("MTuWThF", "Monday,Tuesday,Wednesday,Thursday,Friday"),
    ("Mon, Wed", "Monday,Wednesday"),
    ("MWF", "Monday,Wednesday,Friday"),
    ("Thu, Fri", "Thursday,Friday"),
    ("Tue, Thu", "Tuesday,Thursday"),
    ("TuThF", "Tuesday,Thursday,Friday"),
    ("Wed, Fri", "Wednesday,Friday"),
];

/// Lookup from compact day patterns to comma-joined day names. Unknown patterns pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPatterns {
    entries: Vec<(String, String)>,
}

impl Default for DayPatterns {
    fn default() -> Self {
        Self {
            entries: BUILTIN_PATTERNS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl DayPatterns {
    pub fn canonical<'a>(&'a self, pattern: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| k == pattern)
            .map(|(_, v)| v.as_str())
            .unwrap_or(pattern)
    }

    /// Meeting days of `pattern`, in pattern order. Tokens naming no weekday are skipped.
    pub fn expand(&self, pattern: &str) -> Vec<Weekday> {
        self.canonical(pattern.trim())
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .filter_map(|t| match t.parse::<Weekday>() {
                Ok(day) => Some(day),
                Err(_) => {
                    warn!(pattern, token = t, "unknown day; skipping");
                    None
                }
            })
            .collect()
    }
}

/// The fixed Sunday-to-Saturday week that gives meeting days concrete dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWeek {
    sunday: NaiveDate,
}

impl Default for ReferenceWeek {
    /// Sunday 2023-01-08 through Saturday 2023-01-14.
    fn default() -> Self {
        Self {
            sunday: NaiveDate::from_ymd_opt(2023, 1, 8).expect("valid reference date"),
        }
    }
}

impl ReferenceWeek {
    pub fn date(&self, day: Weekday) -> NaiveDate {
        self.sunday + Days::new(u64::from(day.num_days_from_sunday()))
    }

    fn at(&self, day: Weekday, time: chrono::NaiveTime) -> NaiveDateTime {
        self.date(day).and_time(time)
    }
}

/// Unpivot each timed row into one output row per meeting day.
///
/// `max_days` keeps only the first N days of a pattern; `None` keeps them all.
#[instrument(level = "info", skip_all, fields(rows = rows.len(), max_days = ?max_days))]
pub fn normalize_days(
    rows: Vec<TimedRow>,
    patterns: &DayPatterns,
    week: &ReferenceWeek,
    max_days: Option<usize>,
) -> Vec<FlattenedRow> {
    let mut out = Vec::with_capacity(rows.len() * 2);
    let mut no_days = 0usize;

    for TimedRow { inner, time } in rows {
        let mut days = inner
            .row
            .days
            .as_deref()
            .map(|d| patterns.expand(d))
            .unwrap_or_default();
        if let Some(max) = max_days {
            days.truncate(max);
        }
        if days.is_empty() {
            debug!(course = %inner.row.course_number, days = ?inner.row.days, "no meeting days; dropping row");
            no_days += 1;
            continue;
        }

        for day in days {
            let row = &inner.row;
            out.push(FlattenedRow {
                instructor_team: inner.instructor_team.clone(),
                instructor: inner.instructor.clone(),
                start: week.at(day, time.start),
                end: week.at(day, time.end),
                course_number: row.course_number.clone(),
                course_title: row.course_title.clone(),
                room: row.room.clone(),
                section: row.section.clone(),
                kind: row.kind.clone(),
                seats: row.seats.clone(),
                registered: row.registered.clone(),
                co_instructors: inner.co_instructors,
                term: row.term.clone(),
            });
        }
    }

    info!(flattened_rows = out.len(), no_days, "expanded meeting days");
    out
}

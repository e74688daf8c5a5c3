// src/process/time.rs
use chrono::NaiveTime;
use tracing::{debug, info, instrument, warn};

use crate::schema::InstructorRow;

/// Time value for sections with no scheduled meeting.
pub const UNSCHEDULED: &str = "TBA";

/// Start hours that are still morning when only the end carries "pm".
const MORNING_START_HOURS: std::ops::RangeInclusive<u32> = 8..=11;

/// 12-hour clock text used in logs and in the written date-times.
pub const LABEL_FORMAT: &str = "%-I:%M %P";

/// A disambiguated meeting time, e.g. 11:00 am to 12:20 pm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl MeetingTime {
    pub fn start_label(&self) -> String {
        self.start.format(LABEL_FORMAT).to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format(LABEL_FORMAT).to_string()
    }
}

/// An instructor row with its meeting time resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRow {
    pub inner: InstructorRow,
    pub time: MeetingTime,
}

/// `"H:MM"` on a 12-hour clock.
fn clock_to_time(clock: &str, pm: bool) -> Option<NaiveTime> {
    let (h, m) = clock.trim().split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if !(1..=12).contains(&hour) || m.len() != 2 {
        return None;
    }
    let hour24 = hour % 12 + if pm { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Parse a feed time range like `"2:00-3:20pm"`, where only the end time carries am/pm.
///
/// The start inherits "am" from an "am" end. With a "pm" end, a start hour of 8 through 11 is
/// taken as morning (a class crossing noon) and anything else as afternoon. Classes starting
/// around midnight do not occur in these feeds and are not handled.
pub fn parse_time_range(raw: &str) -> Option<MeetingTime> {
    let (start_raw, end_raw) = raw.trim().split_once('-')?;
    let (start_raw, end_raw) = (start_raw.trim(), end_raw.trim());
    if end_raw.contains('-') || end_raw.len() < 2 || !end_raw.is_char_boundary(end_raw.len() - 2) {
        return None;
    }

    let (end_clock, suffix) = end_raw.split_at(end_raw.len() - 2);
    let end_clock = end_clock.trim();
    let suffix = suffix.to_ascii_lowercase();
    let end_pm = match suffix.as_str() {
        "am" => false,
        "pm" => true,
        _ => return None,
    };

    let start_hour: u32 = start_raw.split(':').next()?.trim().parse().ok()?;
    let start_pm = end_pm && !MORNING_START_HOURS.contains(&start_hour);

    Some(MeetingTime {
        start: clock_to_time(start_raw, start_pm)?,
        end: clock_to_time(end_clock, end_pm)?,
    })
}

/// Resolve every row's meeting time, dropping TBA, unparseable and non-increasing ranges.
#[instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn normalize_times(rows: Vec<InstructorRow>) -> Vec<TimedRow> {
    let mut out = Vec::with_capacity(rows.len());
    let (mut unscheduled, mut invalid) = (0usize, 0usize);

    for inner in rows {
        let raw = inner.row.time.as_deref().unwrap_or("");
        if raw == UNSCHEDULED {
            debug!(course = %inner.row.course_number, "unscheduled; dropping row");
            unscheduled += 1;
            continue;
        }
        match parse_time_range(raw) {
            Some(time) if time.start < time.end => out.push(TimedRow { inner, time }),
            Some(time) => {
                warn!(
                    course = %inner.row.course_number,
                    raw,
                    start = %time.start_label(),
                    end = %time.end_label(),
                    "start is not before end; dropping row"
                );
                invalid += 1;
            }
            None => {
                warn!(course = %inner.row.course_number, raw, "unparseable time; dropping row");
                invalid += 1;
            }
        }
    }

    info!(timed_rows = out.len(), unscheduled, invalid, "normalized meeting times");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{write::OUTPUT_DATETIME_FORMAT, ScheduleRow};
    use chrono::NaiveDate;

    fn labels(raw: &str) -> (String, String) {
        let t = parse_time_range(raw).expect("parses");
        (t.start_label(), t.end_label())
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn class_crossing_noon_starts_in_the_morning() {
        assert_eq!(labels("11:00-12:20pm"), ("11:00 am".into(), "12:20 pm".into()));
        let t = parse_time_range("11:00-12:20pm").unwrap();
        assert_eq!((t.start, t.end), (hm(11, 0), hm(12, 20)));
    }

    #[test]
    fn afternoon_class_starts_in_the_afternoon() {
        assert_eq!(labels("2:00-3:20pm"), ("2:00 pm".into(), "3:20 pm".into()));
        assert_eq!(labels("12:00-1:50pm"), ("12:00 pm".into(), "1:50 pm".into()));
        let t = parse_time_range("6:00-8:50pm").unwrap();
        assert_eq!((t.start, t.end), (hm(18, 0), hm(20, 50)));
    }

    #[test]
    fn morning_end_means_morning_start() {
        assert_eq!(labels("9:00-9:50am"), ("9:00 am".into(), "9:50 am".into()));
    }

    #[test]
    fn zero_padded_hours_render_like_the_written_output() {
        let t = parse_time_range("09:00-09:50am").unwrap();
        assert_eq!((t.start_label(), t.end_label()), ("9:00 am".into(), "9:50 am".into()));

        let day = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
        let written = day.and_time(t.start).format(OUTPUT_DATETIME_FORMAT).to_string();
        assert_eq!(written, format!("1/09/2023 {}", t.start_label()));
    }

    #[test]
    fn rejects_malformed_ranges() {
        for raw in ["", "TBA", "9:00", "9:00-9:50", "9:00-9:50xm", "x:00-9:50am", "13:00-2:00pm", "9:5-9:50am"] {
            assert!(parse_time_range(raw).is_none(), "{raw:?} should not parse");
        }
    }

    fn row(time: Option<&str>) -> InstructorRow {
        InstructorRow {
            row: ScheduleRow {
                course_number: "JOUR-201".into(),
                course_title: "History of News".into(),
                units: "4.0".into(),
                instructor_team: Some("Jane Doe".into()),
                days: Some("Tue, Thu".into()),
                time: time.map(String::from),
                room: None,
                section: None,
                kind: None,
                seats: None,
                registered: None,
                term: "20231".into(),
            },
            instructor_team: "Jane Doe".into(),
            instructor: "Jane Doe".into(),
            co_instructors: 1.0,
        }
    }

    #[test]
    fn stage_drops_tba_missing_and_backwards_times() {
        let out = normalize_times(vec![
            row(Some("TBA")),
            row(None),
            row(Some("7:00-6:00pm")),
            row(Some("2:00-3:20pm")),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].time.start_label(), "2:00 pm");
        assert_eq!(out[0].inner.instructor, "Jane Doe");
    }
}

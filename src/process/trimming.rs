use crate::process::utils::clean_field;
use crate::schema::RawScheduleRow;

/// Apply `clean_field` to every column of a feed row.
pub fn apply_trimming(row: RawScheduleRow) -> RawScheduleRow {
    RawScheduleRow {
        course_number: clean_field(row.course_number),
        course_title: clean_field(row.course_title),
        units: clean_field(row.units),
        instructor: clean_field(row.instructor),
        days: clean_field(row.days),
        time: clean_field(row.time),
        room: clean_field(row.room),
        section: clean_field(row.section),
        kind: clean_field(row.kind),
        seats: clean_field(row.seats),
        registered: clean_field(row.registered),
    }
}

// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// A single record as it appears in a program feed. Empty cells come through as `None`.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct RawScheduleRow {
    #[serde(rename = "Course number")]
    pub course_number: Option<String>,
    #[serde(rename = "Course title")]
    pub course_title: Option<String>,
    #[serde(rename = "Units")]
    pub units: Option<String>,
    #[serde(rename = "Instructor")]
    pub instructor: Option<String>,
    #[serde(rename = "Days")]
    pub days: Option<String>,
    #[serde(rename = "Time")]
    pub time: Option<String>,
    #[serde(rename = "Room")]
    pub room: Option<String>,
    #[serde(rename = "Section")]
    pub section: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "Seats")]
    pub seats: Option<String>,
    #[serde(rename = "Registered")]
    pub registered: Option<String>,
}

/// A feed row after forward-fill, tagged with its term.
#[derive(Debug, PartialEq, Clone)]
pub struct ScheduleRow {
    pub course_number: String,
    pub course_title: String,
    pub units: String,
    pub instructor_team: Option<String>,
    pub days: Option<String>,
    pub time: Option<String>,
    pub room: Option<String>,
    pub section: Option<String>,
    pub kind: Option<String>,
    pub seats: Option<String>,
    pub registered: Option<String>,
    pub term: String,
}

/// One co-instructor of a [`ScheduleRow`].
#[derive(Debug, PartialEq, Clone)]
pub struct InstructorRow {
    pub row: ScheduleRow,
    /// The raw team string after cleaning, before alias resolution.
    pub instructor_team: String,
    pub instructor: String,
    pub co_instructors: f64,
}

/// Final output record: one instructor on one meeting day.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct FlattenedRow {
    #[serde(rename = "Instructor team")]
    pub instructor_team: String,
    #[serde(rename = "Instructor")]
    pub instructor: String,
    #[serde(rename = "Start_time", serialize_with = "super::write::reference_datetime")]
    pub start: chrono::NaiveDateTime,
    #[serde(rename = "End_time", serialize_with = "super::write::reference_datetime")]
    pub end: chrono::NaiveDateTime,
    #[serde(rename = "Course number")]
    pub course_number: String,
    #[serde(rename = "Course title")]
    pub course_title: String,
    #[serde(rename = "Room")]
    pub room: Option<String>,
    #[serde(rename = "Section")]
    pub section: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "Seats")]
    pub seats: Option<String>,
    #[serde(rename = "Registered")]
    pub registered: Option<String>,
    #[serde(rename = "co-instructors", serialize_with = "super::write::co_instructor_count")]
    pub co_instructors: f64,
    #[serde(rename = "Term")]
    pub term: String,
}

// src/process/instructor.rs
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use super::aliases::{NameAliases, NAME_CONNECTOR};
use crate::config::CoInstructorMode;
use crate::schema::{InstructorRow, ScheduleRow};

/// Anchor tags and any other markup the SoC export leaks into the Instructor column.
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Generational suffixes that belong to the name before them.
fn is_name_suffix(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "jr" | "jr." | "sr" | "sr."
    ) || matches!(token, "II" | "III" | "IV" | "V")
}

/// Strip list commas and markup; `None` if nothing is left.
pub fn clean_instructor(raw: &str) -> Option<String> {
    let no_markup = MARKUP.replace_all(raw, " ");
    let cleaned = no_markup
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!cleaned.is_empty()).then_some(cleaned)
}

/// One team string split into individual instructors.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSplit {
    pub names: Vec<String>,
    pub co_instructors: f64,
}

/// Split an alias-resolved team string into two-token names.
///
/// Every name is assumed to be exactly two whitespace tokens once aliases have been applied.
/// An odd token count leaves a final one-token name rather than failing.
pub fn split_team(resolved: &str, mode: CoInstructorMode) -> TeamSplit {
    let tokens: Vec<String> = match mode {
        CoInstructorMode::Legacy => resolved.split_whitespace().map(String::from).collect(),
        CoInstructorMode::SuffixAware => {
            let mut out: Vec<String> = Vec::new();
            for tok in resolved.split_whitespace() {
                match out.last_mut() {
                    Some(prev) if is_name_suffix(tok) => {
                        prev.push(NAME_CONNECTOR);
                        prev.push_str(tok);
                    }
                    _ => out.push(tok.to_string()),
                }
            }
            out
        }
    };

    let names: Vec<String> = tokens
        .chunks(2)
        .map(|chunk| chunk.join(" ").replace(NAME_CONNECTOR, " "))
        .collect();

    let co_instructors = match mode {
        CoInstructorMode::Legacy => tokens.len() as f64 / 2.0,
        CoInstructorMode::SuffixAware => names.len() as f64,
    };

    TeamSplit {
        names,
        co_instructors,
    }
}

/// Unpivot each row into one row per co-instructor. Rows without an instructor are dropped.
#[instrument(level = "info", skip_all, fields(rows = rows.len(), mode = mode.as_str()))]
pub fn normalize_instructors(
    rows: Vec<ScheduleRow>,
    aliases: &NameAliases,
    mode: CoInstructorMode,
) -> Vec<InstructorRow> {
    let mut out = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        let Some(team) = row.instructor_team.as_deref().and_then(clean_instructor) else {
            debug!(course = %row.course_number, section = ?row.section, "no instructor; dropping row");
            dropped += 1;
            continue;
        };

        let split = split_team(&aliases.resolve(&team), mode);
        if split.co_instructors.fract() != 0.0 {
            warn!(
                team = %team,
                co_instructors = split.co_instructors,
                "instructor team does not split into two-token names"
            );
        }

        for name in split.names {
            out.push(InstructorRow {
                row: row.clone(),
                instructor_team: team.clone(),
                instructor: name,
                co_instructors: split.co_instructors,
            });
        }
    }

    info!(instructor_rows = out.len(), dropped, "split instructor teams");
    out
}

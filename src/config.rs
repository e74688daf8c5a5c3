// src/config.rs

use std::path::PathBuf;
use url::Url;

/// Program feeds published for the communication and journalism schools.
pub const DEFAULT_PROGRAMS: &[&str] = &["ascj", "comm", "cmgt", "dmm", "dsm", "jour", "pubd", "pr"];

pub const DEFAULT_BASE_URL: &str = "https://classes.usc.edu";

pub const DEFAULT_ALIAS_FILE: &str = "multipart_names.csv";

/// How co-instructors are counted and split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoInstructorMode {
    /// Two-token chunks, count = tokens / 2. An uncaptured "Jr" yields 1.5.
    Legacy,
    /// Generational suffixes stick to the preceding token; count is the number of names.
    #[default]
    SuffixAware,
}

impl CoInstructorMode {
    pub fn as_str(&self) -> &str {
        match self {
            CoInstructorMode::Legacy => "legacy",
            CoInstructorMode::SuffixAware => "suffix-aware",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Some(CoInstructorMode::Legacy),
            "suffix-aware" | "suffix_aware" => Some(CoInstructorMode::SuffixAware),
            _ => None,
        }
    }
}

/// Where program feeds come from.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedSource {
    /// `<base>/term-<term>/csv/<program>.csv`
    Http { base: Url },
    /// `<dir>/<term>/<program>.csv`
    Dir(PathBuf),
}

/// Everything a run needs. Built once by the binary and passed down explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub terms: Vec<String>,
    pub programs: Vec<String>,
    pub source: FeedSource,
    pub alias_file: PathBuf,
    pub output_dir: PathBuf,
    pub normalize: NormalizeOptions,
}

/// Knobs for the transform stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    pub co_instructor_mode: CoInstructorMode,
    /// Keep at most this many meeting days per row. `None` keeps all of them.
    pub max_meeting_days: Option<usize>,
}

// src/process/aliases.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, instrument, warn};

use crate::schema::require_columns;

/// Joins the parts of a multi-word personal name inside a canonical alias.
pub const NAME_CONNECTOR: char = '_';

const ALIAS_COLUMNS: &[&str] = &["SoC_multipart_name", "twopart_name"];

#[derive(Debug, Deserialize)]
struct AliasRecord {
    #[serde(rename = "SoC_multipart_name")]
    source: String,
    #[serde(rename = "twopart_name")]
    canonical: String,
}

/// Raw name variants → canonical two-token names, e.g.
/// `Jennifer de la Fuente` → `Jennifer de_la_Fuente`, `Joshua Kun` → `Josh Kun`.
///
/// Replacements run in file order over literal substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameAliases {
    entries: Vec<(String, String)>,
}

impl NameAliases {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        }
    }

    /// Load the two-column alias reference file.
    #[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening alias file {:?}", path))?;
        let aliases = Self::from_reader(&path.display().to_string(), file)?;
        info!(aliases = aliases.len(), "loaded name aliases");
        Ok(aliases)
    }

    pub fn from_reader<R: Read>(origin: &str, rdr: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let headers = rdr
            .headers()
            .with_context(|| format!("reading header of {}", origin))?
            .clone();
        require_columns(origin, &headers, ALIAS_COLUMNS)?;

        let mut entries = Vec::new();
        for (idx, rec) in rdr.deserialize::<AliasRecord>().enumerate() {
            let rec = rec.with_context(|| format!("{}: bad alias record {}", origin, idx))?;
            if rec.source.is_empty() || rec.canonical.is_empty() {
                warn!(origin, record = idx, "skipping blank alias");
                continue;
            }
            entries.push((rec.source, rec.canonical));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every known variant in `s` with its canonical form.
    pub fn resolve(&self, s: &str) -> String {
        let mut out = s.to_string();
        for (source, canonical) in &self.entries {
            if out.contains(source.as_str()) {
                debug!(%source, %canonical, "alias hit");
                out = out.replace(source.as_str(), canonical);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_reference_file_and_resolves_in_order() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            "SoC_multipart_name,twopart_name\n\
             Jennifer de la Fuente,Jennifer de_la_Fuente\n\
             Eunjin (Anna) Kim,Eunjin_(Anna) Kim\n\
             Joshua Kun,Josh Kun\n"
        )?;
        let aliases = NameAliases::load(tmp.path())?;
        assert_eq!(aliases.len(), 3);

        assert_eq!(
            aliases.resolve("Joshua Kun Jennifer de la Fuente"),
            "Josh Kun Jennifer de_la_Fuente"
        );
        assert_eq!(aliases.resolve("Eunjin (Anna) Kim"), "Eunjin_(Anna) Kim");
        assert_eq!(aliases.resolve("Jane Doe"), "Jane Doe");
        Ok(())
    }

    #[test]
    fn rejects_file_without_expected_columns() {
        let data = "raw,canonical\nJoshua Kun,Josh Kun\n";
        let err = NameAliases::from_reader("aliases.csv", data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("SoC_multipart_name"));
    }

    #[test]
    fn blank_rows_are_skipped() -> Result<()> {
        let data = "SoC_multipart_name,twopart_name\n,\nJoshua Kun,Josh Kun\n";
        let aliases = NameAliases::from_reader("aliases.csv", data.as_bytes())?;
        assert_eq!(aliases, NameAliases::new([("Joshua Kun", "Josh Kun")]));
        Ok(())
    }
}

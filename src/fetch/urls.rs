// src/fetch/urls.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Feed URL for one (term, program), patterned after
/// `https://classes.usc.edu/term-20231/csv/comm.csv`.
pub fn feed_url(base: &Url, term: &str, program: &str) -> Result<Url> {
    // `join` replaces the last segment unless the base ends in '/'
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("term-{}/csv/{}.csv", term, program))
        .with_context(|| format!("building feed URL for {} {} under {}", term, program, base))
}

/// On-disk location of a feed: `<dir>/<term>/<program>.csv`.
pub fn feed_path(dir: &Path, term: &str, program: &str) -> PathBuf {
    dir.join(term).join(format!("{}.csv", program))
}

// src/fetch/feeds.rs
use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::{io::ErrorKind, path::Path, time::Duration};
use tokio::{fs, time::sleep};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::urls::{feed_path, feed_url};
use crate::config::FeedSource;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Raw CSV text of one program's schedule for one term.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub term: String,
    pub program: String,
    /// URL or path the text came from, for error messages.
    pub origin: String,
    pub text: String,
}

/// `Ok(None)` when the server says the feed does not exist.
async fn get_text_core(client: &Client, url: &Url) -> Result<Option<String>> {
    debug!("Fetching text from {}", url);
    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?;
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let text = resp
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;
    Ok(Some(text))
}

async fn get_text_with_retry(
    client: &Client,
    url: &Url,
    max_retries: u32,
    initial_backoff_ms: u64,
) -> Result<Option<String>> {
    let mut attempts = 0;
    loop {
        match get_text_core(client, url).await {
            Ok(t) => return Ok(t),
            Err(e) if attempts < max_retries => {
                attempts += 1;
                let backoff = initial_backoff_ms * 2u64.pow(attempts - 1);
                warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => {
                error!(%url, error = %e, "Exhausted retries");
                return Err(e);
            }
        }
    }
}

async fn fetch_http_feed(client: &Client, base: &Url, term: &str, program: &str) -> Option<Feed> {
    let url = match feed_url(base, term, program) {
        Ok(u) => u,
        Err(e) => {
            warn!(term, program, error = %e, "skipping feed");
            return None;
        }
    };
    match get_text_with_retry(client, &url, MAX_RETRIES, INITIAL_BACKOFF_MS).await {
        Ok(Some(text)) => Some(Feed {
            term: term.to_string(),
            program: program.to_string(),
            origin: url.to_string(),
            text,
        }),
        Ok(None) => {
            warn!(%url, "feed not published; skipping");
            None
        }
        Err(e) => {
            warn!(%url, error = %e, "feed unavailable; skipping");
            None
        }
    }
}

async fn read_local_feed(dir: &Path, term: &str, program: &str) -> Option<Feed> {
    let path = feed_path(dir, term, program);
    match fs::read_to_string(&path).await {
        Ok(text) => Some(Feed {
            term: term.to_string(),
            program: program.to_string(),
            origin: path.display().to_string(),
            text,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "feed file missing; skipping");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "feed file unreadable; skipping");
            None
        }
    }
}

/// Collect every available program feed for `term`, in `programs` order.
///
/// HTTP fetches run concurrently; a feed that is missing or keeps failing contributes nothing.
#[instrument(level = "info", skip(client, source, programs))]
pub async fn load_term_feeds(
    client: &Client,
    source: &FeedSource,
    term: &str,
    programs: &[String],
) -> Vec<Feed> {
    let results: Vec<Option<Feed>> = match source {
        FeedSource::Http { base } => {
            join_all(
                programs
                    .iter()
                    .map(|p| fetch_http_feed(client, base, term, p)),
            )
            .await
        }
        FeedSource::Dir(dir) => {
            join_all(programs.iter().map(|p| read_local_feed(dir, term, p))).await
        }
    };

    let feeds: Vec<Feed> = results.into_iter().flatten().collect();
    info!(
        available = feeds.len(),
        requested = programs.len(),
        "loaded program feeds"
    );
    feeds
}

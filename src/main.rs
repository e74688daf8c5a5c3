use anyhow::{anyhow, Context, Result};
use clap::Parser;
use socprep::config::{
    CoInstructorMode, Config, FeedSource, NormalizeOptions, DEFAULT_ALIAS_FILE, DEFAULT_BASE_URL,
    DEFAULT_PROGRAMS,
};
use std::{env, num::NonZeroUsize, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Flatten Schedule of Classes feeds into one row per instructor and meeting day"
)]
struct Args {
    /// Term ids to process, e.g. 20231 (repeatable)
    #[arg(short, long = "term", default_values_t = vec!["20231".to_string()])]
    terms: Vec<String>,
    /// Program feeds to load (repeatable); defaults to every COMM/JOUR program
    #[arg(short, long = "program")]
    programs: Vec<String>,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Read `<DIR>/<term>/<program>.csv` instead of fetching over HTTP
    #[arg(long)]
    input_dir: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_ALIAS_FILE)]
    aliases: PathBuf,
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// `legacy` keeps the historical tokens/2 count; `suffix-aware` keeps "Jr" with its name
    #[arg(long, default_value = "suffix-aware")]
    co_instructor_mode: String,
    /// Keep at most N meeting days per section (the old export kept 2)
    #[arg(long)]
    max_meeting_days: Option<NonZeroUsize>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let co_instructor_mode = CoInstructorMode::from_str(&self.co_instructor_mode)
            .ok_or_else(|| anyhow!("unknown co-instructor mode {:?}", self.co_instructor_mode))?;

        let source = match self.input_dir {
            Some(dir) => FeedSource::Dir(dir),
            None => FeedSource::Http {
                base: Url::parse(&self.base_url)
                    .with_context(|| format!("parsing base URL {}", self.base_url))?,
            },
        };

        let programs = if self.programs.is_empty() {
            DEFAULT_PROGRAMS.iter().map(|p| p.to_string()).collect()
        } else {
            self.programs
        };

        Ok(Config {
            terms: self.terms,
            programs,
            source,
            alias_file: self.aliases,
            output_dir: self.output_dir,
            normalize: NormalizeOptions {
                co_instructor_mode,
                max_meeting_days: self.max_meeting_days.map(NonZeroUsize::get),
            },
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    let config = Args::parse().into_config()?;
    info!(
        terms = ?config.terms,
        programs = config.programs.len(),
        mode = config.normalize.co_instructor_mode.as_str(),
        "startup"
    );

    let written = socprep::run(&config).await?;
    for path in &written {
        info!(path = %path.display(), "schedule ready");
    }
    info!("all done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fetch_every_program_over_http() -> Result<()> {
        let config = Args::parse_from(["socprep"]).into_config()?;
        assert_eq!(config.terms, vec!["20231"]);
        assert_eq!(config.programs.len(), DEFAULT_PROGRAMS.len());
        assert!(matches!(config.source, FeedSource::Http { .. }));
        assert_eq!(config.normalize, NormalizeOptions::default());
        Ok(())
    }

    #[test]
    fn flags_select_local_feeds_and_legacy_count() -> Result<()> {
        let config = Args::parse_from([
            "socprep",
            "--term",
            "20231",
            "--term",
            "20232",
            "--program",
            "comm",
            "--input-dir",
            "feeds",
            "--co-instructor-mode",
            "legacy",
            "--max-meeting-days",
            "2",
        ])
        .into_config()?;
        assert_eq!(config.terms, vec!["20231", "20232"]);
        assert_eq!(config.programs, vec!["comm"]);
        assert_eq!(config.source, FeedSource::Dir(PathBuf::from("feeds")));
        assert_eq!(config.normalize.co_instructor_mode, CoInstructorMode::Legacy);
        assert_eq!(config.normalize.max_meeting_days, Some(2));
        Ok(())
    }

    #[test]
    fn zero_meeting_day_cap_is_rejected() {
        assert!(Args::try_parse_from(["socprep", "--max-meeting-days", "0"]).is_err());
        assert!(Args::try_parse_from(["socprep", "--max-meeting-days", "1"]).is_ok());
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Args::parse_from(["socprep", "--co-instructor-mode", "exact"])
            .into_config()
            .unwrap_err();
        assert!(err.to_string().contains("exact"));
    }
}

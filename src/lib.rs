pub mod config;
pub mod fetch;
pub mod process;
pub mod schema;

use anyhow::{Context, Result};
use reqwest::Client;
use std::{path::PathBuf, time::Duration};
use tracing::{info, instrument};

use config::Config;
use process::{aliases::NameAliases, Pipeline};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch, flatten and write every configured term. Returns the written file paths.
#[instrument(level = "info", skip_all, fields(terms = ?config.terms))]
pub async fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let aliases = NameAliases::load(&config.alias_file)?;
    let pipeline = Pipeline::new(aliases, config.normalize);
    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("building HTTP client")?;

    let mut written = Vec::with_capacity(config.terms.len());
    for term in &config.terms {
        let feeds = fetch::load_term_feeds(&client, &config.source, term, &config.programs).await;
        let rows = pipeline
            .run(&feeds)
            .with_context(|| format!("normalizing term {}", term))?;
        let path = schema::write_schedule(&config.output_dir, term, &rows)?;
        info!(term = %term, rows = rows.len(), "term done");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeedSource, NormalizeOptions};
    use crate::process::tests::{init_test_logging, COMM_FEED};
    use std::fs;
    use tempfile::tempdir;

    const JOUR_FEED: &str = "Course number,Course title,Units,Instructor,Days,Time,Room,Section,Type,Seats,Registered
JOUR-201,History of News,4.0,Joshua Kun,\"Tue, Thu\",TBA,ANN 210,21000,Lecture,40,30
,,,Joshua Kun,MTuW,8:00-8:50am,ANN 210,21001,Discussion,20,20
";

    fn config_for(root: &std::path::Path) -> Result<Config> {
        let feeds = root.join("feeds").join("20231");
        fs::create_dir_all(&feeds)?;
        fs::write(feeds.join("comm.csv"), COMM_FEED)?;
        fs::write(feeds.join("jour.csv"), JOUR_FEED)?;

        let alias_file = root.join("multipart_names.csv");
        fs::write(
            &alias_file,
            "SoC_multipart_name,twopart_name\nJennifer de la Fuente,Jennifer de_la_Fuente\nJoshua Kun,Josh Kun\n",
        )?;

        Ok(Config {
            terms: vec!["20231".into()],
            programs: vec!["comm".into(), "dmm".into(), "jour".into()],
            source: FeedSource::Dir(root.join("feeds")),
            alias_file,
            output_dir: root.join("out"),
            normalize: NormalizeOptions::default(),
        })
    }

    #[tokio::test]
    async fn writes_one_file_per_term_and_is_repeatable() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let config = config_for(dir.path())?;

        let written = run(&config).await?;
        assert_eq!(written, vec![dir.path().join("out").join("SoC_20231.csv")]);
        let first = fs::read(&written[0])?;

        let again = run(&config).await?;
        let second = fs::read(&again[0])?;
        assert_eq!(first, second);

        assert!(first.starts_with(b"\xEF\xBB\xBF"));
        let text = String::from_utf8(first[3..].to_vec())?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Instructor team,Instructor,Start_time,End_time,Course number,Course title,Room,Section,Type,Seats,Registered,co-instructors,Term"
        );
        // 9 comm rows; the TBA jour section drops, its MTuW discussion gives 3
        assert_eq!(lines.len(), 1 + 9 + 3);
        assert!(lines.iter().all(|l| !l.contains("TBA")));
        assert!(text.contains(
            "Jane Doe John Smith,Jane Doe,1/09/2023 11:00 am,1/09/2023 12:20 pm,COMM-200,"
        ));
        assert!(text.contains(",Jennifer de la Fuente,1/10/2023 2:00 pm,1/10/2023 3:20 pm,"));
        assert!(text.contains("Joshua Kun,Josh Kun,1/11/2023 8:00 am,1/11/2023 8:50 am,JOUR-201,"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_alias_file_fails_the_run() -> Result<()> {
        let dir = tempdir()?;
        let mut config = config_for(dir.path())?;
        config.alias_file = dir.path().join("nope.csv");
        let err = run(&config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("nope.csv"));
        Ok(())
    }
}

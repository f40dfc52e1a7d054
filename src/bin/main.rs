use std::{env, error::Error};

use arxivfetch::{
    config::{self, RunConfig},
    parser::{ArxivFetcher, FetchStatus},
    storage::JsonSaver
};

fn main() -> Result<(), Box<dyn Error>> {
    let config = RunConfig::from_args(env::args());
    let output = config::default_output_path()?;

    let fetcher = ArxivFetcher::new();
    let outcome = fetcher.fetch(&config.query, config.max_results)?;
    if let FetchStatus::Degraded(reason) = &outcome.status {
        eprintln!("Feed unavailable: {}", reason);
    }

    JsonSaver::save_papers_json(&output, outcome.papers, &config.query)?;
    Ok(())
}

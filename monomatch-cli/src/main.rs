use clap::Parser;
use monomatch::io::load_mono_image;
use monomatch::{Match, MatchConfig, Matcher};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "MonoMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the search workers.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MatchConfigJson {
    parallel: bool,
    cancel_on_match: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            parallel: cfg.parallel,
            cancel_on_match: cfg.cancel_on_match,
        }
    }
}

impl From<MatchConfigJson> for MatchConfig {
    fn from(value: MatchConfigJson) -> Self {
        Self {
            parallel: value.parallel,
            cancel_on_match: value.cancel_on_match,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    haystack_path: String,
    needle_path: String,
    output_path: Option<String>,
    threshold: u8,
    invert: bool,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            haystack_path: String::new(),
            needle_path: String::new(),
            output_path: None,
            threshold: 128,
            invert: false,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    found: bool,
    x: Option<usize>,
    y: Option<usize>,
}

impl From<Option<Match>> for Output {
    fn from(value: Option<Match>) -> Self {
        Self {
            found: value.is_some(),
            x: value.map(|m| m.x),
            y: value.map(|m| m.y),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("monomatch=info".parse()?),
            )
            .with_target(false)
            .with_thread_names(true)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.haystack_path.is_empty() || config.needle_path.is_empty() {
        return Err("haystack_path and needle_path must be set in the config".into());
    }

    let needle = load_mono_image(&config.needle_path, config.threshold, config.invert)?;
    if needle.height() < 2 {
        return Err("needle image must be at least two rows tall".into());
    }
    let haystack = load_mono_image(&config.haystack_path, config.threshold, config.invert)?;
    tracing::info!(
        hay_width = haystack.width(),
        hay_height = haystack.height(),
        needle_width = needle.width(),
        needle_height = needle.height(),
        "loaded masks"
    );

    let matcher = Matcher::new(needle).with_config(config.match_cfg.into());
    let output = Output::from(matcher.find(haystack));
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

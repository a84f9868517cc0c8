//! algoplot - benchmark comparison charts
//!
//! Reads result files of `n time cost [solution]` lines, averages the
//! solve time per `n` for every file, and draws all files as curves on
//! one chart.
//!
//! Exit codes:
//!   0 - Success (including sources skipped for having no valid data)
//!   1 - Runtime error (unreadable source, config or write failure)
//!   2 - Usage error (no source files given)

mod analysis;
mod chart;
mod cli;
mod config;
mod error;
mod models;

use analysis::{CollectOptions, Collection};
use anyhow::{Context, Result};
use chart::{ChartRenderer, SvgRenderer};
use cli::Args;
use config::{ChartConfig, Config, CONFIG_FILE};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments; clap exits with status 2 on usage errors
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("algoplot v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Run failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .algoplot.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete collect, render and display workflow.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let collection = produce_chart(&args.sources, &config, &SvgRenderer)?;
    let chart_path = &config.chart.output;
    println!("Comparison plot saved to {}", chart_path.display());

    if let Some(ref summary_path) = args.summary_json {
        let summary = chart::build_summary(&collection, &config.chart.title, chart_path);
        chart::write_json_summary(&summary, summary_path)?;
        info!("Summary written to {}", summary_path.display());
    }

    for skipped in &collection.skipped {
        debug!("Skipped {} ({})", skipped.source, skipped.reason);
    }
    info!(
        "Plotted {} curve(s), skipped {} source(s) in {:.2}s",
        collection.curves.len(),
        collection.skipped.len(),
        start_time.elapsed().as_secs_f64()
    );

    if should_show(&config.chart) {
        if let Err(e) = chart::viewer::show(chart_path) {
            warn!("Could not open chart viewer: {}", e);
        }
    } else {
        debug!("Not opening the chart viewer");
    }

    Ok(())
}

/// Collect curves from every source and render them to the configured output.
fn produce_chart<R: ChartRenderer>(
    sources: &[PathBuf],
    config: &Config,
    renderer: &R,
) -> Result<Collection> {
    let options = CollectOptions {
        skip_unreadable: config.input.skip_unreadable,
    };
    let collection = analysis::collect_curves(sources, options)?;

    let mut builder = config.chart.builder();
    builder.add_curves(collection.curves.iter().cloned());
    debug!("Rendering {} curve(s)", builder.curve_count());

    let output = &config.chart.output;
    let matches_format = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(renderer.extension()));
    if !matches_format {
        warn!(
            "{} does not end in .{}; the file is written in that format regardless",
            output.display(),
            renderer.extension()
        );
    }

    renderer
        .render_to(&builder.build(), output)
        .with_context(|| format!("Failed to write chart to {}", output.display()))?;

    Ok(collection)
}

/// Whether the saved chart should be handed to a viewer.
fn should_show(chart_config: &ChartConfig) -> bool {
    chart_config
        .show
        .unwrap_or_else(chart::viewer::display_available)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.chart.output = dir.path().join("compare_algos_plot.svg");
        config
    }

    #[test]
    fn test_end_to_end_two_sources() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", "1 1.0 5 X\n2 2.0 6 Y\n");
        let b = write_source(&dir, "b.txt", "1 3.0 5 X\n");
        let config = config_in(&dir);

        let collection = produce_chart(&[a, b], &config, &SvgRenderer).unwrap();

        assert_eq!(collection.curves.len(), 2);
        assert_eq!(collection.curves[0].label, "a");
        assert_eq!(collection.curves[0].pairs(), vec![(1, 1.0), (2, 2.0)]);
        assert_eq!(collection.curves[1].label, "b");
        assert_eq!(collection.curves[1].pairs(), vec![(1, 3.0)]);

        let svg = std::fs::read_to_string(&config.chart.output).unwrap();
        assert!(svg.contains("data-label=\"a\""));
        assert!(svg.contains("data-label=\"b\""));
    }

    #[test]
    fn test_empty_sources_still_write_chart() {
        let dir = TempDir::new().unwrap();
        let empty = write_source(&dir, "empty.txt", "garbage line\n");
        let config = config_in(&dir);

        let collection = produce_chart(&[empty], &config, &SvgRenderer).unwrap();

        assert!(collection.curves.is_empty());
        assert_eq!(collection.skipped.len(), 1);
        assert!(config.chart.output.exists());
    }

    #[test]
    fn test_unreadable_source_aborts_before_render() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let result = produce_chart(&[dir.path().join("missing.txt")], &config, &SvgRenderer);

        assert!(result.is_err());
        assert!(!config.chart.output.exists());
    }

    #[test]
    fn test_should_show_respects_explicit_setting() {
        let mut chart = ChartConfig::default();
        chart.show = Some(false);
        assert!(!should_show(&chart));
        chart.show = Some(true);
        assert!(should_show(&chart));
    }
}

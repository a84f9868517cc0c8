//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// algoplot - compare benchmark result files on one chart
///
/// Each source file holds lines of the form `n time cost [solution]`.
/// Times are averaged per `n` and every file becomes one curve, labeled
/// with the file name minus its extension.
///
/// Examples:
///   algoplot results_backtracking.txt results_dp.txt
///   algoplot results/*.txt --log-y -o solve_times.svg
///   algoplot results_dp.txt --summary-json summary.json --no-show
///   algoplot --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Result files to compare, one curve per file
    #[arg(
        value_name = "SOURCE",
        required_unless_present = "init_config",
        num_args = 1..
    )]
    pub sources: Vec<PathBuf>,

    /// Output path for the chart image
    ///
    /// Default: compare_algos_plot.svg in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Chart title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Label for the x axis
    #[arg(long, value_name = "TEXT")]
    pub x_label: Option<String>,

    /// Label for the y axis
    #[arg(long, value_name = "TEXT")]
    pub y_label: Option<String>,

    /// Chart width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Use a logarithmic y axis
    #[arg(long)]
    pub log_y: bool,

    /// Open the chart in the system viewer after saving
    #[arg(long, conflicts_with = "no_show")]
    pub show: bool,

    /// Never open the chart, even if a display is available
    #[arg(long, conflicts_with = "show")]
    pub no_show: bool,

    /// Skip sources that cannot be read instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Also write a JSON summary of the plotted curves
    #[arg(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .algoplot.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "ALGOPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .algoplot.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.width == Some(0) || self.height == Some(0) {
            return Err("Chart width and height must be at least 1 pixel".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            sources: vec![PathBuf::from("results_dp.txt")],
            output: None,
            title: None,
            x_label: None,
            y_label: None,
            width: None,
            height: None,
            log_y: false,
            show: false,
            no_show: false,
            skip_unreadable: false,
            summary_json: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_sources() {
        let args = Args::try_parse_from(["algoplot", "a.txt", "b.txt"]).unwrap();
        assert_eq!(
            args.sources,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_no_sources_is_usage_error() {
        let err = Args::try_parse_from(["algoplot"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_init_config_needs_no_sources() {
        let args = Args::try_parse_from(["algoplot", "--init-config"]).unwrap();
        assert!(args.init_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_show_conflicts_with_no_show() {
        assert!(Args::try_parse_from(["algoplot", "a.txt", "--show", "--no-show"]).is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_size() {
        let mut args = make_args();
        args.width = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}

//! CLI argument parsing for aimtp

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for aim attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "aimtp")]
#[command(version)]
#[command(about = "Estimate aim throughput attributes for a movement sequence", long_about = None)]
pub struct Cli {
    /// Movement document (JSON object with `movements`, or a bare JSON array)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Calculator configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the per-movement diagnostic trace to this file
    #[arg(short = 'g', long = "graph-output", value_name = "FILE")]
    pub graph_output: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_input() {
        let cli = Cli::parse_from(["aimtp", "map.json"]);
        assert_eq!(cli.input, PathBuf::from("map.json"));
        assert!(cli.config.is_none());
        assert!(cli.graph_output.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_default_format_text() {
        let cli = Cli::parse_from(["aimtp", "map.json"]);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["aimtp", "--format", "json", "map.json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_config_and_graph_output() {
        let cli = Cli::parse_from([
            "aimtp",
            "-c",
            "aimtp.toml",
            "--graph-output",
            "trace.txt",
            "map.json",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("aimtp.toml")));
        assert_eq!(cli.graph_output, Some(PathBuf::from("trace.txt")));
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["aimtp", "--debug", "map.json"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["aimtp"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["aimtp", "--format", "xml", "map.json"]).is_err());
    }
}

//! Command-line interface

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use benford_io::{ColumnAnalysis, CsvTable};
use clap::{Parser, Subcommand};

use crate::config::{BenfordConfig, OutputFormat};
use crate::report::{self, PreviewReport};

/// Test numeric data against Benford's Law
#[derive(Parser, Debug)]
#[command(name = "benford")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/benford/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show row counts, detected dialect and the first rows of a CSV file
    Preview {
        /// CSV file
        file: PathBuf,
    },

    /// Analyse columns of a CSV file
    Analyze {
        /// CSV file
        file: PathBuf,

        /// Column index to analyse (repeatable; default: every numeric column)
        #[arg(long = "column", short = 'c')]
        columns: Vec<usize>,
    },

    /// Analyse one value per line from a file or stdin
    Check {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = BenfordConfig::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.report.format);

    let output = match &cli.command {
        Commands::Preview { file } => preview(file, &config, format)?,
        Commands::Analyze { file, columns } => analyze(file, columns, &config, format)?,
        Commands::Check { file } => check(file.as_deref(), &config, format)?,
        Commands::Config => config.to_toml()?,
    };

    print!("{output}");
    Ok(())
}

fn preview(
    file: &Path,
    config: &BenfordConfig,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let table = CsvTable::open(file, &config.ingest)?;
    let preview = PreviewReport::new(&table);

    Ok(match format {
        OutputFormat::Text => report::preview_text(&preview),
        OutputFormat::Json => report::to_json(&preview)? + "\n",
    })
}

fn analyze(
    file: &Path,
    columns: &[usize],
    config: &BenfordConfig,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let table = CsvTable::open(file, &config.ingest)?;

    let results: Vec<ColumnAnalysis> = if columns.is_empty() {
        table.analyze_viable_columns()
    } else {
        columns
            .iter()
            .map(|&index| table.column_analysis(index))
            .collect::<Result<_, _>>()?
    };

    if results.is_empty() {
        tracing::warn!("{} has no numeric columns", table.filename());
    }

    Ok(match format {
        OutputFormat::Text => results
            .iter()
            .map(|column| report::column_text(column, config.report.significance))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => report::to_json(&results)? + "\n",
    })
}

fn check(
    file: Option<&Path>,
    config: &BenfordConfig,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let (title, input) = match file {
        Some(path) => (path.display().to_string(), fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            ("stdin".to_string(), input)
        }
    };

    let analysis = benford_stats::analyze(input.lines().map(str::trim));

    Ok(match format {
        OutputFormat::Text => {
            report::analysis_text(&title, &analysis, config.report.significance)
        }
        OutputFormat::Json => report::to_json(&analysis)? + "\n",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_columns() {
        let cli = Cli::parse_from([
            "benford", "analyze", "data.csv", "--column", "2", "-c", "4", "--format", "json",
        ]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Analyze { file, columns } => {
                assert_eq!(file, PathBuf::from("data.csv"));
                assert_eq!(columns, vec![2, 4]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_without_file() {
        let cli = Cli::parse_from(["benford", "--log-level", "debug", "check"]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Check { file: None }));
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::parse_from(["benford", "config", "--config", "custom.toml"]);
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(Cli::try_parse_from(["benford", "--log-level", "loud", "check"]).is_err());
    }

    #[test]
    fn test_analyze_selected_column_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "id,amount\n1,120\n2,19\n3,\n4,340\n").unwrap();

        let output = analyze(
            file.path(),
            &[1],
            &BenfordConfig::default(),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["name"], "amount");
        assert_eq!(value[0]["n"], 3);
        assert_eq!(value[0]["discarded"], 2);
    }

    #[test]
    fn test_analyze_bad_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a,b\n1,2\n").unwrap();

        let result = analyze(
            file.path(),
            &[7],
            &BenfordConfig::default(),
            OutputFormat::Text,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_check_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "$1,200\n 34 \n\n-0.5\nn/a\n").unwrap();

        let output = check(
            Some(file.path()),
            &BenfordConfig::default(),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["n"], 3);
        assert_eq!(value["discarded"], 2);
        assert_eq!(value["observedDistribution"]["1"], 1);
        assert_eq!(value["observedDistribution"]["3"], 1);
        assert_eq!(value["observedDistribution"]["5"], 1);
    }

    #[test]
    fn test_preview_missing_file() {
        let result = preview(
            Path::new("/nonexistent/data.csv"),
            &BenfordConfig::default(),
            OutputFormat::Text,
        );
        assert!(result.is_err());
    }
}

use crate::core::Source;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matmul_bench")]
#[command(about = "Extract, merge and analyze matrix multiplication benchmark logs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse all configured logs, merge them and write the datasets
    Extract {
        /// JSON configuration file (missing fields use the defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the log directory
        #[arg(short, long)]
        log_dir: Option<PathBuf>,

        /// Override the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scan the log directory for *.log files instead of the configured list
        #[arg(short, long)]
        discover: bool,

        /// Only print warnings and errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// Parse a single log and print its records as JSON
    Parse {
        /// Log file to parse
        log: PathBuf,

        /// Provenance tag attached to the records
        #[arg(short, long, default_value = "original")]
        source: SourceArg,
    },

    /// Derive speedup and efficiency from an entries file
    Derive {
        /// Entries file written by `extract` (.csv or .json)
        entries: PathBuf,

        /// Also write the derived metrics as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print chart-ready speedup series (missing points as 0)
        #[arg(long)]
        series: bool,
    },

    /// Summarize an entries file
    Summary {
        /// Entries file written by `extract` (.csv or .json)
        entries: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceArg {
    Original,
    Extended,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Original => Source::Original,
            SourceArg::Extended => Source::Extended,
        }
    }
}

use anyhow::Result;
use clap::Parser;
use matmul_bench::cli::{
    execute_derive, execute_extract, execute_parse, execute_summary, Cli, Commands,
    ExtractOptions,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            config,
            log_dir,
            output,
            discover,
            quiet,
        } => {
            let run = execute_extract(ExtractOptions {
                config,
                log_dir,
                output,
                discover,
                quiet,
            })?;
            if run.summary.sources.iter().all(|s| !s.found) {
                eprintln!("⚠️  No log files were found; the datasets are empty");
            }
        }
        Commands::Parse { log, source } => {
            execute_parse(&log, source.into())?;
        }
        Commands::Derive {
            entries,
            output,
            series,
        } => {
            execute_derive(&entries, output.as_deref(), series)?;
        }
        Commands::Summary { entries } => {
            execute_summary(&entries)?;
        }
    }

    Ok(())
}

use crate::core::{resolve_sources, ExtractionError, PipelineConfig, PipelineReporter};
use crate::metrics::best_configurations;
use crate::services::{ConsoleReporter, DefaultPipelineConfig, FileDatasetWriter};
use crate::storage::local::LocalLogStorage;
use crate::{Pipeline, PipelineRun};
use anyhow::Result;
use std::path::PathBuf;

/// extractコマンドの引数をまとめた構造体
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub config: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub discover: bool,
    pub quiet: bool,
}

/// 設定ファイルとコマンドライン引数から最終的な設定を組み立てる
pub fn build_config(options: &ExtractOptions) -> Result<DefaultPipelineConfig> {
    let mut config = match &options.config {
        Some(path) => DefaultPipelineConfig::from_json_file(path)?,
        None => DefaultPipelineConfig::new(),
    };

    if let Some(log_dir) = &options.log_dir {
        config = config.with_log_dir(log_dir);
    }
    if let Some(output) = &options.output {
        config = config.with_output_dir(output);
    }

    config.validate()?;
    Ok(config)
}

/// すべてのログを処理し、成果物を書き出す
pub fn execute_extract(options: ExtractOptions) -> Result<PipelineRun> {
    let config = build_config(&options)?;
    let storage = LocalLogStorage::new();
    let reporter = if options.quiet {
        ConsoleReporter::quiet()
    } else {
        ConsoleReporter::new()
    };

    let sources = if options.discover {
        let log_dir = config.log_dir();
        if !log_dir.is_dir() {
            anyhow::bail!("Log directory does not exist: {}", log_dir.display());
        }

        // 探索中に読めなかったパスは報告だけして残りを処理する
        let discovery = storage.discover_logs(&log_dir)?;
        for skipped in &discovery.skipped {
            let error = ExtractionError::source_read(
                skipped.path.display().to_string(),
                anyhow::anyhow!(skipped.reason.clone()),
            );
            reporter.report_source_failed(&skipped.path, &error);
        }
        discovery.logs
    } else {
        resolve_sources(&config)
    };
    let writer = FileDatasetWriter::from_config(&config);

    if !options.quiet {
        println!("🔍 ベンチマークログの抽出開始");
        println!("   - ログディレクトリ: {}", config.log_dir().display());
        println!("   - 出力ディレクトリ: {}", config.output_dir().display());
        println!("   - 対象ログ数: {}", sources.len());
    }

    let pipeline = Pipeline::new(storage, reporter, writer.clone());
    let run = pipeline.run(&sources)?;

    if !options.quiet {
        println!("📄 出力ファイル:");
        for path in [
            writer.entries_csv_path(),
            writer.entries_json_path(),
            writer.metrics_csv_path(),
            writer.metrics_json_path(),
        ] {
            println!("   - {}", path.display());
        }

        let best = best_configurations(&run.metrics);
        if !best.is_empty() {
            println!("🏆 最適プロセス数:");
            for item in best {
                println!(
                    "   - {} m={}: p={} (speedup {:.2}x)",
                    item.method, item.matrix_size, item.process_count, item.speedup
                );
            }
        }
    }

    Ok(run)
}

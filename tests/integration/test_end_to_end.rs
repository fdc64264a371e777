// エンドツーエンド統合テスト
use matmul_bench::{
    cli::commands::{execute_derive, execute_extract, execute_summary, ExtractOptions},
    core::{DataQualityWarning, Method, Source},
    services::{
        persistence::{read_entries_csv, read_entries_json, read_metrics_csv, read_metrics_json},
        DefaultPipelineConfig, FileDatasetWriter, NoOpReporter,
    },
    storage::local::LocalLogStorage,
    Pipeline,
};
use std::fs::{self, File};
use tempfile::TempDir;

#[path = "../fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

/// 元のディレクトリ構成（reports/logs）を再現する
fn setup_logs(base: &std::path::Path) -> DefaultPipelineConfig {
    let log_dir = base.join("logs");
    write_log(&log_dir, "strassen_comprehensive.log", COMPREHENSIVE_LOG);
    write_log(&log_dir, "extended_scalability.log", EXTENDED_LOG);

    DefaultPipelineConfig::new()
        .with_log_dir(&log_dir)
        .with_output_dir(base.join("data"))
}

#[test]
fn test_full_pipeline_with_default_layout() {
    let temp_dir = TempDir::new().unwrap();
    let config = setup_logs(temp_dir.path());
    let writer = FileDatasetWriter::from_config(&config);

    let pipeline = Pipeline::new(LocalLogStorage::new(), NoOpReporter::new(), writer.clone());
    let run = pipeline.run_with_config(&config).unwrap();

    // 1 original + 4 extended のうち、存在するのは2つ
    assert_eq!(run.summary.sources.len(), 5);
    assert_eq!(run.summary.missing_sources(), 3);
    assert_eq!(run.summary.parsed_entries, 7);
    assert_eq!(run.entries.len(), 6);

    let row_256 = run
        .entries
        .iter()
        .find(|e| e.key() == (256, 10, Method::ParallelRow))
        .unwrap();
    assert_eq!(row_256.time_microseconds, 180);
    assert_eq!(row_256.source, Source::Extended);

    assert_eq!(run.metrics.len(), 3);
    assert_eq!(
        run.warnings,
        vec![DataQualityWarning::MissingBaseline {
            matrix_size: 1024,
            process_count: 16,
            method: Method::ParallelElement,
        }]
    );

    for path in [
        writer.entries_csv_path(),
        writer.entries_json_path(),
        writer.metrics_csv_path(),
        writer.metrics_json_path(),
    ] {
        assert!(path.exists(), "{} should exist", path.display());
    }
}

#[test]
fn test_artifacts_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config = setup_logs(temp_dir.path());
    let writer = FileDatasetWriter::from_config(&config);

    let pipeline = Pipeline::new(LocalLogStorage::new(), NoOpReporter::new(), writer.clone());
    let run = pipeline.run_with_config(&config).unwrap();

    let csv_entries = read_entries_csv(
        File::open(writer.entries_csv_path()).unwrap(),
        "entries.csv",
        Source::Original,
    )
    .unwrap();
    assert_eq!(sorted_tuples(&csv_entries), sorted_tuples(&run.entries));

    // JSONは出所まで含めて同じ集合になる
    let mut json_entries =
        read_entries_json(File::open(writer.entries_json_path()).unwrap(), "entries.json")
            .unwrap();
    let mut expected = run.entries.clone();
    json_entries.sort_by_key(|e| e.key());
    expected.sort_by_key(|e| e.key());
    assert_eq!(json_entries, expected);

    let csv_metrics =
        read_metrics_csv(File::open(writer.metrics_csv_path()).unwrap(), "speedup.csv").unwrap();
    assert_eq!(csv_metrics, run.metrics);

    let json_metrics =
        read_metrics_json(File::open(writer.metrics_json_path()).unwrap(), "speedup.json")
            .unwrap();
    for metric in &run.metrics {
        let found = json_metrics
            .iter()
            .find(|m| (m.matrix_size, m.process_count, m.method) == (metric.matrix_size, metric.process_count, metric.method))
            .unwrap();
        assert_eq!(found.speedup.to_bits(), metric.speedup.to_bits());
        assert_eq!(found.time_microseconds, metric.time_microseconds);
    }
}

#[test]
fn test_speedup_example_values() {
    let temp_dir = TempDir::new().unwrap();
    let config = setup_logs(temp_dir.path());
    let pipeline = Pipeline::new(
        LocalLogStorage::new(),
        NoOpReporter::new(),
        FileDatasetWriter::from_config(&config),
    );
    let run = pipeline.run_with_config(&config).unwrap();

    let element = run
        .metrics
        .iter()
        .find(|m| m.method == Method::ParallelElement)
        .unwrap();
    assert_eq!(element.speedup, 4.0);
    assert_eq!(element.efficiency_percent(), 40.0);

    let row_512 = run
        .metrics
        .iter()
        .find(|m| m.matrix_size == 512)
        .unwrap();
    assert_eq!(row_512.speedup, 3.2);
    assert_eq!(row_512.process_count, 4);
}

#[test]
fn test_cli_commands_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");
    let output = temp_dir.path().join("out");
    write_log(&log_dir, "strassen_comprehensive.log", COMPREHENSIVE_LOG);
    write_log(&log_dir, "nested/extended_limit.log", EXTENDED_LOG);
    fs::write(log_dir.join("README.txt"), "not a log").unwrap();

    let run = execute_extract(ExtractOptions {
        log_dir: Some(log_dir),
        output: Some(output.clone()),
        discover: true,
        quiet: true,
        ..ExtractOptions::default()
    })
    .unwrap();

    // 探索モードでは見つかったログだけが対象
    assert_eq!(run.summary.sources.len(), 2);
    assert_eq!(run.summary.missing_sources(), 0);
    assert_eq!(run.entries.len(), 6);

    let entries_csv = output.join("extended_benchmark_data.csv");
    let derivation = execute_derive(&entries_csv, None, true).unwrap();
    assert_eq!(derivation.metrics, run.metrics);

    let summary = execute_summary(&output.join("extended_benchmark_data.json")).unwrap();
    assert_eq!(summary.total_records, 6);
    assert_eq!(summary.matrix_sizes, vec![256, 512, 1024]);
    assert_eq!(summary.extended_records, 2);
}

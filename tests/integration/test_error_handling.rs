// エラーハンドリング統合テスト
// 行単位の不正や欠損ファイルでは止まらず、成果物の不整合だけがエラーになることを確認する
use matmul_bench::{
    cli::commands::{execute_derive, execute_extract, load_entries, ExtractOptions},
    core::{error::ErrorSeverity, ExtractionError, Method, Source},
    parser::ContextCarryingParser,
    services::{
        persistence::{read_entries_csv, read_entries_json, read_metrics_csv},
        DefaultPipelineConfig, MemoryDatasetPersistence, NoOpReporter,
    },
    storage::local::LocalLogStorage,
    Pipeline,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[path = "../fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

#[test]
fn test_all_sources_missing_yields_empty_datasets() {
    let temp_dir = TempDir::new().unwrap();
    let config = DefaultPipelineConfig::new()
        .with_log_dir(temp_dir.path().join("nothing-here"))
        .with_output_dir(temp_dir.path().join("out"));

    let persistence = MemoryDatasetPersistence::new();
    let pipeline = Pipeline::new(LocalLogStorage::new(), NoOpReporter::new(), persistence.clone());
    let run = pipeline.run_with_config(&config).unwrap();

    assert_eq!(run.summary.missing_sources(), 5);
    assert!(run.entries.is_empty());
    assert!(run.metrics.is_empty());
    assert!(persistence.stored_entries().is_empty());
}

#[test]
fn test_extract_with_missing_logs_still_writes_headers() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out");

    execute_extract(ExtractOptions {
        log_dir: Some(temp_dir.path().join("logs")),
        output: Some(output.clone()),
        quiet: true,
        ..ExtractOptions::default()
    })
    .unwrap();

    let csv = fs::read_to_string(output.join("speedup_data.csv")).unwrap();
    assert_eq!(csv.trim(), "matrix_size,processes,time_us,method,speedup");
}

#[test]
fn test_malformed_lines_are_skipped() {
    let text = "\
>>> Matrix Size = 0
>>> Matrix Size = 99999999999
parallelRowMult: time=5 microseconds
>>> Matrix Size = 128
sequentialMult: time=-3 microseconds
sequentialMult: time=77 microseconds
n=128 p=0
parallelRowMult: p=99999999999, time=9 microseconds
parallelRowMult: time=12 microseconds
";
    let outcome = ContextCarryingParser::new(Source::Original).parse_str(text);

    // 不正なマーカーでは文脈が確立されず、有効な行だけが残る
    let tuples = sorted_tuples(&outcome.entries);
    assert_eq!(
        tuples,
        vec![
            (128, 1, Method::Sequential, 77),
            (128, 1, Method::ParallelRow, 12),
        ]
    );
    assert_eq!(outcome.non_record_lines(), 7);
}

#[test]
fn test_headless_log_yields_nothing() {
    let outcome = ContextCarryingParser::new(Source::Extended).parse_str(HEADLESS_LOG);
    assert!(outcome.entries.is_empty());
    assert_eq!(outcome.total_lines, 2);
}

#[test]
fn test_schema_mismatch_on_reordered_header() {
    let csv = "matrix_size,process_count,time_microseconds,method\n64,1,10,sequential\n";
    let error = read_entries_csv(csv.as_bytes(), "legacy.csv", Source::Original).unwrap_err();

    assert!(matches!(error, ExtractionError::SchemaMismatch { .. }));
    assert!(!error.is_recoverable());
    assert_eq!(error.severity(), ErrorSeverity::High);
}

#[test]
fn test_entries_csv_is_not_a_metrics_csv() {
    let csv = "matrix_size,processes,time_us,method\n64,1,10,sequential\n";
    let result = read_metrics_csv(csv.as_bytes(), "entries.csv");
    assert!(matches!(result, Err(ExtractionError::SchemaMismatch { .. })));
}

#[test]
fn test_unknown_method_in_artifact() {
    let csv = "matrix_size,processes,time_us,method\n64,1,10,quantum\n";
    match read_entries_csv(csv.as_bytes(), "bad.csv", Source::Original) {
        Err(ExtractionError::ArtifactParse { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected ArtifactParse, got {other:?}"),
    }
}

#[test]
fn test_future_json_schema_is_rejected() {
    let json = r#"{
        "schema_version": 7,
        "generated_at": "2030-01-01T00:00:00Z",
        "sequential": [],
        "parallel_row": [],
        "parallel_element": []
    }"#;
    let error = read_entries_json(json.as_bytes(), "future.json").unwrap_err();
    assert!(error.to_string().contains("schema_version 7"));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, r#"{"entries_stem": "same", "metrics_stem": "same"}"#).unwrap();

    let result = execute_extract(ExtractOptions {
        config: Some(config_path),
        quiet: true,
        ..ExtractOptions::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_load_entries_missing_file() {
    let result = load_entries(&PathBuf::from("/definitely/not/here.csv"));
    assert!(result.is_err());
}

#[test]
fn test_derive_rejects_entries_breaking_invariants() {
    let temp_dir = TempDir::new().unwrap();
    let entries = temp_dir.path().join("entries.csv");
    fs::write(
        &entries,
        "matrix_size,processes,time_us,method\n0,1,100,sequential\n0,0,50,parallel_row\n",
    )
    .unwrap();

    // 効率が無限大になるような行は読み込み時点で拒否される
    let error = execute_derive(&entries, None, false).unwrap_err();
    assert!(error.to_string().contains("matrix_size"), "{error}");

    match read_entries_csv(fs::File::open(&entries).unwrap(), "entries.csv", Source::Original) {
        Err(ExtractionError::ArtifactParse { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected ArtifactParse, got {other:?}"),
    }
}

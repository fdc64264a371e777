// パイプラインの抽象化インターフェース定義
// 設定・進捗報告・成果物の永続化をトレイトで切り離し、テストではモックに差し替える

use super::error::ExtractionError;
use super::types::{DataQualityWarning, DerivedMetric, Entry, PipelineSummary, Source};
use anyhow::Result;
use mockall::automock;
use std::path::{Path, PathBuf};

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// ログファイルの基準ディレクトリ
    fn log_dir(&self) -> PathBuf;

    /// `original` として扱うログ（`log_dir` からの相対パス）
    fn original_logs(&self) -> Vec<PathBuf>;

    /// `extended` として扱うログ（`log_dir` からの相対パス）
    fn extended_logs(&self) -> Vec<PathBuf>;

    /// 成果物の出力ディレクトリ
    fn output_dir(&self) -> PathBuf;

    /// 計測レコード成果物のファイル名（拡張子なし）
    fn entries_stem(&self) -> String;

    /// 派生メトリクス成果物のファイル名（拡張子なし）
    fn metrics_stem(&self) -> String;
}

/// 設定から読み込むソースを優先度の低い順に並べて返す
pub fn resolve_sources<C: PipelineConfig + ?Sized>(config: &C) -> Vec<(PathBuf, Source)> {
    let dir = config.log_dir();
    let original = config
        .original_logs()
        .into_iter()
        .map(|p| (dir.join(p), Source::Original));
    let extended = config
        .extended_logs()
        .into_iter()
        .map(|p| (dir.join(p), Source::Extended));
    original.chain(extended).collect()
}

impl PipelineConfig for Box<dyn PipelineConfig> {
    fn log_dir(&self) -> PathBuf {
        self.as_ref().log_dir()
    }

    fn original_logs(&self) -> Vec<PathBuf> {
        self.as_ref().original_logs()
    }

    fn extended_logs(&self) -> Vec<PathBuf> {
        self.as_ref().extended_logs()
    }

    fn output_dir(&self) -> PathBuf {
        self.as_ref().output_dir()
    }

    fn entries_stem(&self) -> String {
        self.as_ref().entries_stem()
    }

    fn metrics_stem(&self) -> String {
        self.as_ref().metrics_stem()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
pub trait PipelineReporter: Send + Sync {
    /// ソースの読み込み開始
    fn report_source_started(&self, path: &Path, source: Source);

    /// ソースのパース完了
    fn report_source_parsed(&self, path: &Path, total_lines: usize, entries: usize);

    /// ソースが見つからない（空として扱う）
    fn report_missing_source(&self, path: &Path);

    /// ソースの読み込みに失敗した（空として扱い、処理は続行する）
    fn report_source_failed(&self, path: &Path, error: &ExtractionError);

    /// データ品質の警告
    fn report_warning(&self, warning: &DataQualityWarning);

    /// 処理完了時の報告
    fn report_completed(&self, summary: &PipelineSummary);
}

impl PipelineReporter for Box<dyn PipelineReporter> {
    fn report_source_started(&self, path: &Path, source: Source) {
        self.as_ref().report_source_started(path, source)
    }

    fn report_source_parsed(&self, path: &Path, total_lines: usize, entries: usize) {
        self.as_ref().report_source_parsed(path, total_lines, entries)
    }

    fn report_missing_source(&self, path: &Path) {
        self.as_ref().report_missing_source(path)
    }

    fn report_source_failed(&self, path: &Path, error: &ExtractionError) {
        self.as_ref().report_source_failed(path, error)
    }

    fn report_warning(&self, warning: &DataQualityWarning) {
        self.as_ref().report_warning(warning)
    }

    fn report_completed(&self, summary: &PipelineSummary) {
        self.as_ref().report_completed(summary)
    }
}

/// 成果物の永続化を抽象化するトレイト
#[automock]
pub trait DatasetPersistence: Send + Sync {
    /// マージ済みレコードの保存
    fn store_entries(&self, entries: &[Entry]) -> Result<()>;

    /// 派生メトリクスの保存
    fn store_metrics(&self, metrics: &[DerivedMetric]) -> Result<()>;
}

impl DatasetPersistence for Box<dyn DatasetPersistence> {
    fn store_entries(&self, entries: &[Entry]) -> Result<()> {
        self.as_ref().store_entries(entries)
    }

    fn store_metrics(&self, metrics: &[DerivedMetric]) -> Result<()> {
        self.as_ref().store_metrics(metrics)
    }
}

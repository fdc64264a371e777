pub mod cli;
pub mod core;
pub mod merge;
pub mod metrics;
pub mod parser;
pub mod services;
pub mod storage;

use crate::core::{
    resolve_sources, DataQualityWarning, DatasetPersistence, DerivedMetric, Entry,
    ExtractionError, ExtractionResult, PipelineConfig, PipelineReporter, PipelineSummary, Source,
    SourceReport,
};
use crate::merge::RecordMerger;
use crate::metrics::{derive_metrics, Derivation};
use crate::parser::ContextCarryingParser;
use crate::storage::LogStorage;
use std::path::{Path, PathBuf};

/// 1回の実行で得られたデータ一式
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineRun {
    /// マージ済みレコード（キーの初出順）
    pub entries: Vec<Entry>,
    pub metrics: Vec<DerivedMetric>,
    pub warnings: Vec<DataQualityWarning>,
    pub summary: PipelineSummary,
}

// DIコンテナの役割を果たすジェネリックなPipeline構造体
// ログの読み出し・進捗報告・成果物の保存をそれぞれ差し替えられる
pub struct Pipeline<S, R, P>
where
    S: LogStorage,
    R: PipelineReporter,
    P: DatasetPersistence,
{
    pub storage: S,
    pub reporter: R,
    pub persistence: P,
}

impl<S, R, P> Pipeline<S, R, P>
where
    S: LogStorage,
    R: PipelineReporter,
    P: DatasetPersistence,
{
    /// 新しいPipelineインスタンスを作成（コンストラクタインジェクション）
    pub fn new(storage: S, reporter: R, persistence: P) -> Self {
        Self {
            storage,
            reporter,
            persistence,
        }
    }

    /// 設定に書かれたソースをすべて処理する
    pub fn run_with_config<C: PipelineConfig + ?Sized>(
        &self,
        config: &C,
    ) -> ExtractionResult<PipelineRun> {
        self.run(&resolve_sources(config))
    }

    /// パース → マージ → 導出 → 保存
    ///
    /// 見つからないソースや読めないソースは空として扱い、実行は止めない。
    /// 保存に失敗した場合だけエラーを返す。
    pub fn run(&self, sources: &[(PathBuf, Source)]) -> ExtractionResult<PipelineRun> {
        let mut reports = Vec::with_capacity(sources.len());
        let mut merger = RecordMerger::new();
        let mut parsed_entries = 0;

        for (path, source) in sources {
            let (report, entries) = self.parse_source(path, *source)?;
            parsed_entries += entries.len();
            merger.extend(entries);
            reports.push(report);
        }

        let entries = merger.into_entries();
        let Derivation { metrics, warnings } = derive_metrics(&entries);
        for warning in &warnings {
            self.reporter.report_warning(warning);
        }

        self.persistence
            .store_entries(&entries)
            .map_err(|e| ExtractionError::persistence("entries", e))?;
        self.persistence
            .store_metrics(&metrics)
            .map_err(|e| ExtractionError::persistence("metrics", e))?;

        let summary = PipelineSummary {
            sources: reports,
            parsed_entries,
            merged_entries: entries.len(),
            derived_metrics: metrics.len(),
            warnings: warnings.len(),
        };
        self.reporter.report_completed(&summary);

        Ok(PipelineRun {
            entries,
            metrics,
            warnings,
            summary,
        })
    }

    /// 1ソース分を読み込んでパースする
    pub fn parse_source(
        &self,
        path: &Path,
        source: Source,
    ) -> ExtractionResult<(SourceReport, Vec<Entry>)> {
        self.reporter.report_source_started(path, source);

        let mut report = SourceReport {
            label: path.display().to_string(),
            source,
            ..SourceReport::default()
        };

        let text = match self.read_source(path) {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.reporter.report_missing_source(path);
                return Ok((report, Vec::new()));
            }
            Err(error) if error.is_recoverable() => {
                self.reporter.report_source_failed(path, &error);
                return Ok((report, Vec::new()));
            }
            Err(error) => return Err(error),
        };

        // ソースごとに新しい状態から読み始める
        let outcome = ContextCarryingParser::new(source).parse_str(&text);
        self.reporter
            .report_source_parsed(path, outcome.total_lines, outcome.entries.len());

        report.found = true;
        report.total_lines = outcome.total_lines;
        report.entries = outcome.entries.len();
        Ok((report, outcome.entries))
    }

    fn read_source(&self, path: &Path) -> ExtractionResult<Option<String>> {
        self.storage
            .read_log(path)
            .map_err(|e| ExtractionError::source_read(path.display().to_string(), e))
    }
}

// 進捗監視の具象実装

use crate::core::{DataQualityWarning, ExtractionError, PipelineReporter, PipelineSummary, Source};
use std::path::Path;

/// コンソール出力による進捗報告実装
///
/// 警告は `quiet` でも標準エラーに出す。
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl PipelineReporter for ConsoleReporter {
    fn report_source_started(&self, path: &Path, source: Source) {
        if !self.quiet {
            println!("📂 Processing {} ({source})...", path.display());
        }
    }

    fn report_source_parsed(&self, path: &Path, total_lines: usize, entries: usize) {
        if !self.quiet {
            println!(
                "   - {}: {entries} records from {total_lines} lines",
                path.display()
            );
        }
    }

    fn report_missing_source(&self, path: &Path) {
        if !self.quiet {
            println!("⏭️  Skipping missing log: {}", path.display());
        }
    }

    fn report_source_failed(&self, path: &Path, error: &ExtractionError) {
        eprintln!(
            "❌ [{}] Failed to read {}: {error}",
            error.severity().as_str(),
            path.display()
        );
        if let Some(suggestion) = error.context().suggestion {
            eprintln!("   💡 {suggestion}");
        }
    }

    fn report_warning(&self, warning: &DataQualityWarning) {
        eprintln!("⚠️  Data quality: {warning}");
    }

    fn report_completed(&self, summary: &PipelineSummary) {
        if !self.quiet {
            println!(
                "✅ Completed! Parsed: {}, Merged: {}, Derived: {}, Warnings: {}",
                summary.parsed_entries,
                summary.merged_entries,
                summary.derived_metrics,
                summary.warnings
            );
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineReporter for NoOpReporter {
    fn report_source_started(&self, _path: &Path, _source: Source) {}

    fn report_source_parsed(&self, _path: &Path, _total_lines: usize, _entries: usize) {}

    fn report_missing_source(&self, _path: &Path) {}

    fn report_source_failed(&self, _path: &Path, _error: &ExtractionError) {}

    fn report_warning(&self, _warning: &DataQualityWarning) {}

    fn report_completed(&self, _summary: &PipelineSummary) {}
}

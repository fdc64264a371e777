// 設定管理の具象実装

use crate::core::{ExtractionError, ExtractionResult, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// デフォルト設定実装
///
/// JSON設定ファイルから読み込む場合、省略したフィールドはデフォルト値になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultPipelineConfig {
    log_dir: PathBuf,
    original_logs: Vec<PathBuf>,
    extended_logs: Vec<PathBuf>,
    output_dir: PathBuf,
    entries_stem: String,
    metrics_stem: String,
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("reports/logs"),
            original_logs: vec![PathBuf::from("strassen_comprehensive.log")],
            extended_logs: [
                "extended_threshold.log",
                "extended_performance.log",
                "extended_scalability.log",
                "extended_limit.log",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            output_dir: PathBuf::from("reports/visualization/data"),
            entries_stem: "extended_benchmark_data".to_string(),
            metrics_stem: "speedup_data".to_string(),
        }
    }
}

impl DefaultPipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON設定ファイルから読み込み、検証する
    pub fn from_json_file(path: &Path) -> ExtractionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::configuration(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> ExtractionResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ExtractionError::configuration(format!("JSON解析エラー: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_original_logs<I, P>(mut self, logs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.original_logs = logs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extended_logs<I, P>(mut self, logs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extended_logs = logs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_entries_stem(mut self, stem: impl Into<String>) -> Self {
        self.entries_stem = stem.into();
        self
    }

    pub fn with_metrics_stem(mut self, stem: impl Into<String>) -> Self {
        self.metrics_stem = stem.into();
        self
    }

    /// 設定の妥当性をチェック
    pub fn validate(&self) -> ExtractionResult<()> {
        if self.entries_stem.trim().is_empty() {
            return Err(ExtractionError::validation("entries_stem", "空にはできません"));
        }
        if self.metrics_stem.trim().is_empty() {
            return Err(ExtractionError::validation("metrics_stem", "空にはできません"));
        }
        if self.entries_stem == self.metrics_stem {
            return Err(ExtractionError::validation(
                "metrics_stem",
                "entries_stem と同じ名前は使えません",
            ));
        }
        Ok(())
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn log_dir(&self) -> PathBuf {
        self.log_dir.clone()
    }

    fn original_logs(&self) -> Vec<PathBuf> {
        self.original_logs.clone()
    }

    fn extended_logs(&self) -> Vec<PathBuf> {
        self.extended_logs.clone()
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone()
    }

    fn entries_stem(&self) -> String {
        self.entries_stem.clone()
    }

    fn metrics_stem(&self) -> String {
        self.metrics_stem.clone()
    }
}

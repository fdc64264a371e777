// 成果物永続化の具象実装

use super::{keyed, tabular};
use crate::core::{DatasetPersistence, DerivedMetric, Entry, PipelineConfig};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// 出力ディレクトリにCSVとJSONの2種類の成果物を書き出す実装
///
/// `<stem>.csv` と `<stem>.json` を計測レコード用・派生メトリクス用にそれぞれ作る。
#[derive(Debug, Clone)]
pub struct FileDatasetWriter {
    output_dir: PathBuf,
    entries_stem: String,
    metrics_stem: String,
}

impl FileDatasetWriter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        entries_stem: impl Into<String>,
        metrics_stem: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            entries_stem: entries_stem.into(),
            metrics_stem: metrics_stem.into(),
        }
    }

    pub fn from_config<C: PipelineConfig + ?Sized>(config: &C) -> Self {
        Self::new(config.output_dir(), config.entries_stem(), config.metrics_stem())
    }

    pub fn entries_csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.entries_stem))
    }

    pub fn entries_json_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.entries_stem))
    }

    pub fn metrics_csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.metrics_stem))
    }

    pub fn metrics_json_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.metrics_stem))
    }

    fn create(&self, path: &Path) -> Result<BufWriter<File>> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.output_dir.display())
        })?;
        let file = File::create(path)
            .with_context(|| format!("Failed to create artifact: {}", path.display()))?;
        Ok(BufWriter::new(file))
    }
}

impl DatasetPersistence for FileDatasetWriter {
    fn store_entries(&self, entries: &[Entry]) -> Result<()> {
        let csv_path = self.entries_csv_path();
        tabular::write_entries_csv(self.create(&csv_path)?, entries)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;

        let json_path = self.entries_json_path();
        keyed::write_entries_json(self.create(&json_path)?, entries)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        Ok(())
    }

    fn store_metrics(&self, metrics: &[DerivedMetric]) -> Result<()> {
        let csv_path = self.metrics_csv_path();
        tabular::write_metrics_csv(self.create(&csv_path)?, metrics)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;

        let json_path = self.metrics_json_path();
        keyed::write_metrics_json(self.create(&json_path)?, metrics)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        Ok(())
    }
}

/// メモリ内保存の永続化実装（テスト用および開発用）
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetPersistence {
    entries: Arc<Mutex<Vec<Entry>>>,
    metrics: Arc<Mutex<Vec<DerivedMetric>>>,
}

impl MemoryDatasetPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されたレコードを取得
    pub fn stored_entries(&self) -> Vec<Entry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 保存されたメトリクスを取得
    pub fn stored_metrics(&self) -> Vec<DerivedMetric> {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DatasetPersistence for MemoryDatasetPersistence {
    fn store_entries(&self, entries: &[Entry]) -> Result<()> {
        let mut stored = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("ロック取得エラー: {e}"))?;
        *stored = entries.to_vec();
        Ok(())
    }

    fn store_metrics(&self, metrics: &[DerivedMetric]) -> Result<()> {
        let mut stored = self
            .metrics
            .lock()
            .map_err(|e| anyhow::anyhow!("ロック取得エラー: {e}"))?;
        *stored = metrics.to_vec();
        Ok(())
    }
}

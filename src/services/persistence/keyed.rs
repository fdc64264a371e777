// メソッド別にまとめたJSON成果物
//
// トップレベルに schema_version を持ち、互換性のない変更ではこれを上げる。

use crate::core::{DerivedMetric, Entry, ExtractionError, ExtractionResult, Method, Source};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub const SCHEMA_VERSION: u32 = 1;

/// メソッドごとにグループ化したデータセット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedDataset<R> {
    pub schema_version: u32,
    pub generated_at: String,
    pub sequential: Vec<R>,
    pub parallel_row: Vec<R>,
    pub parallel_element: Vec<R>,
}

impl<R> KeyedDataset<R> {
    fn group(rows: impl IntoIterator<Item = (Method, R)>) -> Self {
        let mut dataset = Self {
            schema_version: SCHEMA_VERSION,
            generated_at: chrono::Utc::now().to_rfc3339(),
            sequential: Vec::new(),
            parallel_row: Vec::new(),
            parallel_element: Vec::new(),
        };
        for (method, row) in rows {
            dataset.rows_mut(method).push(row);
        }
        dataset
    }

    fn rows_mut(&mut self, method: Method) -> &mut Vec<R> {
        match method {
            Method::Sequential => &mut self.sequential,
            Method::ParallelRow => &mut self.parallel_row,
            Method::ParallelElement => &mut self.parallel_element,
        }
    }

    /// `Method::ALL` の順にグループを展開する
    fn into_rows(self) -> impl Iterator<Item = (Method, R)> {
        let sequential = self.sequential.into_iter().map(|r| (Method::Sequential, r));
        let row = self.parallel_row.into_iter().map(|r| (Method::ParallelRow, r));
        let element = self
            .parallel_element
            .into_iter()
            .map(|r| (Method::ParallelElement, r));
        sequential.chain(row).chain(element)
    }

    pub fn len(&self) -> usize {
        self.sequential.len() + self.parallel_row.len() + self.parallel_element.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedEntryRow {
    pub matrix_size: u32,
    pub processes: u32,
    pub time_us: u64,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedMetricRow {
    pub matrix_size: u32,
    pub processes: u32,
    pub time_us: u64,
    pub speedup: f64,
}

pub fn write_entries_json<W: Write>(writer: W, entries: &[Entry]) -> ExtractionResult<()> {
    let dataset = KeyedDataset::group(entries.iter().map(|e| {
        (
            e.method,
            KeyedEntryRow {
                matrix_size: e.matrix_size,
                processes: e.process_count,
                time_us: e.time_microseconds,
                source: e.source,
            },
        )
    }));
    write_dataset(writer, &dataset, "entries (json)")
}

pub fn write_metrics_json<W: Write>(writer: W, metrics: &[DerivedMetric]) -> ExtractionResult<()> {
    let dataset = KeyedDataset::group(metrics.iter().map(|m| {
        (
            m.method,
            KeyedMetricRow {
                matrix_size: m.matrix_size,
                processes: m.process_count,
                time_us: m.time_microseconds,
                speedup: m.speedup,
            },
        )
    }));
    write_dataset(writer, &dataset, "metrics (json)")
}

fn write_dataset<W: Write, R: Serialize>(
    mut writer: W,
    dataset: &KeyedDataset<R>,
    artifact: &str,
) -> ExtractionResult<()> {
    serde_json::to_writer_pretty(&mut writer, dataset)
        .map_err(|e| ExtractionError::persistence(artifact, e.into()))?;
    writer
        .flush()
        .map_err(|e| ExtractionError::persistence(artifact, e.into()))
}

/// メソッド別JSONから計測レコードを読み戻す
///
/// 不正なレコードはグループ名つきで `ArtifactParse` になる。
pub fn read_entries_json<R: Read>(reader: R, artifact: &str) -> ExtractionResult<Vec<Entry>> {
    let dataset: KeyedDataset<KeyedEntryRow> = read_dataset(reader, artifact)?;
    dataset
        .into_rows()
        .map(|(method, row)| {
            let entry = Entry {
                matrix_size: row.matrix_size,
                process_count: row.processes,
                method,
                time_microseconds: row.time_us,
                source: row.source,
            };
            entry
                .check_invariants()
                .map(|()| entry)
                .map_err(|reason| invalid_row(artifact, method, reason))
        })
        .collect()
}

pub fn read_metrics_json<R: Read>(reader: R, artifact: &str) -> ExtractionResult<Vec<DerivedMetric>> {
    let dataset: KeyedDataset<KeyedMetricRow> = read_dataset(reader, artifact)?;
    dataset
        .into_rows()
        .map(|(method, row)| {
            let metric = DerivedMetric {
                matrix_size: row.matrix_size,
                process_count: row.processes,
                method,
                time_microseconds: row.time_us,
                speedup: row.speedup,
            };
            metric
                .check_invariants()
                .map(|()| metric)
                .map_err(|reason| invalid_row(artifact, method, reason))
        })
        .collect()
}

// JSONは値に変換済みのため行番号を持たない
fn invalid_row(artifact: &str, method: Method, reason: String) -> ExtractionError {
    ExtractionError::artifact_parse(artifact, 0, format!("{method}: {reason}"))
}

fn read_dataset<R, T>(reader: R, artifact: &str) -> ExtractionResult<KeyedDataset<T>>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let value: serde_json::Value = serde_json::from_reader(reader)
        .map_err(|e| ExtractionError::artifact_parse(artifact, e.line(), e.to_string()))?;

    // バージョンを先に確認し、未知のスキーマは中身を解釈しない
    let version = value.get("schema_version").and_then(serde_json::Value::as_u64);
    if version != Some(u64::from(SCHEMA_VERSION)) {
        return Err(ExtractionError::schema_mismatch(
            artifact,
            format!("schema_version {SCHEMA_VERSION}"),
            version.map_or_else(|| "none".to_string(), |v| format!("schema_version {v}")),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| ExtractionError::artifact_parse(artifact, 0, e.to_string()))
}

// 表形式の成果物（CSV）
//
// 列順は固定: matrix_size, processes, time_us, method[, speedup]
// speedup は丸めずに最短の往復可能な10進表現で書くため、読み戻すと同じ f64 になる。

use crate::core::{DerivedMetric, Entry, ExtractionError, ExtractionResult, Method, Source};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub const ENTRY_HEADER: [&str; 4] = ["matrix_size", "processes", "time_us", "method"];
pub const METRIC_HEADER: [&str; 5] = ["matrix_size", "processes", "time_us", "method", "speedup"];

#[derive(Debug, Serialize, Deserialize)]
struct EntryRow {
    matrix_size: u32,
    processes: u32,
    time_us: u64,
    method: Method,
}

#[derive(Debug, Serialize, Deserialize)]
struct MetricRow {
    matrix_size: u32,
    processes: u32,
    time_us: u64,
    method: Method,
    speedup: f64,
}

pub fn write_entries_csv<W: Write>(writer: W, entries: &[Entry]) -> ExtractionResult<()> {
    // 0件でもヘッダーだけは出力するため、ヘッダーは自前で書く
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let failed = |e: csv::Error| ExtractionError::persistence("entries (csv)", e.into());

    csv_writer.write_record(ENTRY_HEADER).map_err(failed)?;
    for entry in entries {
        csv_writer
            .serialize(EntryRow {
                matrix_size: entry.matrix_size,
                processes: entry.process_count,
                time_us: entry.time_microseconds,
                method: entry.method,
            })
            .map_err(failed)?;
    }
    csv_writer
        .flush()
        .map_err(|e| ExtractionError::persistence("entries (csv)", e.into()))
}

pub fn write_metrics_csv<W: Write>(writer: W, metrics: &[DerivedMetric]) -> ExtractionResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let failed = |e: csv::Error| ExtractionError::persistence("metrics (csv)", e.into());

    csv_writer.write_record(METRIC_HEADER).map_err(failed)?;
    for metric in metrics {
        csv_writer
            .serialize(MetricRow {
                matrix_size: metric.matrix_size,
                processes: metric.process_count,
                time_us: metric.time_microseconds,
                method: metric.method,
                speedup: metric.speedup,
            })
            .map_err(failed)?;
    }
    csv_writer
        .flush()
        .map_err(|e| ExtractionError::persistence("metrics (csv)", e.into()))
}

/// 表形式の計測レコードを読み戻す
///
/// CSVは出所を持たないため、読み戻したレコードには `source` を付ける。
/// サイズやプロセス数が不正な行は、その行番号つきで `ArtifactParse` になる。
pub fn read_entries_csv<R: Read>(
    reader: R,
    artifact: &str,
    source: Source,
) -> ExtractionResult<Vec<Entry>> {
    let rows: Vec<(usize, EntryRow)> = read_rows(reader, artifact, &ENTRY_HEADER)?;
    rows.into_iter()
        .map(|(line, row)| {
            let entry = Entry {
                matrix_size: row.matrix_size,
                process_count: row.processes,
                method: row.method,
                time_microseconds: row.time_us,
                source,
            };
            entry
                .check_invariants()
                .map(|()| entry)
                .map_err(|reason| ExtractionError::artifact_parse(artifact, line, reason))
        })
        .collect()
}

pub fn read_metrics_csv<R: Read>(reader: R, artifact: &str) -> ExtractionResult<Vec<DerivedMetric>> {
    let rows: Vec<(usize, MetricRow)> = read_rows(reader, artifact, &METRIC_HEADER)?;
    rows.into_iter()
        .map(|(line, row)| {
            let metric = DerivedMetric {
                matrix_size: row.matrix_size,
                process_count: row.processes,
                method: row.method,
                time_microseconds: row.time_us,
                speedup: row.speedup,
            };
            metric
                .check_invariants()
                .map(|()| metric)
                .map_err(|reason| ExtractionError::artifact_parse(artifact, line, reason))
        })
        .collect()
}

/// ヘッダーを検証し、各行を行番号と一緒に返す
fn read_rows<R, T>(reader: R, artifact: &str, expected: &[&str]) -> ExtractionResult<Vec<(usize, T)>>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ExtractionError::artifact_parse(artifact, 1, e.to_string()))?
        .clone();
    if headers.iter().ne(expected.iter().copied()) {
        return Err(ExtractionError::schema_mismatch(
            artifact,
            expected.join(","),
            headers.iter().collect::<Vec<_>>().join(","),
        ));
    }

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(index + 2, |p| p.line() as usize);
            ExtractionError::artifact_parse(artifact, line, e.to_string())
        })?;
        let line = record.position().map_or(index + 2, |p| p.line() as usize);
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| ExtractionError::artifact_parse(artifact, line, e.to_string()))?;
        rows.push((line, row));
    }
    Ok(rows)
}

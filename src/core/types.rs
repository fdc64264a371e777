// 計測レコードと派生メトリクスのデータ型定義

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 行列積の実装方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Sequential,
    ParallelRow,
    ParallelElement,
}

impl Method {
    /// 1行に複数のメソッド名が含まれる場合の判定順（先頭が最優先）
    pub const MATCH_PRIORITY: [Method; 3] = [
        Method::ParallelElement,
        Method::ParallelRow,
        Method::Sequential,
    ];

    /// 成果物に出力する際のグループ順
    pub const ALL: [Method; 3] = [
        Method::Sequential,
        Method::ParallelRow,
        Method::ParallelElement,
    ];

    /// ログ行に現れるメソッド名トークン
    pub const fn log_token(&self) -> &'static str {
        match self {
            Self::Sequential => "sequentialMult",
            Self::ParallelRow => "parallelRowMult",
            Self::ParallelElement => "parallelElementMult",
        }
    }

    /// 成果物で使うラベル
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::ParallelRow => "parallel_row",
            Self::ParallelElement => "parallel_element",
        }
    }

    pub const fn is_parallel(&self) -> bool {
        !matches!(self, Self::Sequential)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| format!("unknown method: {s}"))
    }
}

/// レコードの出所。マージ時の優先度としてのみ使う
///
/// `Ord` の順序がそのまま優先度になる（`Extended` > `Original`）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Original,
    Extended,
}

impl Source {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "extended" => Ok(Self::Extended),
            other => Err(format!("unknown source: {other}")),
        }
    }
}

/// マージの同一性キー `(matrix_size, process_count, method)`
pub type EntryKey = (u32, u32, Method);

/// 1件のタイミング計測
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub matrix_size: u32,
    pub process_count: u32,
    pub method: Method,
    pub time_microseconds: u64,
    pub source: Source,
}

impl Entry {
    pub fn key(&self) -> EntryKey {
        (self.matrix_size, self.process_count, self.method)
    }

    pub fn time_seconds(&self) -> f64 {
        self.time_microseconds as f64 / 1_000_000.0
    }

    /// サイズとプロセス数が正で、逐次版なら `process_count == 1` であること
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.matrix_size == 0 {
            return Err("matrix_size must be positive".to_string());
        }
        if self.process_count == 0 {
            return Err("process_count must be positive".to_string());
        }
        if self.method == Method::Sequential && self.process_count != 1 {
            return Err(format!(
                "sequential entry must have process_count 1, got {}",
                self.process_count
            ));
        }
        Ok(())
    }
}

/// 逐次版と並列版のペアから計算したメトリクス
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub matrix_size: u32,
    pub process_count: u32,
    pub method: Method,
    /// 並列版の実行時間
    pub time_microseconds: u64,
    pub speedup: f64,
}

impl DerivedMetric {
    /// 並列版のみ、サイズ・プロセス数・実行時間が正で、speedup が正の有限値であること
    pub fn check_invariants(&self) -> Result<(), String> {
        if !self.method.is_parallel() {
            return Err(format!("derived metric must be parallel, got {}", self.method));
        }
        if self.matrix_size == 0 {
            return Err("matrix_size must be positive".to_string());
        }
        if self.process_count == 0 {
            return Err("process_count must be positive".to_string());
        }
        if self.time_microseconds == 0 {
            return Err("time_us must be positive".to_string());
        }
        if !(self.speedup.is_finite() && self.speedup > 0.0) {
            return Err(format!("speedup must be positive and finite, got {}", self.speedup));
        }
        Ok(())
    }

    /// 効率（%）: speedup / process_count × 100
    pub fn efficiency_percent(&self) -> f64 {
        self.speedup / f64::from(self.process_count) * 100.0
    }

    /// 1プロセスあたりの実行時間（マイクロ秒）
    pub fn time_per_process_us(&self) -> f64 {
        self.time_microseconds as f64 / f64::from(self.process_count)
    }

    /// 概算スループット（n³ 演算 / 秒）
    pub fn throughput_ops_per_sec(&self) -> f64 {
        let n = f64::from(self.matrix_size);
        n * n * n / (self.time_microseconds as f64 / 1_000_000.0)
    }
}

/// 導出時に検出したデータ品質上の問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataQualityWarning {
    /// 同じ行列サイズの逐次版が複数ある（最初の値を採用）
    DuplicateSequential {
        matrix_size: u32,
        kept_us: u64,
        ignored_us: u64,
    },
    /// 対応する逐次版が存在しない
    MissingBaseline {
        matrix_size: u32,
        process_count: u32,
        method: Method,
    },
    /// どちらかの実行時間が0
    NonPositiveTime {
        matrix_size: u32,
        process_count: u32,
        method: Method,
    },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSequential {
                matrix_size,
                kept_us,
                ignored_us,
            } => write!(
                f,
                "multiple sequential times for m={matrix_size}: kept {kept_us}us, ignored {ignored_us}us"
            ),
            Self::MissingBaseline {
                matrix_size,
                process_count,
                method,
            } => write!(
                f,
                "no sequential baseline for {method} m={matrix_size} p={process_count}"
            ),
            Self::NonPositiveTime {
                matrix_size,
                process_count,
                method,
            } => write!(
                f,
                "non-positive time for {method} m={matrix_size} p={process_count}"
            ),
        }
    }
}

/// 1ソース分のパース結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceReport {
    pub label: String,
    pub source: Source,
    pub found: bool,
    pub total_lines: usize,
    pub entries: usize,
}

/// パイプライン全体のサマリー
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineSummary {
    pub sources: Vec<SourceReport>,
    pub parsed_entries: usize,
    pub merged_entries: usize,
    pub derived_metrics: usize,
    pub warnings: usize,
}

impl PipelineSummary {
    pub fn missing_sources(&self) -> usize {
        self.sources.iter().filter(|s| !s.found).count()
    }
}

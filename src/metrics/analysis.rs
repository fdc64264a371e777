// データセットの集計と、行列サイズごとの最良構成の抽出

use crate::core::{DerivedMetric, Entry, Method, Source};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// マージ済みデータセットの概要
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    /// 重複なし・昇順
    pub matrix_sizes: Vec<u32>,
    pub methods: Vec<Method>,
    pub original_records: usize,
    pub extended_records: usize,
}

impl DatasetSummary {
    pub fn min_size(&self) -> Option<u32> {
        self.matrix_sizes.first().copied()
    }

    pub fn max_size(&self) -> Option<u32> {
        self.matrix_sizes.last().copied()
    }
}

pub fn summarize(entries: &[Entry]) -> DatasetSummary {
    let sizes: BTreeSet<u32> = entries.iter().map(|e| e.matrix_size).collect();
    let methods: BTreeSet<Method> = entries.iter().map(|e| e.method).collect();
    let count = |source: Source| entries.iter().filter(|e| e.source == source).count();

    DatasetSummary {
        total_records: entries.len(),
        matrix_sizes: sizes.into_iter().collect(),
        methods: methods.into_iter().collect(),
        original_records: count(Source::Original),
        extended_records: count(Source::Extended),
    }
}

/// ある行列サイズ・方式で speedup が最大になるプロセス数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestConfiguration {
    pub matrix_size: u32,
    pub method: Method,
    pub process_count: u32,
    pub speedup: f64,
}

/// `(method, matrix_size)` ごとの最良構成を方式・サイズ順に返す
///
/// speedup が同じならプロセス数の少ない方を選ぶ。
pub fn best_configurations(metrics: &[DerivedMetric]) -> Vec<BestConfiguration> {
    let mut best: BTreeMap<(Method, u32), BestConfiguration> = BTreeMap::new();

    for metric in metrics {
        let candidate = BestConfiguration {
            matrix_size: metric.matrix_size,
            method: metric.method,
            process_count: metric.process_count,
            speedup: metric.speedup,
        };
        best.entry((metric.method, metric.matrix_size))
            .and_modify(|current| {
                let better = candidate.speedup > current.speedup
                    || (candidate.speedup == current.speedup
                        && candidate.process_count < current.process_count);
                if better {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    best.into_values().collect()
}

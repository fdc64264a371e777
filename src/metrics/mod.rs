// 逐次版と並列版のペアから speedup を導出する

pub mod analysis;
pub mod series;

pub use analysis::{best_configurations, summarize, BestConfiguration, DatasetSummary};
pub use series::ZeroFilledSeries;

use crate::core::{DataQualityWarning, DerivedMetric, Entry, Method};
use std::collections::HashMap;

/// 導出結果と、その過程で見つかった警告
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Derivation {
    pub metrics: Vec<DerivedMetric>,
    pub warnings: Vec<DataQualityWarning>,
}

/// 行列サイズ → 逐次版の実行時間
///
/// 同じサイズが複数ある場合は最初の値を採用し、残りは警告として返す。
pub fn sequential_baselines(entries: &[Entry]) -> (HashMap<u32, u64>, Vec<DataQualityWarning>) {
    let mut baselines = HashMap::new();
    let mut warnings = Vec::new();

    for entry in entries.iter().filter(|e| e.method == Method::Sequential) {
        match baselines.get(&entry.matrix_size) {
            Some(&kept_us) => warnings.push(DataQualityWarning::DuplicateSequential {
                matrix_size: entry.matrix_size,
                kept_us,
                ignored_us: entry.time_microseconds,
            }),
            None => {
                baselines.insert(entry.matrix_size, entry.time_microseconds);
            }
        }
    }

    (baselines, warnings)
}

/// マージ済みレコードから派生メトリクスを計算する
///
/// 両方の時間が正のペアだけを出力する。条件を満たさないものは0で埋めずに除外する。
pub fn derive_metrics(entries: &[Entry]) -> Derivation {
    let (baselines, mut warnings) = sequential_baselines(entries);
    let mut metrics = Vec::new();

    for entry in entries.iter().filter(|e| e.method.is_parallel()) {
        let Some(&sequential_us) = baselines.get(&entry.matrix_size) else {
            warnings.push(DataQualityWarning::MissingBaseline {
                matrix_size: entry.matrix_size,
                process_count: entry.process_count,
                method: entry.method,
            });
            continue;
        };

        if sequential_us == 0 || entry.time_microseconds == 0 {
            warnings.push(DataQualityWarning::NonPositiveTime {
                matrix_size: entry.matrix_size,
                process_count: entry.process_count,
                method: entry.method,
            });
            continue;
        }

        metrics.push(DerivedMetric {
            matrix_size: entry.matrix_size,
            process_count: entry.process_count,
            method: entry.method,
            time_microseconds: entry.time_microseconds,
            speedup: sequential_us as f64 / entry.time_microseconds as f64,
        });
    }

    Derivation { metrics, warnings }
}

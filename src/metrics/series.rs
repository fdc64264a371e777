// グラフ描画向けの系列
// 欠損点を0で埋めるのはこの型だけの方針で、正規の成果物には混ぜない

use crate::core::{DerivedMetric, Method};

/// 行列サイズ軸に揃えた値の列（欠損は0.0）
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroFilledSeries {
    pub method: Method,
    pub process_count: u32,
    pub axis: Vec<u32>,
    pub values: Vec<f64>,
}

impl ZeroFilledSeries {
    fn build<F>(
        metrics: &[DerivedMetric],
        method: Method,
        process_count: u32,
        axis: &[u32],
        value: F,
    ) -> Self
    where
        F: Fn(&DerivedMetric) -> f64,
    {
        let values = axis
            .iter()
            .map(|size| {
                metrics
                    .iter()
                    .find(|m| {
                        m.method == method
                            && m.process_count == process_count
                            && m.matrix_size == *size
                    })
                    .map_or(0.0, &value)
            })
            .collect();

        Self {
            method,
            process_count,
            axis: axis.to_vec(),
            values,
        }
    }

    pub fn speedup(
        metrics: &[DerivedMetric],
        method: Method,
        process_count: u32,
        axis: &[u32],
    ) -> Self {
        Self::build(metrics, method, process_count, axis, |m| m.speedup)
    }

    pub fn efficiency(
        metrics: &[DerivedMetric],
        method: Method,
        process_count: u32,
        axis: &[u32],
    ) -> Self {
        Self::build(metrics, method, process_count, axis, DerivedMetric::efficiency_percent)
    }

    pub fn time_per_process(
        metrics: &[DerivedMetric],
        method: Method,
        process_count: u32,
        axis: &[u32],
    ) -> Self {
        Self::build(metrics, method, process_count, axis, DerivedMetric::time_per_process_us)
    }

    /// 実データのある点の数
    pub fn present_points(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }
}

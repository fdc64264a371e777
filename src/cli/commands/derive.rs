use super::load_entries;
use crate::core::Method;
use crate::metrics::{derive_metrics, Derivation, ZeroFilledSeries};
use crate::services::persistence::write_metrics_csv;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// 計測レコードから派生メトリクスを計算して表示する
pub fn execute_derive(entries: &Path, output: Option<&Path>, series: bool) -> Result<Derivation> {
    let records = load_entries(entries)?;
    let derivation = derive_metrics(&records);

    println!(
        "{:>6} {:<17} {:>5} {:>12} {:>10} {:>11}",
        "size", "method", "procs", "time_us", "speedup", "efficiency"
    );
    for metric in &derivation.metrics {
        println!(
            "{:>6} {:<17} {:>5} {:>12} {:>10.3} {:>10.1}%",
            metric.matrix_size,
            metric.method,
            metric.process_count,
            metric.time_microseconds,
            metric.speedup,
            metric.efficiency_percent()
        );
    }

    for warning in &derivation.warnings {
        eprintln!("⚠️  Data quality: {warning}");
    }

    if series {
        for chart in speedup_series(&derivation) {
            let values: Vec<String> = chart.values.iter().map(|v| format!("{v:.3}")).collect();
            println!(
                "📈 {} p={}: [{}]",
                chart.method,
                chart.process_count,
                values.join(", ")
            );
        }
    }

    if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_metrics_csv(BufWriter::new(file), &derivation.metrics)?;
        println!("📄 結果は {} に保存されました", path.display());
    }

    Ok(derivation)
}

/// 方式・プロセス数ごとに、全行列サイズを軸とした speedup 系列を作る
pub fn speedup_series(derivation: &Derivation) -> Vec<ZeroFilledSeries> {
    let axis: Vec<u32> = derivation
        .metrics
        .iter()
        .map(|m| m.matrix_size)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let pairs: BTreeSet<(Method, u32)> = derivation
        .metrics
        .iter()
        .map(|m| (m.method, m.process_count))
        .collect();

    pairs
        .into_iter()
        .map(|(method, process_count)| {
            ZeroFilledSeries::speedup(&derivation.metrics, method, process_count, &axis)
        })
        .collect()
}

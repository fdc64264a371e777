use super::load_entries;
use crate::metrics::{summarize, DatasetSummary};
use anyhow::Result;
use std::path::Path;

/// データセットの概要を表示する
pub fn execute_summary(entries: &Path) -> Result<DatasetSummary> {
    let records = load_entries(entries)?;
    let summary = summarize(&records);

    println!("📊 データセット概要: {}", entries.display());
    println!("   - 総レコード数: {}", summary.total_records);
    match (summary.min_size(), summary.max_size()) {
        (Some(min), Some(max)) => println!(
            "   - 行列サイズ: {} 種類 ({min} - {max})",
            summary.matrix_sizes.len()
        ),
        _ => println!("   - 行列サイズ: なし"),
    }
    let methods: Vec<&str> = summary.methods.iter().map(|m| m.as_str()).collect();
    println!("   - 方式: {}", methods.join(", "));
    println!(
        "   - 出所: original {}, extended {}",
        summary.original_records, summary.extended_records
    );

    Ok(summary)
}

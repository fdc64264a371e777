// 成果物の永続化機能
// 表形式（CSV）とメソッド別にまとめたJSONの書き出し・読み戻し

pub mod implementations;
pub mod keyed;
pub mod tabular;

// 公開API
pub use implementations::{FileDatasetWriter, MemoryDatasetPersistence};
pub use keyed::{
    read_entries_json, read_metrics_json, write_entries_json, write_metrics_json, KeyedDataset,
    SCHEMA_VERSION,
};
pub use tabular::{
    read_entries_csv, read_metrics_csv, write_entries_csv, write_metrics_csv, ENTRY_HEADER,
    METRIC_HEADER,
};

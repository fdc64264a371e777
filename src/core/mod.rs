// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ExtractionError, ExtractionResult};
pub use traits::{resolve_sources, DatasetPersistence, PipelineConfig, PipelineReporter};
pub use types::{
    DataQualityWarning, DerivedMetric, Entry, EntryKey, Method, PipelineSummary, Source,
    SourceReport,
};

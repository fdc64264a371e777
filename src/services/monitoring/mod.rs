// 進捗監視機能
// ソースごとの進捗、データ品質の警告、完了通知

pub mod implementations;

// 公開API
pub use implementations::{ConsoleReporter, NoOpReporter};

use anyhow::Result;
use mockall::automock;
use std::path::Path;

pub mod local;

/// ログの読み出し元を抽象化するトレイト
#[automock]
pub trait LogStorage: Send + Sync {
    /// ログ全体を読み込む。存在しなければ `Ok(None)`
    fn read_log(&self, path: &Path) -> Result<Option<String>>;
}

// LogStorage for Box<dyn LogStorage>
impl LogStorage for Box<dyn LogStorage> {
    fn read_log(&self, path: &Path) -> Result<Option<String>> {
        self.as_ref().read_log(path)
    }
}

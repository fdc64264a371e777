use super::LogStorage;
use crate::core::Source;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 探索で見つかったログと、読めずに飛ばしたパス
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogDiscovery {
    pub logs: Vec<(PathBuf, Source)>,
    pub skipped: Vec<SkippedPath>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// ローカルファイルシステム用のログストレージ
#[derive(Debug, Clone, Default)]
pub struct LocalLogStorage;

impl LocalLogStorage {
    pub fn new() -> Self {
        Self
    }

    /// ディレクトリ以下の `*.log` を再帰的に探し、ファイル名で出所を判定する
    ///
    /// `extended` で始まるファイルは `Source::Extended`、それ以外は `Source::Original`。
    /// 結果はパス順に並べる。シンボリックリンクは辿る。
    /// 途中で読めないエントリは `skipped` に積んで探索を続け、
    /// 起点のディレクトリ自体が読めない場合だけエラーを返す。
    pub fn discover_logs(&self, directory: &Path) -> Result<LogDiscovery> {
        let mut discovery = LogDiscovery::default();

        for entry in WalkDir::new(directory).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => {
                    return Err(error).with_context(|| {
                        format!("Failed to walk directory: {}", directory.display())
                    });
                }
                Err(error) => {
                    let path = error.path().unwrap_or(directory).to_path_buf();
                    discovery.skipped.push(SkippedPath {
                        path,
                        reason: error.to_string(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() || !Self::is_log_file(entry.path()) {
                continue;
            }

            let source = if Self::is_extended_log(entry.path()) {
                Source::Extended
            } else {
                Source::Original
            };
            discovery.logs.push((entry.path().to_path_buf(), source));
        }

        Ok(discovery)
    }

    fn is_log_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("log"))
    }

    fn is_extended_log(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("extended"))
    }
}

impl LogStorage for LocalLogStorage {
    fn read_log(&self, path: &Path) -> Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }

        // 非UTF-8のバイトが混じっていても行単位で読み進められるようにする
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read log: {}", path.display()))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

pub mod derive;
pub mod extract;
pub mod parse;
pub mod summary;

pub use derive::*;
pub use extract::*;
pub use parse::*;
pub use summary::*;

use crate::core::{Entry, Source};
use crate::services::persistence::{read_entries_csv, read_entries_json};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// `extract` が書いた計測レコードを拡張子で判別して読み込む
///
/// CSVには出所の列が無いため、すべて `original` として読む。
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    if !path.exists() {
        anyhow::bail!("Entries file does not exist: {}", path.display());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let artifact = path.display().to_string();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let entries = if is_json {
        read_entries_json(reader, &artifact)?
    } else {
        read_entries_csv(reader, &artifact, Source::Original)?
    };
    Ok(entries)
}

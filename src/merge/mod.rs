// 複数ソースのレコードを優先度付きで1つの集合にまとめる

use crate::core::{Entry, EntryKey};
use std::collections::HashMap;

/// キー `(matrix_size, process_count, method)` ごとに1件だけ残すマージャー
///
/// 同じキーが再び現れたとき、新しいレコードの優先度が既存以上なら置き換える。
/// 同じ優先度なら後から来たものが勝つ。出力順は各キーが最初に現れた順。
#[derive(Debug, Clone, Default)]
pub struct RecordMerger {
    index: HashMap<EntryKey, usize>,
    entries: Vec<Entry>,
    replaced: usize,
    discarded: usize,
}

impl RecordMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件を取り込む
    pub fn push(&mut self, entry: Entry) {
        match self.index.get(&entry.key()) {
            Some(&slot) => {
                if entry.source >= self.entries[slot].source {
                    self.entries[slot] = entry;
                    self.replaced += 1;
                } else {
                    self.discarded += 1;
                }
            }
            None => {
                self.index.insert(entry.key(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// 1ソース分のレコード列を到着順に取り込む
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Entry>,
    {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 置き換えが起きた回数
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// 優先度が低く捨てられた件数
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// ソースごとのレコード列をまとめてマージする
pub fn merge_sources<I, S>(streams: I) -> Vec<Entry>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = Entry>,
{
    let mut merger = RecordMerger::new();
    for stream in streams {
        merger.extend(stream);
    }
    merger.into_entries()
}

// ログテキストから計測レコードを取り出すパーサー
// 行をまたいで保持する文脈（行列サイズ・プロセス数）は ParserState として明示的に持ち回す

pub mod classifier;

pub use classifier::{classify_line, match_method, LineClass};

use crate::core::{Entry, Method, Source};

/// 行をまたいで引き継ぐパース文脈
///
/// ソースごとに `Default` から始め、他のソースと共有しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserState {
    /// 最初のマーカーが現れるまでは未設定
    pub current_matrix_size: Option<u32>,
    pub current_process_count: u32,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            current_matrix_size: None,
            current_process_count: 1,
        }
    }
}

impl ParserState {
    /// 分類済みの1行を適用し、レコードが生成されればそれを返す
    ///
    /// 行内の `m=` / `p=` はその行の出力だけを上書きし、保持中の文脈は変えない。
    /// 逐次版は常にプロセス数1として記録する。
    pub fn apply(&mut self, class: LineClass, source: Source) -> Option<Entry> {
        match class {
            LineClass::SizeMarker { matrix_size } => {
                self.current_matrix_size = Some(matrix_size);
                None
            }
            LineClass::CombinedMarker {
                matrix_size,
                process_count,
            } => {
                self.current_matrix_size = Some(matrix_size);
                self.current_process_count = process_count;
                None
            }
            LineClass::Timing {
                method,
                matrix_size,
                process_count,
                time_microseconds,
            } => {
                let carried_size = self.current_matrix_size?;
                let process_count = match method {
                    Method::Sequential => 1,
                    _ => process_count.unwrap_or(self.current_process_count),
                };
                Some(Entry {
                    matrix_size: matrix_size.unwrap_or(carried_size),
                    process_count,
                    method,
                    time_microseconds,
                    source,
                })
            }
            LineClass::Unrecognized => None,
        }
    }
}

/// 1ソース分のパース結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    pub entries: Vec<Entry>,
    pub total_lines: usize,
}

impl ParseOutcome {
    /// レコードを生成しなかった行数（マーカー行を含む）
    pub fn non_record_lines(&self) -> usize {
        self.total_lines - self.entries.len()
    }
}

/// 文脈を引き継ぎながらログを読むパーサー
///
/// 同じテキストを何度パースしても同じ列が得られる。
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextCarryingParser {
    source: Source,
}

impl ContextCarryingParser {
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// 行の列をパースする。出力順は入力行の順
    pub fn parse_lines<I, S>(&self, lines: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParserState::default();
        let mut outcome = ParseOutcome::default();

        for line in lines {
            outcome.total_lines += 1;
            if let Some(entry) = state.apply(classify_line(line.as_ref()), self.source) {
                outcome.entries.push(entry);
            }
        }

        outcome
    }

    pub fn parse_str(&self, text: &str) -> ParseOutcome {
        self.parse_lines(text.lines())
    }
}

// ログ1行の分類
// 複数のパターンを個別に当てるのではなく、固定の優先順で1つの分類結果だけを返す

use crate::core::Method;
use regex::Regex;
use std::sync::LazyLock;

static SIZE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">>>\s*Matrix Size\s*=\s*(\d+)").expect("valid size marker regex"));

static COMBINED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bn=(\d+)\s+p=(\d+)").expect("valid combined marker regex"));

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time=(\d+)\s*microseconds").expect("valid time regex"));

static INLINE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bm=(\d+)").expect("valid inline size regex"));

static INLINE_PROCESSES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bp=(\d+)").expect("valid inline process regex"));

/// 1行の分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// `>>> Matrix Size = N`
    SizeMarker { matrix_size: u32 },
    /// `n=N p=P`
    CombinedMarker {
        matrix_size: u32,
        process_count: u32,
    },
    /// メソッド名と `time=T microseconds` を含む行
    ///
    /// `matrix_size` / `process_count` は行内の `m=` / `p=` による上書き値で、
    /// 無ければ `None`（パーサーが保持している値を使う）。
    Timing {
        method: Method,
        matrix_size: Option<u32>,
        process_count: Option<u32>,
        time_microseconds: u64,
    },
    Unrecognized,
}

/// 1行を分類する
///
/// 判定順はサイズマーカー、複合マーカー、タイミング行の順で、最初に一致したものを返す。
/// 数値が0や範囲外の場合は不正な行として `Unrecognized` になる。
pub fn classify_line(line: &str) -> LineClass {
    let line = line.trim();

    if let Some(caps) = SIZE_MARKER.captures(line) {
        return match parse_positive(&caps[1]) {
            Some(matrix_size) => LineClass::SizeMarker { matrix_size },
            None => LineClass::Unrecognized,
        };
    }

    if let Some(caps) = COMBINED_MARKER.captures(line) {
        return match (parse_positive(&caps[1]), parse_positive(&caps[2])) {
            (Some(matrix_size), Some(process_count)) => LineClass::CombinedMarker {
                matrix_size,
                process_count,
            },
            _ => LineClass::Unrecognized,
        };
    }

    classify_timing(line).unwrap_or(LineClass::Unrecognized)
}

/// 行に含まれるメソッド名を優先順に従って1つ選ぶ
pub fn match_method(line: &str) -> Option<Method> {
    Method::MATCH_PRIORITY
        .into_iter()
        .find(|method| line.contains(method.log_token()))
}

fn classify_timing(line: &str) -> Option<LineClass> {
    let method = match_method(line)?;
    let caps = TIME_TOKEN.captures(line)?;
    let time_microseconds = caps[1].parse::<u64>().ok()?;

    let matrix_size = inline_override(&INLINE_SIZE, line)?;
    let process_count = inline_override(&INLINE_PROCESSES, line)?;

    Some(LineClass::Timing {
        method,
        matrix_size,
        process_count,
        time_microseconds,
    })
}

/// 行内トークンの読み取り
///
/// トークンが無ければ `Some(None)`、あるのに値が不正なら `None`（行ごと破棄）。
fn inline_override(pattern: &Regex, line: &str) -> Option<Option<u32>> {
    match pattern.captures(line) {
        Some(caps) => parse_positive(&caps[1]).map(Some),
        None => Some(None),
    }
}

fn parse_positive(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|value| *value > 0)
}

// テスト用のログテキストとヘルパー

use matmul_bench::core::{Entry, Method, Source};
use std::fs;
use std::path::{Path, PathBuf};

/// 元の総合ベンチマークログ（サイズマーカー + 行内の m= / p=）
pub const COMPREHENSIVE_LOG: &str = "\
=== Strassen benchmark ===
>>> Matrix Size = 256
sequentialMult (Strassen): m=256, time=1000 microseconds
parallelRowMult (Strassen): m=256, p=10, time=200 microseconds
parallelElementMult (Strassen): m=256, p=10, time=250 microseconds

>>> Matrix Size = 512
sequentialMult (Strassen): m=512, time=8000 microseconds
parallelRowMult (Strassen): m=512, p=4, time=2500 microseconds
garbage line with time=oops microseconds
";

/// 拡張ベンチマークログ（複合マーカーで文脈を引き継ぐ）
pub const EXTENDED_LOG: &str = "\
n=256 p=10
parallelRowMult (Strassen): time=180 microseconds
n=1024 p=16
parallelElementMult (Strassen): time=5000 microseconds
";

/// マーカーより前にタイミング行がある壊れたログ
pub const HEADLESS_LOG: &str = "\
parallelRowMult (Strassen): m=64, p=2, time=10 microseconds
sequentialMult (Strassen): m=64, time=20 microseconds
";

/// ログファイルを書き出してパスを返す
pub fn write_log(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn entry(size: u32, procs: u32, method: Method, time: u64, source: Source) -> Entry {
    Entry {
        matrix_size: size,
        process_count: procs,
        method,
        time_microseconds: time,
        source,
    }
}

/// キーでソートしたタプル列（順序に依存しない比較用）
pub fn sorted_tuples(entries: &[Entry]) -> Vec<(u32, u32, Method, u64)> {
    let mut tuples: Vec<_> = entries
        .iter()
        .map(|e| (e.matrix_size, e.process_count, e.method, e.time_microseconds))
        .collect();
    tuples.sort();
    tuples
}

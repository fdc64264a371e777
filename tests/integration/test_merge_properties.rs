// マージの性質に関する統合テスト
// 一意性・出所の優先・到着順非依存・冪等性・成果物の往復
use matmul_bench::{
    core::{Entry, Method, Source},
    merge::{merge_sources, RecordMerger},
    parser::ContextCarryingParser,
    services::persistence::{read_entries_csv, write_entries_csv},
};
use std::collections::HashSet;

#[path = "../fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

fn parsed(text: &str, source: Source) -> Vec<Entry> {
    ContextCarryingParser::new(source).parse_str(text).entries
}

/// 重なりを持つ複数ソースの組み合わせ
fn overlapping_streams() -> Vec<Vec<Entry>> {
    vec![
        parsed(COMPREHENSIVE_LOG, Source::Original),
        parsed(EXTENDED_LOG, Source::Extended),
        vec![
            entry(512, 4, Method::ParallelRow, 2600, Source::Original),
            entry(512, 4, Method::ParallelRow, 2400, Source::Extended),
            entry(64, 2, Method::ParallelElement, 30, Source::Original),
        ],
    ]
}

#[test]
fn test_merged_keys_are_unique() {
    let merged = merge_sources(overlapping_streams());

    let keys: HashSet<_> = merged.iter().map(Entry::key).collect();
    assert_eq!(keys.len(), merged.len());
}

#[test]
fn test_extended_wins_regardless_of_arrival_order() {
    let forward = merge_sources(overlapping_streams());
    let mut reversed_streams = overlapping_streams();
    reversed_streams.reverse();
    for stream in &mut reversed_streams {
        stream.reverse();
    }
    let backward = merge_sources(reversed_streams);

    for merged in [&forward, &backward] {
        let row_256 = merged
            .iter()
            .find(|e| e.key() == (256, 10, Method::ParallelRow))
            .unwrap();
        assert_eq!(row_256.time_microseconds, 180);

        let row_512 = merged
            .iter()
            .find(|e| e.key() == (512, 4, Method::ParallelRow))
            .unwrap();
        assert_eq!(row_512.time_microseconds, 2400);
        assert_eq!(row_512.source, Source::Extended);
    }

    assert_eq!(sorted_tuples(&forward), sorted_tuples(&backward));
}

#[test]
fn test_equal_precedence_last_seen_wins() {
    let merged = merge_sources([
        vec![entry(128, 2, Method::ParallelRow, 50, Source::Original)],
        vec![entry(128, 2, Method::ParallelRow, 45, Source::Original)],
    ]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].time_microseconds, 45);
}

#[test]
fn test_merge_is_idempotent() {
    let stream = parsed(COMPREHENSIVE_LOG, Source::Original);

    let once = merge_sources([stream.clone()]);
    let twice = merge_sources([stream.clone(), stream]);
    assert_eq!(once, twice);
}

#[test]
fn test_output_order_is_first_encounter() {
    let mut merger = RecordMerger::new();
    merger.extend(parsed(COMPREHENSIVE_LOG, Source::Original));
    merger.extend(parsed(EXTENDED_LOG, Source::Extended));

    let keys: Vec<_> = merger.entries().iter().map(Entry::key).collect();
    assert_eq!(
        keys,
        vec![
            (256, 1, Method::Sequential),
            (256, 10, Method::ParallelRow),
            (256, 10, Method::ParallelElement),
            (512, 1, Method::Sequential),
            (512, 4, Method::ParallelRow),
            (1024, 16, Method::ParallelElement),
        ]
    );
    assert_eq!(merger.replaced(), 1);
    assert_eq!(merger.discarded(), 0);
}

#[test]
fn test_merged_set_round_trips_through_csv() {
    let merged = merge_sources(overlapping_streams());

    let mut buffer = Vec::new();
    write_entries_csv(&mut buffer, &merged).unwrap();
    let read = read_entries_csv(buffer.as_slice(), "entries.csv", Source::Original).unwrap();

    assert_eq!(sorted_tuples(&read), sorted_tuples(&merged));
}

#[test]
fn test_reparse_is_deterministic() {
    let first = parsed(COMPREHENSIVE_LOG, Source::Original);
    let second = parsed(COMPREHENSIVE_LOG, Source::Original);
    assert_eq!(first, second);
}

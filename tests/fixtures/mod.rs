// テストユーティリティ
// 各統合テストで共有するログテキストとヘルパー

#![allow(dead_code)]

pub mod test_data;

// 公開API
pub use test_data::*;

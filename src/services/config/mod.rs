// 設定管理機能
// ログの場所と成果物の出力先、設定ファイルの読み込み

pub mod implementations;

// 公開API
pub use implementations::DefaultPipelineConfig;

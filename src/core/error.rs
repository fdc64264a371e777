// 抽出パイプライン用のカスタムエラー型定義
// 行単位の不正や欠損ファイルはエラーにせず、ここでは処理を止める必要があるものだけを扱う

use thiserror::Error;

/// 抽出・永続化処理のエラー型
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("ログ読み込みエラー: {path} - {source}")]
    SourceRead {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("永続化エラー: {artifact} - {source}")]
    Persistence {
        artifact: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("スキーマ不一致: {artifact} (expected {expected}, found {found})")]
    SchemaMismatch {
        artifact: String,
        expected: String,
        found: String,
    },

    #[error("成果物の解析エラー: {artifact}:{line} - {reason}")]
    ArtifactParse {
        artifact: String,
        line: usize,
        reason: String,
    },

    #[error("バリデーションエラー: {field} - {reason}")]
    Validation { field: String, reason: String },
}

impl ExtractionError {
    pub fn source_read(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::SourceRead {
            path: path.into(),
            source,
        }
    }

    pub fn persistence(artifact: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Persistence {
            artifact: artifact.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn schema_mismatch(
        artifact: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::SchemaMismatch {
            artifact: artifact.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn artifact_parse(artifact: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::ArtifactParse {
            artifact: artifact.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SourceRead { .. } => ErrorSeverity::Medium,
            Self::ArtifactParse { .. } | Self::SchemaMismatch { .. } => ErrorSeverity::High,
            Self::Persistence { .. } | Self::Configuration { .. } => ErrorSeverity::High,
            Self::Validation { .. } => ErrorSeverity::Critical,
        }
    }

    /// 該当ソースを空として扱い処理を続行できるかどうか
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceRead { .. })
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::SourceRead { path, .. } => ErrorContext::new("source_read")
                .with_resource(path.clone())
                .with_suggestion("ログファイルのパスと読み取り権限を確認してください"),
            Self::Persistence { artifact, .. } => ErrorContext::new("persistence")
                .with_resource(artifact.clone())
                .with_suggestion("出力ディレクトリの書き込み権限を確認してください"),
            Self::SchemaMismatch { artifact, .. } | Self::ArtifactParse { artifact, .. } => {
                ErrorContext::new("artifact_read")
                    .with_resource(artifact.clone())
                    .with_suggestion("成果物を現在のバージョンで再生成してください")
            }
            Self::Configuration { message } => ErrorContext::new("configuration")
                .with_suggestion(format!("設定を確認してください: {message}")),
            _ => ErrorContext::new("unknown"),
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（ファイルパス等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// 抽出処理の結果型
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

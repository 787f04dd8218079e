use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafetyAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("評価対象のファイルが見つかりません: {0}")]
    NoObservationsFound(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] safety_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, SafetyAiError>;

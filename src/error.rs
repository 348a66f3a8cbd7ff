use thiserror::Error;

#[derive(Error, Debug)]
pub enum SleuthError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{kind}カタログが見つかりません: {path}。`skin-sleuth config --set-{kind}-catalog PATH` で設定してください")]
    CatalogMissing { kind: &'static str, path: String },

    #[error("カタログが不正: {0}")]
    InvalidCatalog(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("肌トーン判定エラー: {0}")]
    ClassifierRuntime(String),

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] skin_sleuth_common::Error),
}

pub type Result<T> = std::result::Result<T, SleuthError>;

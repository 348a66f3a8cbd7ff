//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing column '{column}' in {catalog} catalog")]
    MissingColumn {
        catalog: &'static str,
        column: &'static str,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

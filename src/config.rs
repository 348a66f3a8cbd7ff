use crate::error::{Result, SleuthError};
use serde::{Deserialize, Serialize};
use skin_sleuth_common::MatchLimits;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub makeup_catalog: PathBuf,
    pub skincare_catalog: PathBuf,
    /// 肌トーン判定コマンド
    pub classifier_command: String,
    /// 判定コマンドの引数（{image} / {report_image} を置換）
    ///
    /// 既定値は仮の呼び出し形式。実際の判定コマンドのオプションに合わせ、
    /// 標準出力に `{"faces": [...]}` を出すように config.json で設定する。
    pub classifier_args: Vec<String>,
    pub timeout_seconds: u64,
    pub max_image_size: u32,
    pub limits: MatchLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            makeup_catalog: PathBuf::from("dataset_makeup.csv"),
            skincare_catalog: PathBuf::from("dataset_skincare.csv"),
            classifier_command: "stone".into(),
            classifier_args: default_classifier_args(),
            timeout_seconds: 60,
            max_image_size: 1024,
            limits: MatchLimits::default(),
        }
    }
}

/// 既定の判定コマンド引数
pub fn default_classifier_args() -> Vec<String> {
    ["-i", "{image}", "--return-report-image", "{report_image}", "--json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// 判定コマンドの引数が未設定（既定の仮形式のまま）か
    pub fn uses_default_classifier_args(&self) -> bool {
        self.classifier_args == default_classifier_args()
    }

    /// 設定ファイルを読み込み、環境変数で上書き
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            config
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides().with_valid_limits())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SleuthError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("skin-sleuth").join("config.json"))
    }

    /// 判定結果キャッシュの保存先
    pub fn cache_dir() -> Result<PathBuf> {
        let base = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
            .ok_or_else(|| SleuthError::Config("キャッシュディレクトリが見つかりません".into()))?;
        Ok(base.join("skin-sleuth"))
    }

    /// 環境変数を優先
    fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("SKIN_SLEUTH_MAKEUP_CATALOG") {
            self.makeup_catalog = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("SKIN_SLEUTH_SKINCARE_CATALOG") {
            self.skincare_catalog = PathBuf::from(path);
        }
        if let Ok(command) = std::env::var("SKIN_SLEUTH_CLASSIFIER") {
            self.classifier_command = command;
        }
        self
    }

    /// 表示件数は1件以上
    fn with_valid_limits(mut self) -> Self {
        let clamped = self.limits.clamped();
        if clamped != self.limits {
            tracing::warn!(
                primary = self.limits.primary,
                fallback = self.limits.fallback,
                "match limits below 1, using 1"
            );
            self.limits = clamped;
        }
        self
    }

    pub fn set_makeup_catalog(&mut self, path: PathBuf) -> Result<()> {
        self.makeup_catalog = path;
        self.save()
    }

    pub fn set_skincare_catalog(&mut self, path: PathBuf) -> Result<()> {
        self.skincare_catalog = path;
        self.save()
    }

    pub fn set_classifier(&mut self, command: String) -> Result<()> {
        self.classifier_command = command;
        self.save()
    }
}

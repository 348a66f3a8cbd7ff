pub mod cache;
mod stone_cli;

pub use cache::{CacheFile, CachedClassifier};
pub use stone_cli::StoneCli;

use crate::config::Config;
use crate::photo;
use skin_sleuth_common::ClassifierOutcome;
use std::path::Path;

/// 肌トーン判定の境界
///
/// 例外を投げず、失敗も含めて ClassifierOutcome で返す。
#[allow(async_fn_in_trait)]
pub trait ToneClassifier {
    async fn classify(&self, image: &Path) -> ClassifierOutcome;

    /// 元画像を前処理してから判定する
    async fn classify_source(&self, source: &Path, max_image_size: u32) -> ClassifierOutcome {
        let prepared = match photo::prepare_image(source, max_image_size) {
            Ok(prepared) => prepared,
            Err(e) => return ClassifierOutcome::RuntimeError(e.to_string()),
        };
        self.classify(prepared.path()).await
    }

    /// 初期化に失敗している場合はその理由
    fn unavailable_reason(&self) -> Option<&str> {
        None
    }
}

/// 起動時に1回だけ利用可否を判定した判定器
#[derive(Debug)]
pub enum ClassifierHandle {
    Ready(StoneCli),
    Unavailable(String),
}

impl ClassifierHandle {
    pub async fn initialize(config: &Config) -> Self {
        let cli = StoneCli::from_config(config);
        match cli.probe().await {
            Ok(()) => {
                tracing::debug!(command = cli.command(), "classifier ready");
                ClassifierHandle::Ready(cli)
            }
            Err(reason) => {
                tracing::warn!(command = cli.command(), %reason, "classifier unavailable");
                ClassifierHandle::Unavailable(reason)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ClassifierHandle::Ready(_))
    }
}

impl ToneClassifier for ClassifierHandle {
    async fn classify(&self, image: &Path) -> ClassifierOutcome {
        match self {
            ClassifierHandle::Ready(cli) => cli.classify(image).await,
            ClassifierHandle::Unavailable(reason) => ClassifierOutcome::Unavailable(reason.clone()),
        }
    }

    fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ClassifierHandle::Ready(_) => None,
            ClassifierHandle::Unavailable(reason) => Some(reason.as_str()),
        }
    }
}

//! 解析ワークフロー
//!
//! 画像前処理 → 肌トーン判定 → カタログ照合 を1回分実行する。
//! 判定側の失敗はすべて AnalysisReport の状態として返し、エラーにはしない。

use crate::classifier::ToneClassifier;
use skin_sleuth_common::{
    report_for_outcome, AnalysisReport, Catalogs, ClassifierOutcome, Concern, Matcher, SkinType,
};
use std::path::Path;

/// 解析リクエスト
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub image: &'a Path,
    pub skin_type: SkinType,
    pub concern: Concern,
    pub max_image_size: u32,
}

pub async fn analyze<C: ToneClassifier>(
    classifier: &C,
    request: AnalysisRequest<'_>,
    catalogs: &Catalogs,
    matcher: &Matcher,
) -> AnalysisReport {
    let outcome = classify_image(classifier, request.image, request.max_image_size).await;
    report_for_outcome(outcome, catalogs, request.skin_type, request.concern, matcher)
}

async fn classify_image<C: ToneClassifier>(
    classifier: &C,
    image: &Path,
    max_image_size: u32,
) -> ClassifierOutcome {
    if let Some(reason) = classifier.unavailable_reason() {
        return ClassifierOutcome::Unavailable(reason.to_string());
    }

    let outcome = classifier.classify_source(image, max_image_size).await;
    tracing::debug!(?outcome, image = %image.display(), "classified");
    outcome
}

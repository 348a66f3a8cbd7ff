//! 推薦ワークフロー
//!
//! 判定結果と照会条件から、表示層に渡すレポートを組み立てる。
//! トーンが判定できた場合のみカタログ照合を行う。

use crate::catalog::Catalogs;
use crate::classifier::ClassifierOutcome;
use crate::matcher::{MatchResult, Matcher};
use crate::types::{Concern, MakeupProduct, Query, SkinType, SkincareProduct};
use serde::{Deserialize, Serialize};

/// 推薦結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub query: Query,
    pub makeup: MatchResult<MakeupProduct>,
    pub skincare: MatchResult<SkincareProduct>,
}

/// 解析1回分のレポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "detail")]
pub enum AnalysisReport {
    Recommended(Recommendation),
    NoFaceDetected,
    ClassifierUnavailable(String),
    ClassifierFailed(String),
}

/// 照会条件でカタログを照合
///
/// トーンラベルは表示用に保持するだけで、絞込みには使わない。
pub fn recommend(catalogs: &Catalogs, query: Query, matcher: &Matcher) -> Recommendation {
    let makeup = matcher.match_makeup(&catalogs.makeup, query.skin_type);
    let skincare = matcher.match_skincare(&catalogs.skincare, query.skin_type, query.concern);
    Recommendation {
        query,
        makeup,
        skincare,
    }
}

/// 判定結果をレポートに変換
pub fn report_for_outcome(
    outcome: ClassifierOutcome,
    catalogs: &Catalogs,
    skin_type: SkinType,
    concern: Concern,
    matcher: &Matcher,
) -> AnalysisReport {
    match outcome {
        ClassifierOutcome::Detected { tone_label } => {
            let query = Query::new(skin_type, concern).with_tone(tone_label);
            AnalysisReport::Recommended(recommend(catalogs, query, matcher))
        }
        ClassifierOutcome::NoFaceDetected => AnalysisReport::NoFaceDetected,
        ClassifierOutcome::Unavailable(reason) => AnalysisReport::ClassifierUnavailable(reason),
        ClassifierOutcome::RuntimeError(message) => AnalysisReport::ClassifierFailed(message),
    }
}

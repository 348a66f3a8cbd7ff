//! 商品照合モジュール
//!
//! ユーザーが選んだ肌タイプ・肌悩みでカタログを絞り込む。
//! 比較は大文字小文字を無視した部分一致（"Oily" は "Oily/Combination" にも一致）。
//! 並び替えはせず、カタログの行順をそのまま返す。

use crate::catalog::{Catalog, CatalogRecord};
use crate::types::{Concern, MakeupProduct, SkinType, SkincareProduct};
use serde::{Deserialize, Serialize};

/// 件数上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchLimits {
    /// 通常照合の上限
    pub primary: usize,
    /// 肌悩みを外した代替照合の上限
    pub fallback: usize,
}

impl MatchLimits {
    /// 0件の上限は1件に切り上げる
    pub fn clamped(self) -> Self {
        Self {
            primary: self.primary.max(1),
            fallback: self.fallback.max(1),
        }
    }
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            primary: 5,
            fallback: 3,
        }
    }
}

/// 照合結果の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    /// 条件どおりに一致
    ExactMatch,
    /// 肌悩みを外して肌タイプのみで一致
    FallbackUsed,
    /// 一致なし（エラーではない）
    Empty,
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<T> {
    pub records: Vec<T>,
    pub status: MatchStatus,
    /// 上限で切る前の一致件数
    pub total_matches: usize,
}

impl<T> MatchResult<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn empty() -> Self {
        Self {
            records: Vec::new(),
            status: MatchStatus::Empty,
            total_matches: 0,
        }
    }
}

/// 照合器（状態は件数上限のみ）
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    limits: MatchLimits,
}

impl Matcher {
    pub fn new(limits: MatchLimits) -> Self {
        Self {
            limits: limits.clamped(),
        }
    }

    pub fn limits(&self) -> MatchLimits {
        self.limits
    }

    /// メイクアップを肌タイプで絞り込む
    pub fn match_makeup(
        &self,
        catalog: &Catalog<MakeupProduct>,
        skin_type: SkinType,
    ) -> MatchResult<MakeupProduct> {
        let result = select(catalog, self.limits.primary, |p| {
            contains_ignore_case(p.skin_type(), skin_type.label())
        });
        tracing::debug!(
            skin_type = %skin_type,
            total = result.total_matches,
            "makeup match"
        );
        result
    }

    /// スキンケアを肌タイプ＋肌悩みで絞り込む
    ///
    /// 一致なしの場合は肌タイプのみで再照合し `MatchStatus::FallbackUsed` を返す。
    pub fn match_skincare(
        &self,
        catalog: &Catalog<SkincareProduct>,
        skin_type: SkinType,
        concern: Concern,
    ) -> MatchResult<SkincareProduct> {
        let primary = select(catalog, self.limits.primary, |p| {
            contains_ignore_case(p.skin_type(), skin_type.label())
                && contains_ignore_case(p.concern.as_deref(), concern.label())
        });
        if primary.total_matches > 0 {
            tracing::debug!(
                skin_type = %skin_type,
                concern = %concern,
                total = primary.total_matches,
                "skincare match"
            );
            return primary;
        }

        let mut fallback = select(catalog, self.limits.fallback, |p| {
            contains_ignore_case(p.skin_type(), skin_type.label())
        });
        if fallback.total_matches > 0 {
            fallback.status = MatchStatus::FallbackUsed;
        }
        tracing::debug!(
            skin_type = %skin_type,
            concern = %concern,
            total = fallback.total_matches,
            status = ?fallback.status,
            "skincare fallback"
        );
        fallback
    }
}

/// 既定の上限でメイクアップを絞り込む
pub fn match_makeup(catalog: &Catalog<MakeupProduct>, skin_type: SkinType) -> MatchResult<MakeupProduct> {
    Matcher::default().match_makeup(catalog, skin_type)
}

/// 既定の上限でスキンケアを絞り込む
pub fn match_skincare(
    catalog: &Catalog<SkincareProduct>,
    skin_type: SkinType,
    concern: Concern,
) -> MatchResult<SkincareProduct> {
    Matcher::default().match_skincare(catalog, skin_type, concern)
}

/// 大文字小文字を無視した部分一致。値がない場合は常に不一致
pub fn contains_ignore_case(field: Option<&str>, needle: &str) -> bool {
    match field {
        Some(value) if !value.trim().is_empty() => {
            value.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => false,
    }
}

fn select<T, F>(catalog: &Catalog<T>, limit: usize, predicate: F) -> MatchResult<T>
where
    T: CatalogRecord,
    F: Fn(&T) -> bool,
{
    let mut records = Vec::new();
    let mut total_matches = 0;

    for record in catalog.iter().filter(|r| predicate(r)) {
        total_matches += 1;
        if records.len() < limit {
            records.push(record.clone());
        }
    }

    if total_matches == 0 {
        return MatchResult::empty();
    }

    MatchResult {
        records,
        status: MatchStatus::ExactMatch,
        total_matches,
    }
}

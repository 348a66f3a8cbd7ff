//! 商品・照会条件の型定義
//!
//! - SkinType / Concern: ユーザーが選択する肌タイプ・肌悩み（固定の選択肢）
//! - MakeupProduct / SkincareProduct: カタログの1行
//! - Query: 1回の照会条件（保存しない）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 肌タイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Normal,
    Sensitive,
}

impl SkinType {
    /// 選択肢の表示順
    pub const ALL: [SkinType; 5] = [
        SkinType::Oily,
        SkinType::Dry,
        SkinType::Combination,
        SkinType::Normal,
        SkinType::Sensitive,
    ];

    /// カタログ照合に使うラベル
    pub fn label(&self) -> &'static str {
        match self {
            SkinType::Oily => "Oily",
            SkinType::Dry => "Dry",
            SkinType::Combination => "Combination",
            SkinType::Normal => "Normal",
            SkinType::Sensitive => "Sensitive",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_choice(s);
        SkinType::ALL
            .into_iter()
            .find(|t| normalize_choice(t.label()) == key)
            .ok_or_else(|| {
                format!(
                    "Unknown skin type: {}. Use oily, dry, combination, normal, or sensitive",
                    s
                )
            })
    }
}

/// 肌悩み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concern {
    Acne,
    Aging,
    Dullness,
    Sensitivity,
    #[serde(rename = "General Care")]
    GeneralCare,
}

impl Concern {
    pub const ALL: [Concern; 5] = [
        Concern::Acne,
        Concern::Aging,
        Concern::Dullness,
        Concern::Sensitivity,
        Concern::GeneralCare,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Concern::Acne => "Acne",
            Concern::Aging => "Aging",
            Concern::Dullness => "Dullness",
            Concern::Sensitivity => "Sensitivity",
            Concern::GeneralCare => "General Care",
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Concern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_choice(s);
        Concern::ALL
            .into_iter()
            .find(|c| normalize_choice(c.label()) == key)
            .ok_or_else(|| {
                format!(
                    "Unknown concern: {}. Use acne, aging, dullness, sensitivity, or general-care",
                    s
                )
            })
    }
}

/// 選択肢の比較用キー（大文字小文字・区切り文字を無視）
fn normalize_choice(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 価格（数値として読めない値はそのまま保持）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Price::Amount(v),
            _ => Price::Text(trimmed.to_string()),
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Text(String::new())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) if v.fract() == 0.0 => write!(f, "{:.0}", v),
            Price::Amount(v) => write!(f, "{}", v),
            Price::Text(s) => f.write_str(s),
        }
    }
}

/// メイクアップ商品
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeupProduct {
    pub brand: String,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub skin_type: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
}

/// スキンケア商品
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkincareProduct {
    pub brand: String,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub skin_type: Option<String>,
    #[serde(default)]
    pub concern: Option<String>,
}

/// 照会条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// 判定された肌トーン（表示のみ、絞込みには使わない）
    pub detected_tone: Option<String>,
    pub skin_type: SkinType,
    pub concern: Concern,
}

impl Query {
    pub fn new(skin_type: SkinType, concern: Concern) -> Self {
        Self {
            detected_tone: None,
            skin_type,
            concern,
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.detected_tone = Some(tone.into());
        self
    }
}

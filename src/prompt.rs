//! 肌プロフィールの対話式選択
//!
//! コマンドライン引数で指定されなかった項目だけを質問する。

use crate::error::{Result, SleuthError};
use dialoguer::Select;
use skin_sleuth_common::{Concern, SkinType};

pub fn skin_type_or_prompt(value: Option<SkinType>) -> Result<SkinType> {
    match value {
        Some(v) => Ok(v),
        None => {
            let labels: Vec<&str> = SkinType::ALL.iter().map(|t| t.label()).collect();
            let index = select("肌タイプ", &labels)?;
            Ok(SkinType::ALL[index])
        }
    }
}

pub fn concern_or_prompt(value: Option<Concern>) -> Result<Concern> {
    match value {
        Some(v) => Ok(v),
        None => {
            let labels: Vec<&str> = Concern::ALL.iter().map(|c| c.label()).collect();
            let index = select("主な肌悩み", &labels)?;
            Ok(Concern::ALL[index])
        }
    }
}

fn select(prompt: &str, items: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| SleuthError::Prompt(e.to_string()))
}

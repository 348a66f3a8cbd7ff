//! 肌トーン判定の入出力型
//!
//! 判定処理そのものは外部コマンド。ここでは応答の形と、
//! 呼び出し側が網羅的に分岐できる結果型だけを定義する。

use serde::{Deserialize, Serialize};

/// 判定で検出された顔1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceReport {
    #[serde(alias = "faceId")]
    pub face_id: Option<u32>,
    #[serde(alias = "toneLabel")]
    pub tone_label: String,
    /// 肌色（例: "#C99676"）
    #[serde(alias = "skinTone")]
    pub skin_tone: Option<String>,
    pub accuracy: Option<f64>,
}

/// 判定コマンドの応答全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierReport {
    pub faces: Vec<FaceReport>,
}

impl ClassifierReport {
    /// 最初に検出された顔のトーンラベル
    pub fn first_tone_label(&self) -> Option<&str> {
        self.faces
            .first()
            .map(|f| f.tone_label.trim())
            .filter(|label| !label.is_empty())
    }

    /// 応答を判定結果に変換（顔なしは NoFaceDetected）
    pub fn into_outcome(self) -> ClassifierOutcome {
        if self.faces.is_empty() {
            return ClassifierOutcome::NoFaceDetected;
        }
        match self.first_tone_label() {
            Some(label) => ClassifierOutcome::Detected {
                tone_label: label.to_string(),
            },
            None => ClassifierOutcome::RuntimeError("tone_label が空です".into()),
        }
    }
}

/// 判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "detail")]
pub enum ClassifierOutcome {
    /// 判定機能を初期化できなかった
    Unavailable(String),
    /// 顔が見つからなかった
    NoFaceDetected,
    /// 判定中に失敗した（原因メッセージを保持）
    RuntimeError(String),
    /// 判定成功
    Detected { tone_label: String },
}

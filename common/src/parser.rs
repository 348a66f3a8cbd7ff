//! 判定コマンド応答パーサー
//!
//! 判定コマンドの標準出力からJSONを抽出し、ClassifierReport にパースする。
//! 出力の前後にログ行が混ざっていても扱えるようにする。

use crate::classifier::ClassifierReport;
use crate::error::{Error, Result};

/// 応答からJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use skin_sleuth_common::extract_json;
///
/// let response = "loading model...\n{\"faces\": []}\ndone";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"faces\": []}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 判定コマンドの応答をパース
pub fn parse_classifier_response(response: &str) -> Result<ClassifierReport> {
    let json_str = extract_json(response)?;
    let report: ClassifierReport = serde_json::from_str(json_str.trim())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_with_block() {
        let response = "Result:\n```json\n{\"faces\": []}\n```\n";
        assert_eq!(extract_json(response).unwrap(), "{\"faces\": []}");
    }

    #[test]
    fn test_extract_json_not_found() {
        let err = extract_json("no faces here").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_classifier_response() {
        let response = r##"Processing temp.jpg
{
  "basename": "temp",
  "faces": [
    {
      "face_id": 1,
      "dominant_colors": [{"color": "#C99676", "percent": "0.62"}],
      "skin_tone": "#C99676",
      "tone_label": "CJ",
      "accuracy": 87.3
    }
  ]
}"##;
        let report = parse_classifier_response(response).unwrap();
        assert_eq!(report.faces.len(), 1);
        assert_eq!(report.faces[0].face_id, Some(1));
        assert_eq!(report.faces[0].skin_tone.as_deref(), Some("#C99676"));
        assert_eq!(report.first_tone_label(), Some("CJ"));
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let response = r#"{"faces": [{"toneLabel": "Light"}]}"#;
        let report = parse_classifier_response(response).unwrap();
        assert_eq!(report.first_tone_label(), Some("Light"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_classifier_response("{ faces: oops }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }
}

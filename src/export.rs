//! 推薦結果の保存
//!
//! 拡張子で形式を決める: .json（serde_json）/ .xlsx（rust_xlsxwriter）

use crate::error::{Result, SleuthError};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use skin_sleuth_common::{AnalysisReport, MakeupProduct, MatchStatus, Price, SkincareProduct};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Excel,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(ExportFormat::Json),
            "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(SleuthError::Export(format!(
                "未対応の出力形式: {}（.json / .xlsx）",
                path.display()
            ))),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    generated_at: DateTime<Utc>,
    image: Option<String>,
    report: &'a AnalysisReport,
}

pub fn export_report(report: &AnalysisReport, image: Option<&Path>, output: &Path) -> Result<()> {
    let document = ExportDocument {
        generated_at: Utc::now(),
        image: image.map(|p| p.display().to_string()),
        report,
    };

    match ExportFormat::from_path(output)? {
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(&document)?;
            std::fs::write(output, json)?;
        }
        ExportFormat::Excel => {
            write_workbook(&document, output).map_err(|e| SleuthError::Export(e.to_string()))?;
        }
    }

    tracing::info!(path = %output.display(), "report exported");
    Ok(())
}

fn write_workbook(document: &ExportDocument<'_>, output: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let summary = workbook.add_worksheet();
    summary.set_name("概要")?;
    summary.set_column_width(0, 18)?;
    summary.set_column_width(1, 40)?;

    let mut rows: Vec<(&str, String)> = vec![
        ("作成日時", document.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ("画像", document.image.clone().unwrap_or_default()),
        ("状態", status_label(document.report).to_string()),
    ];

    match document.report {
        AnalysisReport::Recommended(rec) => {
            rows.push(("肌トーン", rec.query.detected_tone.clone().unwrap_or_default()));
            rows.push(("肌タイプ", rec.query.skin_type.to_string()));
            rows.push(("肌悩み", rec.query.concern.to_string()));
            rows.push(("メイクアップ", match_status_label(rec.makeup.status).to_string()));
            rows.push(("スキンケア", match_status_label(rec.skincare.status).to_string()));
        }
        AnalysisReport::ClassifierUnavailable(detail) | AnalysisReport::ClassifierFailed(detail) => {
            rows.push(("詳細", detail.clone()));
        }
        AnalysisReport::NoFaceDetected => {}
    }

    for (i, (key, value)) in rows.iter().enumerate() {
        let row = i as u32;
        summary.write_string_with_format(row, 0, *key, &bold)?;
        summary.write_string(row, 1, value.as_str())?;
    }

    if let AnalysisReport::Recommended(rec) = document.report {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Makeup")?;
        write_makeup(sheet, &rec.makeup.records, &bold)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name("Skincare")?;
        write_skincare(sheet, &rec.skincare.records, &bold)?;
    }

    workbook.save(output)
}

fn write_header(sheet: &mut Worksheet, headers: &[&str], bold: &Format) -> std::result::Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
        sheet.set_column_width(col as u16, 24)?;
    }
    Ok(())
}

fn write_price(sheet: &mut Worksheet, row: u32, col: u16, price: &Price) -> std::result::Result<(), XlsxError> {
    match price {
        Price::Amount(v) => sheet.write_number(row, col, *v)?,
        Price::Text(s) => sheet.write_string(row, col, s.as_str())?,
    };
    Ok(())
}

fn write_makeup(sheet: &mut Worksheet, records: &[MakeupProduct], bold: &Format) -> std::result::Result<(), XlsxError> {
    write_header(sheet, &["brand", "name", "price", "skin type", "skin tone"], bold)?;
    for (i, p) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, p.brand.as_str())?;
        sheet.write_string(row, 1, p.name.as_str())?;
        write_price(sheet, row, 2, &p.price)?;
        sheet.write_string(row, 3, p.skin_type.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 4, p.skin_tone.as_deref().unwrap_or(""))?;
    }
    Ok(())
}

fn write_skincare(sheet: &mut Worksheet, records: &[SkincareProduct], bold: &Format) -> std::result::Result<(), XlsxError> {
    write_header(sheet, &["brand", "name", "price", "skin type", "concern"], bold)?;
    for (i, p) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, p.brand.as_str())?;
        sheet.write_string(row, 1, p.name.as_str())?;
        write_price(sheet, row, 2, &p.price)?;
        sheet.write_string(row, 3, p.skin_type.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 4, p.concern.as_deref().unwrap_or(""))?;
    }
    Ok(())
}

pub fn status_label(report: &AnalysisReport) -> &'static str {
    match report {
        AnalysisReport::Recommended(_) => "推薦あり",
        AnalysisReport::NoFaceDetected => "顔が検出されませんでした",
        AnalysisReport::ClassifierUnavailable(_) => "判定機能が利用できません",
        AnalysisReport::ClassifierFailed(_) => "判定に失敗しました",
    }
}

pub fn match_status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::ExactMatch => "一致",
        MatchStatus::FallbackUsed => "肌タイプのみで一致",
        MatchStatus::Empty => "該当なし",
    }
}

//! 結果保存・カタログ読み込みの統合テスト

use rust_xlsxwriter::Workbook;
use skin_sleuth::catalog;
use skin_sleuth::export::export_report;
use skin_sleuth_common::{
    recommend, AnalysisReport, Catalog, Catalogs, Concern, MakeupProduct, Matcher, Price, Query,
    SkinType, SkincareProduct,
};
use std::path::Path;
use tempfile::tempdir;

fn catalogs() -> Catalogs {
    Catalogs::new(
        Catalog::new(vec![MakeupProduct {
            brand: "Wardah".into(),
            name: "Colorfit Foundation".into(),
            price: Price::Amount(89000.0),
            skin_type: Some("Oily/Combination".into()),
            skin_tone: Some("Light".into()),
        }]),
        Catalog::new(vec![SkincareProduct {
            brand: "Avoskin".into(),
            name: "Miraculous Refining Toner".into(),
            price: Price::Text("Rp 175.000".into()),
            skin_type: Some("Dry".into()),
            concern: Some("Aging".into()),
        }]),
    )
}

fn recommended() -> AnalysisReport {
    let query = Query::new(SkinType::Dry, Concern::Acne).with_tone("Fair");
    AnalysisReport::Recommended(recommend(&catalogs(), query, &Matcher::default()))
}

#[test]
fn test_export_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.json");

    export_report(&recommended(), Some(Path::new("selfie.jpg")), &output).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["image"], "selfie.jpg");
    assert!(json["generatedAt"].is_string());
    assert_eq!(json["report"]["status"], "recommended");
    assert_eq!(json["report"]["detail"]["skincare"]["status"], "fallback-used");
    assert_eq!(json["report"]["detail"]["makeup"]["status"], "empty");
}

#[test]
fn test_export_excel() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.xlsx");

    export_report(&recommended(), None, &output).unwrap();

    let metadata = std::fs::metadata(&output).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}

#[test]
fn test_export_excel_for_failure_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("failed.xlsx");

    export_report(&AnalysisReport::ClassifierFailed("exit 1".into()), None, &output).unwrap();
    assert!(output.exists());
}

#[test]
fn test_export_unknown_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = export_report(&recommended(), None, &dir.path().join("result.pdf"));
    assert!(result.is_err());
}

/// Excelで作ったカタログを読み込めること
#[test]
fn test_load_xlsx_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dataset_makeup.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Brand", "Name", "Price", "Skin Type", "Skin Tone"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "Pixy").unwrap();
    sheet.write_string(1, 1, "Make It Glow Cushion").unwrap();
    sheet.write_number(1, 2, 68000.0).unwrap();
    sheet.write_string(1, 3, "Normal/Dry").unwrap();
    sheet.write_string(1, 4, "Fair").unwrap();
    workbook.save(&path).unwrap();

    let catalog = catalog::load_catalog::<MakeupProduct>(&path).unwrap();
    assert_eq!(catalog.len(), 1);

    let product = &catalog.records()[0];
    assert_eq!(product.brand, "Pixy");
    assert_eq!(product.price, Price::Amount(68000.0));
    assert_eq!(product.skin_type.as_deref(), Some("Normal/Dry"));

    let result = skin_sleuth_common::match_makeup(&catalog, SkinType::Dry);
    assert_eq!(result.len(), 1);
}

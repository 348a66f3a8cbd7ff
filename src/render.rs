//! 推薦結果の端末表示

use crate::export::status_label;
use skin_sleuth_common::{
    AnalysisReport, Concern, MakeupProduct, MatchResult, MatchStatus, Recommendation, SkinType,
    SkincareProduct,
};

pub fn print_report(report: &AnalysisReport) {
    match report {
        AnalysisReport::Recommended(rec) => print_recommendation(rec),
        AnalysisReport::NoFaceDetected => {
            println!("✗ {}。明るい場所で正面から撮影した写真で再試行してください", status_label(report));
        }
        AnalysisReport::ClassifierUnavailable(reason) => {
            println!("✗ {}: {}", status_label(report), reason);
        }
        AnalysisReport::ClassifierFailed(message) => {
            println!("✗ {}: {}", status_label(report), message);
        }
    }
}

pub fn print_recommendation(rec: &Recommendation) {
    if let Some(tone) = &rec.query.detected_tone {
        println!("✔ 顔を検出しました。肌トーン: {}\n", tone);
    }

    match &rec.query.detected_tone {
        Some(tone) => println!("💄 メイクアップのおすすめ (トーン: {})", tone),
        None => println!("💄 メイクアップのおすすめ"),
    }
    match makeup_message(&rec.makeup) {
        Some(message) => println!("  {}", message),
        None => print_makeup_table(&rec.makeup),
    }

    println!();
    println!("🧴 スキンケアのおすすめ ({})", rec.query.skin_type);
    if let Some(message) = skincare_message(&rec.skincare, rec.query.skin_type, rec.query.concern) {
        println!("  {}", message);
    }
    if !rec.skincare.is_empty() {
        print_skincare_table(&rec.skincare);
    }
}

/// メイクアップ結果が空のときの案内
pub fn makeup_message(result: &MatchResult<MakeupProduct>) -> Option<String> {
    match result.status {
        MatchStatus::Empty => Some("該当するメイクアップがありません。条件を変えてお試しください".into()),
        MatchStatus::ExactMatch | MatchStatus::FallbackUsed => None,
    }
}

/// スキンケア結果の状態ごとの案内
pub fn skincare_message(
    result: &MatchResult<SkincareProduct>,
    skin_type: SkinType,
    concern: Concern,
) -> Option<String> {
    match result.status {
        MatchStatus::ExactMatch => None,
        MatchStatus::FallbackUsed => Some(format!(
            "{}肌向けの「{}」対策商品は見つかりませんでした。一般的なおすすめを表示します:",
            skin_type, concern
        )),
        MatchStatus::Empty => Some(format!("{}肌向けのスキンケアは見つかりませんでした", skin_type)),
    }
}

fn print_makeup_table(result: &MatchResult<MakeupProduct>) {
    println!("  {:<16} {:<32} {:>10}  {}", "brand", "name", "price", "skin tone");
    for p in &result.records {
        println!(
            "  {:<16} {:<32} {:>10}  {}",
            p.brand,
            p.name,
            p.price.to_string(),
            p.skin_tone.as_deref().unwrap_or("-")
        );
    }
    print_remaining(result.total_matches, result.len());
}

fn print_skincare_table(result: &MatchResult<SkincareProduct>) {
    println!("  {:<16} {:<32} {:>10}  {}", "brand", "name", "price", "concern");
    for p in &result.records {
        println!(
            "  {:<16} {:<32} {:>10}  {}",
            p.brand,
            p.name,
            p.price.to_string(),
            p.concern.as_deref().unwrap_or("-")
        );
    }
    print_remaining(result.total_matches, result.len());
}

fn print_remaining(total: usize, shown: usize) {
    if total > shown {
        println!("  … ほか {}件", total - shown);
    }
}

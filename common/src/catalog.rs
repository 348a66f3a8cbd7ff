//! 商品カタログモジュール
//!
//! メイクアップ・スキンケアの2種類のカタログを保持する。
//! 一度読み込んだら変更しない（照合処理は読み取りのみ）。

use crate::error::{Error, Result};
use crate::types::{MakeupProduct, Price, SkincareProduct};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;

/// カタログの1行として読み込める型
pub trait CatalogRecord: Clone {
    /// カタログ種別名（エラーメッセージ用）
    const KIND: &'static str;
    /// 必須列（正規化済みヘッダー名）。from_fields にはこの順で値が渡される
    const COLUMNS: &'static [&'static str];

    fn from_fields(fields: Vec<Option<String>>) -> Self;

    /// 肌タイプ列の値
    fn skin_type(&self) -> Option<&str>;
}

impl CatalogRecord for MakeupProduct {
    const KIND: &'static str = "makeup";
    const COLUMNS: &'static [&'static str] = &["brand", "name", "price", "skin type", "skin tone"];

    fn from_fields(fields: Vec<Option<String>>) -> Self {
        let mut it = fields.into_iter();
        let mut next = || it.next().flatten();
        Self {
            brand: next().unwrap_or_default(),
            name: next().unwrap_or_default(),
            price: next().map(|p| Price::parse(&p)).unwrap_or_default(),
            skin_type: next(),
            skin_tone: next(),
        }
    }

    fn skin_type(&self) -> Option<&str> {
        self.skin_type.as_deref()
    }
}

impl CatalogRecord for SkincareProduct {
    const KIND: &'static str = "skincare";
    const COLUMNS: &'static [&'static str] = &["brand", "name", "price", "skin type", "concern"];

    fn from_fields(fields: Vec<Option<String>>) -> Self {
        let mut it = fields.into_iter();
        let mut next = || it.next().flatten();
        Self {
            brand: next().unwrap_or_default(),
            name: next().unwrap_or_default(),
            price: next().map(|p| Price::parse(&p)).unwrap_or_default(),
            skin_type: next(),
            concern: next(),
        }
    }

    fn skin_type(&self) -> Option<&str> {
        self.skin_type.as_deref()
    }
}

/// 1種類の商品カタログ（行順を保持）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog<T> {
    records: Vec<T>,
}

impl<T: CatalogRecord> Catalog<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// ヘッダー行とデータ行から構築
    ///
    /// 必須列が見つからない場合は `Error::MissingColumn`。
    /// 余分な列は無視し、足りないセルは空欄として扱う。
    pub fn from_rows<I>(headers: &[String], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let indices = T::COLUMNS
            .iter()
            .map(|&column| {
                normalized
                    .iter()
                    .position(|h| h == column)
                    .ok_or(Error::MissingColumn {
                        catalog: T::KIND,
                        column,
                    })
            })
            .collect::<Result<Vec<usize>>>()?;

        let records = rows
            .into_iter()
            .map(|row| {
                let fields = indices
                    .iter()
                    .map(|&i| row.get(i).and_then(|cell| non_blank(cell)))
                    .collect();
                T::from_fields(fields)
            })
            .collect();

        Ok(Self { records })
    }

    /// CSVから読み込み（1行目はヘッダー）
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        Self::from_rows(&headers, rows)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }
}

impl<T> Catalog<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 指定列の値一覧（重複除去・ソート済み）
    pub fn distinct_values<'a, F>(&'a self, field: F) -> Vec<&'a str>
    where
        F: Fn(&'a T) -> Option<&'a str>,
    {
        let set: BTreeSet<&str> = self.records.iter().filter_map(field).collect();
        set.into_iter().collect()
    }
}

/// メイクアップ・スキンケアのカタログ一式
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub makeup: Catalog<MakeupProduct>,
    pub skincare: Catalog<SkincareProduct>,
}

impl Catalogs {
    pub fn new(makeup: Catalog<MakeupProduct>, skincare: Catalog<SkincareProduct>) -> Self {
        Self { makeup, skincare }
    }
}

/// ヘッダー名の正規化（"Skin_Type" / "skin-type" / "skin type" を同一視）
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_blank(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

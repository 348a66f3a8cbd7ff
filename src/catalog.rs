//! カタログファイル読み込みモジュール
//!
//! CSV（csv）と Excel/ODS（calamine、先頭シート）に対応。
//! 起動時に1回だけ読み込み、以降は変更しない。

use crate::error::{Result, SleuthError};
use calamine::{open_workbook_auto, Reader};
use skin_sleuth_common::{Catalog, CatalogRecord, Catalogs, MakeupProduct, SkincareProduct};
use std::fs::File;
use std::path::Path;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// メイクアップ・スキンケアの両カタログを読み込む
///
/// どちらかが読めなければ起動できないのでエラーを返す。
pub fn load_catalogs(makeup_path: &Path, skincare_path: &Path) -> Result<Catalogs> {
    let makeup = load_catalog::<MakeupProduct>(makeup_path)?;
    let skincare = load_catalog::<SkincareProduct>(skincare_path)?;
    Ok(Catalogs::new(makeup, skincare))
}

pub fn load_catalog<T: CatalogRecord>(path: &Path) -> Result<Catalog<T>> {
    if !path.is_file() {
        return Err(SleuthError::CatalogMissing {
            kind: T::KIND,
            path: path.display().to_string(),
        });
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let catalog = if extension == "csv" {
        let file = File::open(path)?;
        Catalog::<T>::from_reader(file)
            .map_err(|e| SleuthError::InvalidCatalog(format!("{}: {}", path.display(), e)))?
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        load_spreadsheet::<T>(path)?
    } else {
        return Err(SleuthError::InvalidCatalog(format!(
            "{}: 未対応の形式です（csv/xlsx/xls/ods）",
            path.display()
        )));
    };

    tracing::info!(
        kind = T::KIND,
        path = %path.display(),
        records = catalog.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn load_spreadsheet<T: CatalogRecord>(path: &Path) -> Result<Catalog<T>> {
    let invalid = |msg: String| SleuthError::InvalidCatalog(format!("{}: {}", path.display(), msg));

    let mut workbook = open_workbook_auto(path).map_err(|e| invalid(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| invalid("シートがありません".into()))?
        .map_err(|e| invalid(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or_else(|| invalid("ヘッダー行がありません".into()))?;

    Catalog::<T>::from_rows(&headers, rows).map_err(|e| invalid(e.to_string()))
}

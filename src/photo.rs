//! 判定用画像の前処理
//!
//! 入力画像をデコードできるか確認し、長辺を max_size 以下に縮小して
//! 呼び出しごとの一時ファイルにJPEGで書き出す。判定コマンドにはこのパスを渡す。

use crate::error::{Result, SleuthError};
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use tempfile::TempPath;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 前処理済み画像（Drop時に一時ファイルを削除）
#[derive(Debug)]
pub struct PreparedImage {
    path: TempPath,
}

impl PreparedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

pub fn prepare_image(src: &Path, max_size: u32) -> Result<PreparedImage> {
    if !src.is_file() {
        return Err(SleuthError::FileNotFound(src.display().to_string()));
    }

    let bytes = std::fs::read(src)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| SleuthError::ImageLoad(format!("{}: {}", src.display(), e)))?;

    let img = if img.width() > max_size || img.height() > max_size {
        tracing::debug!(
            width = img.width(),
            height = img.height(),
            max_size,
            "downscaling image"
        );
        img.thumbnail(max_size, max_size)
    } else {
        img
    };

    // JPEGはアルファ非対応
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    // 書き込み前にハンドルを閉じる
    let dest = tempfile::Builder::new()
        .prefix("skin-sleuth-")
        .suffix(".jpg")
        .tempfile()?
        .into_temp_path();

    rgb.save_with_format(&dest, ImageFormat::Jpeg)
        .map_err(|e| SleuthError::ImageLoad(format!("一時画像の保存に失敗: {}", e)))?;

    tracing::debug!(path = %dest.display(), "prepared image");
    Ok(PreparedImage { path: dest })
}

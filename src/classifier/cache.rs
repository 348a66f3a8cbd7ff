//! 判定結果キャッシュモジュール
//!
//! 元画像のSHA-256ハッシュをキーにしてトーンラベルをキャッシュし、
//! 同じ画像の再判定をスキップする。キャッシュするのは判定成功のみ。

use super::ToneClassifier;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use skin_sleuth_common::ClassifierOutcome;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const CACHE_FILE_NAME: &str = "tone-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 画像ハッシュ → 判定結果
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub tone_label: String,
    pub classified_at: DateTime<Utc>,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（壊れていれば空で開始）
    pub fn load(dir: &Path) -> Self {
        let cache_path = Self::cache_path(dir);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, CacheFile>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                tracing::warn!(path = %cache_path.display(), "cache version mismatch, starting fresh");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "cache unreadable, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let file = File::create(Self::cache_path(dir))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（存在しなければ false）
    pub fn clear(dir: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(dir);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, hash: &str) -> Option<&CacheEntry> {
        self.entries.get(hash)
    }

    pub fn insert(&mut self, hash: String, file_name: String, tone_label: String) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                tone_label,
                classified_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}

/// キャッシュ付き判定器
pub struct CachedClassifier<C> {
    inner: C,
    dir: PathBuf,
    cache: Mutex<CacheFile>,
}

impl<C: ToneClassifier> CachedClassifier<C> {
    pub fn new(inner: C, dir: PathBuf) -> Self {
        let cache = CacheFile::load(&dir);
        Self {
            inner,
            dir,
            cache: Mutex::new(cache),
        }
    }

    fn lookup(&self, hash: &str) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(hash).map(|entry| entry.tone_label.clone())
    }

    fn store(&self, hash: String, image: &Path, tone_label: &str) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        cache.insert(hash, file_name, tone_label.to_string());
        if let Err(e) = cache.save(&self.dir) {
            tracing::warn!(error = %e, "failed to save tone cache");
        }
    }
}

impl<C: ToneClassifier> ToneClassifier for CachedClassifier<C> {
    async fn classify(&self, image: &Path) -> ClassifierOutcome {
        self.inner.classify(image).await
    }

    /// 元画像のハッシュで引き、ヒットすれば前処理も判定もしない
    async fn classify_source(&self, source: &Path, max_image_size: u32) -> ClassifierOutcome {
        let hash = match compute_file_hash(source) {
            Ok(h) => Some(h),
            Err(e) => {
                // ハッシュ計算失敗時はキャッシュを使わない
                tracing::debug!(error = %e, "hash failed, bypassing cache");
                None
            }
        };

        if let Some(tone_label) = hash.as_deref().and_then(|h| self.lookup(h)) {
            tracing::debug!(%tone_label, "tone cache hit");
            return ClassifierOutcome::Detected { tone_label };
        }

        let outcome = self.inner.classify_source(source, max_image_size).await;

        if let (Some(hash), ClassifierOutcome::Detected { tone_label }) = (hash, &outcome) {
            self.store(hash, source, tone_label);
        }

        outcome
    }

    fn unavailable_reason(&self) -> Option<&str> {
        self.inner.unavailable_reason()
    }
}

//! キャッシュ機能テスト
//!
//! 判定結果キャッシュの動作を検証

use skin_sleuth::classifier::cache::{compute_file_hash, CacheFile};
use tempfile::tempdir;

/// 空のキャッシュファイル
#[test]
fn test_cache_file_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = CacheFile::load(dir.path());

    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

/// キャッシュの保存と読み込み
#[test]
fn test_cache_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    cache.insert("abc123".to_string(), "selfie.jpg".to_string(), "Fair".to_string());
    cache.save(dir.path()).expect("キャッシュ保存失敗");

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);

    let cached = loaded.get("abc123").expect("キャッシュが見つからない");
    assert_eq!(cached.file_name, "selfie.jpg");
    assert_eq!(cached.tone_label, "Fair");
}

/// キャッシュヒット判定
#[test]
fn test_cache_hit() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    let hash = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    cache.insert(hash.to_string(), "cached.jpg".to_string(), "Light".to_string());

    assert!(cache.get(hash).is_some());
    assert!(cache.get("nonexistent_hash").is_none());
}

/// 壊れたキャッシュファイルは空として扱う
#[test]
fn test_corrupted_cache_starts_fresh() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(CacheFile::cache_path(dir.path()), "{ not json").unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// バージョン不一致は空として扱う
#[test]
fn test_version_mismatch_starts_fresh() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        CacheFile::cache_path(dir.path()),
        r#"{"version": 99, "entries": {"h": {"file_name": "a.jpg", "tone_label": "Fair", "classified_at": "2026-01-01T00:00:00Z"}}}"#,
    )
    .unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// キャッシュ削除
#[test]
fn test_cache_clear() {
    let dir = tempdir().expect("Failed to create temp dir");

    assert!(!CacheFile::clear(dir.path()).unwrap());

    let mut cache = CacheFile::default();
    cache.insert("h".to_string(), "a.jpg".to_string(), "Dark".to_string());
    cache.save(dir.path()).unwrap();

    assert!(CacheFile::clear(dir.path()).unwrap());
    assert!(!CacheFile::cache_path(dir.path()).exists());
}

/// 同じ内容のファイルは同じハッシュ
#[test]
fn test_file_hash_depends_on_content() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = dir.path().join("a.jpg");
    let b = dir.path().join("b.jpg");
    let c = dir.path().join("c.jpg");
    std::fs::write(&a, b"same bytes").unwrap();
    std::fs::write(&b, b"same bytes").unwrap();
    std::fs::write(&c, b"other bytes").unwrap();

    let hash_a = compute_file_hash(&a).unwrap();
    assert_eq!(hash_a.len(), 64);
    assert_eq!(hash_a, compute_file_hash(&b).unwrap());
    assert_ne!(hash_a, compute_file_hash(&c).unwrap());
}

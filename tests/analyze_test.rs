//! 解析ワークフローの統合テスト
//!
//! 判定器をフェイクに差し替えて、状態ごとの分岐と照合の有無を検証

use image::{Rgb, RgbImage};
use skin_sleuth::analyzer::{analyze, AnalysisRequest};
use skin_sleuth::classifier::cache::compute_file_hash;
use skin_sleuth::classifier::{CacheFile, CachedClassifier, ClassifierHandle, ToneClassifier};
use skin_sleuth_common::{
    AnalysisReport, Catalog, Catalogs, ClassifierOutcome, Concern, MakeupProduct, MatchStatus,
    Matcher, SkinType, SkincareProduct,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::{tempdir, TempDir};

struct FakeClassifier {
    outcome: ClassifierOutcome,
    calls: AtomicUsize,
}

impl FakeClassifier {
    fn new(outcome: ClassifierOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ToneClassifier for FakeClassifier {
    async fn classify(&self, image: &Path) -> ClassifierOutcome {
        assert!(image.exists(), "前処理済み画像が渡されていない");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

impl ToneClassifier for &FakeClassifier {
    async fn classify(&self, image: &Path) -> ClassifierOutcome {
        <FakeClassifier as ToneClassifier>::classify(*self, image).await
    }
}

fn catalogs() -> Catalogs {
    Catalogs::new(
        Catalog::<MakeupProduct>::from_csv_str(
            "brand,name,price,skin type,skin tone\n\
             Wardah,Colorfit Foundation,89000,Oily/Combination,Light\n\
             Emina,Bare With Me Cushion,75000,Dry,Fair\n",
        )
        .unwrap(),
        Catalog::<SkincareProduct>::from_csv_str(
            "brand,name,price,skin type,concern\n\
             Somethinc,Niacinamide Serum,120000,Oily,Acne\n\
             Avoskin,Miraculous Refining Toner,175000,Dry,Aging\n",
        )
        .unwrap(),
    )
}

/// テスト用の画像を作成
fn selfie(color: [u8; 3]) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("selfie.png");
    RgbImage::from_pixel(32, 32, Rgb(color)).save(&path).unwrap();
    (dir, path)
}

fn request(image: &Path, skin_type: SkinType, concern: Concern) -> AnalysisRequest<'_> {
    AnalysisRequest {
        image,
        skin_type,
        concern,
        max_image_size: 1024,
    }
}

#[tokio::test]
async fn detected_tone_produces_recommendation() {
    let (_dir, image) = selfie([201, 150, 118]);
    let fake = FakeClassifier::new(ClassifierOutcome::Detected {
        tone_label: "Light".into(),
    });

    let report = analyze(
        &fake,
        request(&image, SkinType::Oily, Concern::Acne),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    assert_eq!(fake.calls(), 1);
    let AnalysisReport::Recommended(rec) = report else {
        panic!("expected recommendation, got {:?}", report);
    };
    assert_eq!(rec.query.detected_tone.as_deref(), Some("Light"));
    assert_eq!(rec.makeup.records[0].name, "Colorfit Foundation");
    assert_eq!(rec.skincare.status, MatchStatus::ExactMatch);
}

#[tokio::test]
async fn dry_acne_uses_fallback() {
    let (_dir, image) = selfie([180, 120, 90]);
    let fake = FakeClassifier::new(ClassifierOutcome::Detected {
        tone_label: "Medium".into(),
    });

    let report = analyze(
        &fake,
        request(&image, SkinType::Dry, Concern::Acne),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    let AnalysisReport::Recommended(rec) = report else {
        panic!("expected recommendation");
    };
    assert_eq!(rec.skincare.status, MatchStatus::FallbackUsed);
    assert_eq!(rec.skincare.records[0].concern.as_deref(), Some("Aging"));
}

#[tokio::test]
async fn no_face_reports_status() {
    let (_dir, image) = selfie([10, 10, 10]);
    let fake = FakeClassifier::new(ClassifierOutcome::NoFaceDetected);

    let report = analyze(
        &fake,
        request(&image, SkinType::Oily, Concern::Acne),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    assert_eq!(report, AnalysisReport::NoFaceDetected);
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn unreadable_image_is_runtime_failure() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("broken.jpg");
    std::fs::write(&image, b"definitely not a jpeg").unwrap();
    let fake = FakeClassifier::new(ClassifierOutcome::NoFaceDetected);

    let report = analyze(
        &fake,
        request(&image, SkinType::Oily, Concern::Acne),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    assert!(matches!(report, AnalysisReport::ClassifierFailed(ref m) if m.contains("broken.jpg")));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn unavailable_classifier_short_circuits() {
    let handle = ClassifierHandle::Unavailable("stone: コマンドが見つかりません".into());

    // 画像が存在しなくても前処理に進まない
    let report = analyze(
        &handle,
        request(Path::new("/nonexistent/selfie.jpg"), SkinType::Oily, Concern::Acne),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    assert_eq!(
        report,
        AnalysisReport::ClassifierUnavailable("stone: コマンドが見つかりません".into())
    );
}

#[tokio::test]
async fn cached_classifier_skips_second_call() {
    let (_dir, image) = selfie([222, 184, 160]);
    let cache_dir = tempdir().unwrap();
    let fake = FakeClassifier::new(ClassifierOutcome::Detected {
        tone_label: "Fair".into(),
    });

    let cached = CachedClassifier::new(&fake, cache_dir.path().to_path_buf());
    let cats = catalogs();
    let matcher = Matcher::default();

    let first = analyze(&cached, request(&image, SkinType::Dry, Concern::Aging), &cats, &matcher).await;
    let second = analyze(&cached, request(&image, SkinType::Dry, Concern::Aging), &cats, &matcher).await;

    assert_eq!(first, second);
    assert_eq!(fake.calls(), 1);
    assert!(cache_dir.path().join("tone-cache.json").exists());
}

#[tokio::test]
async fn cached_classifier_does_not_store_failures() {
    let (_dir, image) = selfie([90, 60, 40]);
    let cache_dir = tempdir().unwrap();
    let fake = FakeClassifier::new(ClassifierOutcome::NoFaceDetected);

    let cached = CachedClassifier::new(&fake, cache_dir.path().to_path_buf());
    let cats = catalogs();
    let matcher = Matcher::default();

    analyze(&cached, request(&image, SkinType::Oily, Concern::Acne), &cats, &matcher).await;
    analyze(&cached, request(&image, SkinType::Oily, Concern::Acne), &cats, &matcher).await;

    assert_eq!(fake.calls(), 2);
    assert!(!cache_dir.path().join("tone-cache.json").exists());
}

#[tokio::test]
async fn cache_is_keyed_on_source_image() {
    let (_dir, image) = selfie([222, 184, 160]);
    let cache_dir = tempdir().unwrap();
    let fake = FakeClassifier::new(ClassifierOutcome::Detected {
        tone_label: "Fair".into(),
    });

    let cached = CachedClassifier::new(&fake, cache_dir.path().to_path_buf());
    analyze(
        &cached,
        request(&image, SkinType::Normal, Concern::Dullness),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    let cache = CacheFile::load(cache_dir.path());
    let entry = cache
        .get(&compute_file_hash(&image).unwrap())
        .expect("元画像のハッシュで保存されていない");
    assert_eq!(entry.file_name, "selfie.png");
    assert_eq!(entry.tone_label, "Fair");
}

#[tokio::test]
async fn cache_hit_skips_image_preparation() {
    // デコードできないファイルでも、キャッシュにあれば前処理せずに結果を返す
    let dir = tempdir().unwrap();
    let image = dir.path().join("undecodable.jpg");
    std::fs::write(&image, b"cached but not decodable").unwrap();

    let cache_dir = tempdir().unwrap();
    let mut cache = CacheFile::default();
    cache.insert(
        compute_file_hash(&image).unwrap(),
        "undecodable.jpg".into(),
        "Light".into(),
    );
    cache.save(cache_dir.path()).unwrap();

    let fake = FakeClassifier::new(ClassifierOutcome::NoFaceDetected);
    let cached = CachedClassifier::new(&fake, cache_dir.path().to_path_buf());
    let report = analyze(
        &cached,
        request(&image, SkinType::Oily, Concern::Acne),
        &catalogs(),
        &Matcher::default(),
    )
    .await;

    assert_eq!(fake.calls(), 0);
    let AnalysisReport::Recommended(rec) = report else {
        panic!("expected recommendation, got {:?}", report);
    };
    assert_eq!(rec.query.detected_tone.as_deref(), Some("Light"));
}

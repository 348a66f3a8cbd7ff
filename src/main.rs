use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use skin_sleuth::{analyzer, catalog, classifier, cli, config, error, export, photo, prompt, render};
use analyzer::AnalysisRequest;
use classifier::{CacheFile, CachedClassifier, ClassifierHandle};
use cli::{Cli, Commands};
use config::Config;
use error::SleuthError;
use skin_sleuth_common::{recommend, AnalysisReport, Catalogs, Matcher, Query};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Analyze { image, skin_type, concern, makeup_catalog, skincare_catalog, output, use_cache } => {
            println!("🌸 skin-sleuth - 肌トーン解析\n");

            if !image.is_file() {
                return Err(SleuthError::FileNotFound(image.display().to_string()).into());
            }
            if !photo::is_supported_image(&image) {
                return Err(SleuthError::ImageLoad(format!(
                    "未対応の画像形式です（jpg/jpeg/png）: {}",
                    image.display()
                ))
                .into());
            }

            let skin_type = prompt::skin_type_or_prompt(skin_type)?;
            let concern = prompt::concern_or_prompt(concern)?;

            // 1. カタログ読み込み
            println!("[1/3] カタログを読み込み中...");
            let catalogs = load_catalogs(&config, makeup_catalog, skincare_catalog)?;
            println!(
                "✔ メイクアップ {}件 / スキンケア {}件\n",
                catalogs.makeup.len(),
                catalogs.skincare.len()
            );

            // 2. 肌トーン判定＋照合
            println!("[2/3] 顔をスキャン中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let classifier = ClassifierHandle::initialize(&config).await;
            if let ClassifierHandle::Unavailable(reason) = &classifier {
                println!("⚠ 肌トーン判定を利用できません: {}", reason);
            }

            let request = AnalysisRequest {
                image: &image,
                skin_type,
                concern,
                max_image_size: config.max_image_size,
            };
            let matcher = Matcher::new(config.limits);

            let spinner = spinner("肌トーンを判定中...");
            let report = if use_cache {
                let cached = CachedClassifier::new(classifier, Config::cache_dir()?);
                analyzer::analyze(&cached, request, &catalogs, &matcher).await
            } else {
                analyzer::analyze(&classifier, request, &catalogs, &matcher).await
            };
            spinner.finish_and_clear();

            // 3. 結果表示
            println!("[3/3] 結果\n");
            render::print_report(&report);

            if let Some(output) = output {
                export::export_report(&report, Some(&image), &output)?;
                println!("\n✔ 結果を保存: {}", output.display());
            }
        }

        Commands::Match { skin_type, concern, tone, makeup_catalog, skincare_catalog, output } => {
            println!("🔍 skin-sleuth - 商品照合\n");

            let skin_type = prompt::skin_type_or_prompt(skin_type)?;
            let concern = prompt::concern_or_prompt(concern)?;
            let catalogs = load_catalogs(&config, makeup_catalog, skincare_catalog)?;

            let mut query = Query::new(skin_type, concern);
            if let Some(tone) = tone {
                query = query.with_tone(tone);
            }

            let report = AnalysisReport::Recommended(recommend(
                &catalogs,
                query,
                &Matcher::new(config.limits),
            ));
            render::print_report(&report);

            if let Some(output) = output {
                export::export_report(&report, None, &output)?;
                println!("\n✔ 結果を保存: {}", output.display());
            }
        }

        Commands::Catalog { makeup_catalog, skincare_catalog } => {
            let catalogs = load_catalogs(&config, makeup_catalog, skincare_catalog)?;

            println!("💄 メイクアップ: {}件", catalogs.makeup.len());
            println!("  肌タイプ: {}", catalogs.makeup.distinct_values(|p| p.skin_type.as_deref()).join(", "));
            println!("  肌トーン: {}", catalogs.makeup.distinct_values(|p| p.skin_tone.as_deref()).join(", "));
            println!("🧴 スキンケア: {}件", catalogs.skincare.len());
            println!("  肌タイプ: {}", catalogs.skincare.distinct_values(|p| p.skin_type.as_deref()).join(", "));
            println!("  肌悩み: {}", catalogs.skincare.distinct_values(|p| p.concern.as_deref()).join(", "));
        }

        Commands::Config { set_makeup_catalog, set_skincare_catalog, set_classifier, show } => {
            let mut config = config;

            if let Some(path) = set_makeup_catalog {
                config.set_makeup_catalog(path)?;
                println!("✔ メイクアップカタログを設定しました");
            }

            if let Some(path) = set_skincare_catalog {
                config.set_skincare_catalog(path)?;
                println!("✔ スキンケアカタログを設定しました");
            }

            if let Some(command) = set_classifier {
                config.set_classifier(command)?;
                println!("✔ 判定コマンドを設定しました");
            }

            if show {
                println!("設定 ({}):", Config::config_path()?.display());
                println!("  メイクアップカタログ: {}", config.makeup_catalog.display());
                println!("  スキンケアカタログ: {}", config.skincare_catalog.display());
                println!("  判定コマンド: {} {}", config.classifier_command, config.classifier_args.join(" "));
                if config.uses_default_classifier_args() {
                    println!(
                        "    ※ 引数は既定の仮形式です。判定コマンドの実際のオプションに合わせて\n       {} の classifier_args を設定してください（標準出力に {{\"faces\": [...]}} のJSON）",
                        Config::config_path()?.display()
                    );
                }
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  表示件数: {}件 (代替 {}件)", config.limits.primary, config.limits.fallback);
            }
        }

        Commands::Cache { clear, info } => {
            let cache_dir = Config::cache_dir()?;
            let cache_path = CacheFile::cache_path(&cache_dir);

            if info || !clear {
                if cache_path.exists() {
                    let cache = CacheFile::load(&cache_dir);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&cache_dir) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalogs(
    config: &Config,
    makeup: Option<PathBuf>,
    skincare: Option<PathBuf>,
) -> error::Result<Catalogs> {
    let makeup = makeup.unwrap_or_else(|| config.makeup_catalog.clone());
    let skincare = skincare.unwrap_or_else(|| config.skincare_catalog.clone());
    catalog::load_catalogs(&makeup, &skincare)
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

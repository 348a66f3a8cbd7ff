use clap::{Parser, Subcommand};
use skin_sleuth_common::{Concern, SkinType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skin-sleuth")]
#[command(about = "肌トーン判定と肌プロフィールによるコスメ推薦ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真から肌トーンを判定し、商品を推薦
    Analyze {
        /// 写真ファイル (jpg/jpeg/png)
        #[arg(required = true)]
        image: PathBuf,

        /// 肌タイプ (oily/dry/combination/normal/sensitive)。省略時は対話選択
        #[arg(short, long)]
        skin_type: Option<SkinType>,

        /// 主な肌悩み (acne/aging/dullness/sensitivity/general-care)。省略時は対話選択
        #[arg(short, long)]
        concern: Option<Concern>,

        /// メイクアップカタログ（省略時は設定値）
        #[arg(long)]
        makeup_catalog: Option<PathBuf>,

        /// スキンケアカタログ（省略時は設定値）
        #[arg(long)]
        skincare_catalog: Option<PathBuf>,

        /// 結果の保存先 (.json/.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// キャッシュを使用（同じ画像の再判定をスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 写真なしで肌プロフィールのみから商品を照合
    Match {
        /// 肌タイプ
        #[arg(short, long)]
        skin_type: Option<SkinType>,

        /// 主な肌悩み
        #[arg(short, long)]
        concern: Option<Concern>,

        /// 肌トーン（表示のみ）
        #[arg(short, long)]
        tone: Option<String>,

        /// メイクアップカタログ（省略時は設定値）
        #[arg(long)]
        makeup_catalog: Option<PathBuf>,

        /// スキンケアカタログ（省略時は設定値）
        #[arg(long)]
        skincare_catalog: Option<PathBuf>,

        /// 結果の保存先 (.json/.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// カタログの内容を確認
    Catalog {
        /// メイクアップカタログ（省略時は設定値）
        #[arg(long)]
        makeup_catalog: Option<PathBuf>,

        /// スキンケアカタログ（省略時は設定値）
        #[arg(long)]
        skincare_catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// メイクアップカタログを設定
        #[arg(long)]
        set_makeup_catalog: Option<PathBuf>,

        /// スキンケアカタログを設定
        #[arg(long)]
        set_skincare_catalog: Option<PathBuf>,

        /// 肌トーン判定コマンドを設定
        #[arg(long)]
        set_classifier: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 判定結果キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

//! Skin Sleuth
//!
//! 肌トーン判定（外部コマンド）とユーザーの肌プロフィールを組み合わせて、
//! メイクアップ・スキンケアの2つのカタログから商品を推薦する。

pub mod analyzer;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod photo;
pub mod prompt;
pub mod render;

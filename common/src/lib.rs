//! Skin Sleuth Common Library
//!
//! CLIから利用されるUI非依存の型・カタログ・照合ロジック

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod recommend;
pub mod types;

pub use catalog::{Catalog, CatalogRecord, Catalogs};
pub use classifier::{ClassifierOutcome, ClassifierReport, FaceReport};
pub use error::{Error, Result};
pub use matcher::{match_makeup, match_skincare, MatchLimits, MatchResult, MatchStatus, Matcher};
pub use parser::{extract_json, parse_classifier_response};
pub use recommend::{recommend, report_for_outcome, AnalysisReport, Recommendation};
pub use types::{Concern, MakeupProduct, Price, Query, SkinType, SkincareProduct};

//! Safety AI Common Library
//!
//! 作業安全評価のコア（副作用なし・同期処理のみ）:
//! - normalizer: テキスト正規化
//! - classifier: ハザード識別と信頼度
//! - risk: リスクスコア
//! - controls: 管理策選定

pub mod types;
pub mod error;
pub mod normalizer;
pub mod similarity;
pub mod taxonomy;
pub mod classifier;
pub mod risk;
pub mod controls;
pub mod layout;
pub mod export;

pub use types::{
    AssessmentResponse, ConfidenceLevel, ControlItem, ControlType, EvidenceEntry,
    HazardAnalysisResult, RiskLevel, RiskResult,
};
pub use error::{Error, Result};
pub use normalizer::normalize_text;
pub use taxonomy::{HazardCategory, HazardTaxonomy, TagOverride};
pub use classifier::HazardClassifier;
pub use risk::score_risk;
pub use controls::{ControlRule, ControlSelector};

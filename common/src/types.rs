//! 評価結果の型定義
//!
//! CLIとエクスポートで共有される型:
//! - HazardAnalysisResult: ハザード識別の出力
//! - RiskResult: リスク評価の出力
//! - ControlItem: 管理策（ヒエラルキー区分つき）
//! - AssessmentResponse: 最終出力（識別+評価+管理策をマージ）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 信頼度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// スコアからレベルを判定（>75: High, >40: Medium）
    pub fn from_score(score: u8) -> Self {
        if score > 75 {
            ConfidenceLevel::High
        } else if score > 40 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// リスクレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// リスクスコアからレベルを判定（>=15: High, >=8: Medium）
    pub fn from_score(score: u8) -> Self {
        if score >= 15 {
            RiskLevel::High
        } else if score >= 8 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 管理策のヒエラルキー区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    Engineering,
    Substitution,
    Administrative,
    #[serde(rename = "PPE")]
    Ppe,
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlType::Engineering => write!(f, "Engineering"),
            ControlType::Substitution => write!(f, "Substitution"),
            ControlType::Administrative => write!(f, "Administrative"),
            ControlType::Ppe => write!(f, "PPE"),
        }
    }
}

/// 管理策
///
/// 複数ハザードにまたがる集約時は (区分, 説明) の組で同一判定する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlItem {
    #[serde(rename = "type")]
    pub control_type: ControlType,
    pub description: String,
}

impl ControlItem {
    pub fn new(control_type: ControlType, description: impl Into<String>) -> Self {
        Self {
            control_type,
            description: description.into(),
        }
    }
}

/// ハザード判定の根拠
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EvidenceEntry {
    /// 正規化テキストにキーワードが含まれていた
    Keyword { keyword: String },
    /// 語句・タグがキーワードに近似一致した
    Fuzzy {
        term: String,
        keyword: String,
        similarity: f64,
    },
    /// 画像タグによる強制判定
    VisualTag { tag: String, description: String },
}

impl fmt::Display for EvidenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceEntry::Keyword { keyword } => write!(f, "Keyword '{}' found in text", keyword),
            EvidenceEntry::Fuzzy { term, keyword, .. } => {
                write!(f, "Fuzzy match '{}' (for '{}')", term, keyword)
            }
            EvidenceEntry::VisualTag { description, .. } => write!(f, "{}", description),
        }
    }
}

/// ハザード識別結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardAnalysisResult {
    /// ハザードラベル（重複なし、初出順）
    pub hazards: Vec<String>,
    /// 信頼度スコア (0-99)
    pub confidence_score: u8,
    pub confidence_level: ConfidenceLevel,
    pub normalized_text: String,
    /// 判定根拠（カテゴリ走査順）
    pub evidence: Vec<EvidenceEntry>,
    pub reasoning: String,
}

/// リスク評価結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub likelihood: u8,
    pub severity: u8,
    pub score: u8,
    pub level: RiskLevel,
}

/// 安全評価の最終出力
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentResponse {
    /// 参照番号（入力のハッシュから生成）
    pub reference: String,

    /// 評価日時
    pub assessed_at: String,

    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub likelihood: u8,
    pub severity: u8,

    pub hazards: Vec<String>,
    pub controls: Vec<ControlItem>,

    pub confidence: ConfidenceLevel,
    pub confidence_score: u8,

    pub reasoning: String,

    /// 正規化済みの作業説明
    pub description: String,

    pub evidence: Vec<String>,

    /// 画像解析（模擬）で検出したタグ
    pub image_tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(76), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(75), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(41), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(40), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(10), ConfidenceLevel::Low);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(15), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(14), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(8), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(7), RiskLevel::Low);
    }

    #[test]
    fn test_control_item_serialization() {
        let item = ControlItem::new(ControlType::Ppe, "Hard hat");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"type":"PPE","description":"Hard hat"}"#);

        let parsed: ControlItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_evidence_display() {
        let keyword = EvidenceEntry::Keyword { keyword: "fire".into() };
        assert_eq!(keyword.to_string(), "Keyword 'fire' found in text");

        let fuzzy = EvidenceEntry::Fuzzy {
            term: "slipery".into(),
            keyword: "slippery".into(),
            similarity: 0.93,
        };
        assert_eq!(fuzzy.to_string(), "Fuzzy match 'slipery' (for 'slippery')");
    }

    #[test]
    fn test_assessment_response_defaults_on_partial_json() {
        let json = r#"{"riskScore": 12, "riskLevel": "Medium", "hazards": ["Fire Hazard"]}"#;
        let response: AssessmentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.risk_score, 12);
        assert_eq!(response.risk_level, RiskLevel::Medium);
        assert_eq!(response.confidence, ConfidenceLevel::Low);
        assert!(response.controls.is_empty());
    }
}

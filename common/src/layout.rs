//! レポートレイアウト定義
//!
//! PDF・Excelで共通の項目定義（ラベルと表示順）。

use crate::types::AssessmentResponse;

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白設定（mm）
pub const MARGIN_MM: f32 = 15.0;

/// 行送り（mm）
pub const LINE_HEIGHT_MM: f32 = 5.5;

/// 1行あたりの最大文字数（Helvetica 10pt 想定）
pub const WRAP_COLUMNS: usize = 95;

/// 概要欄に表示するフィールド
#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub label: &'static str,
}

/// 概要欄フィールド（表示順）
pub const SUMMARY_FIELDS: &[FieldDefinition] = &[
    FieldDefinition { key: "reference", label: "Reference" },
    FieldDefinition { key: "assessedAt", label: "Assessed At" },
    FieldDefinition { key: "riskLevel", label: "Risk Level" },
    FieldDefinition { key: "riskScore", label: "Risk Score" },
    FieldDefinition { key: "likelihood", label: "Likelihood" },
    FieldDefinition { key: "severity", label: "Severity" },
    FieldDefinition { key: "confidence", label: "Confidence" },
    FieldDefinition { key: "hazards", label: "Hazards" },
    FieldDefinition { key: "description", label: "Activity" },
    FieldDefinition { key: "reasoning", label: "Reasoning" },
];

/// 管理策一覧の列見出し
pub const CONTROL_COLUMNS: &[&str] = &["Reference", "Hierarchy", "Control Measure"];

/// フィールド値を表示用文字列で取得（空は "-"）
pub fn field_value(response: &AssessmentResponse, key: &str) -> String {
    let value = match key {
        "reference" => response.reference.clone(),
        "assessedAt" => response.assessed_at.clone(),
        "riskLevel" => response.risk_level.to_string(),
        "riskScore" => format!("{} / 25", response.risk_score),
        "likelihood" => response.likelihood.to_string(),
        "severity" => response.severity.to_string(),
        "confidence" => format!("{} ({}%)", response.confidence, response.confidence_score),
        "hazards" => response.hazards.join(", "),
        "description" => response.description.clone(),
        "reasoning" => response.reasoning.clone(),
        _ => String::new(),
    };

    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// 固定幅で折り返す（語の途中では切らない。長すぎる語のみ強制分割）
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfidenceLevel, RiskLevel};

    #[test]
    fn test_field_value_defaults() {
        let response = AssessmentResponse::default();
        assert_eq!(field_value(&response, "reference"), "-");
        assert_eq!(field_value(&response, "hazards"), "-");
        assert_eq!(field_value(&response, "unknown"), "-");
        assert_eq!(field_value(&response, "riskLevel"), "Low");
    }

    #[test]
    fn test_field_value_formats() {
        let response = AssessmentResponse {
            risk_score: 20,
            risk_level: RiskLevel::High,
            confidence: ConfidenceLevel::Medium,
            confidence_score: 60,
            hazards: vec!["Fire Hazard".into(), "Thermal Burn".into()],
            ..Default::default()
        };
        assert_eq!(field_value(&response, "riskScore"), "20 / 25");
        assert_eq!(field_value(&response, "confidence"), "Medium (60%)");
        assert_eq!(field_value(&response, "hazards"), "Fire Hazard, Thermal Burn");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("short", 10), vec!["short"]);
        assert_eq!(wrap_text("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }
}

//! 評価オーケストレーションの統合テスト

use safety_ai_rust::assessment::{
    AssessmentRequest, Assessor, PENDING_TRANSCRIPTION_HAZARD, UNSPECIFIED_HAZARD,
};
use safety_ai_common::{ConfidenceLevel, RiskLevel};
use std::collections::HashSet;

fn assessor() -> Assessor {
    Assessor::default()
}

#[test]
fn test_text_and_fire_image() {
    let request = AssessmentRequest::from_text("Welding steel beams in a confined space with sparks")
        .with_image("Weld_Bay_01.jpg");
    let response = assessor().assess(&request);

    assert!(response.hazards.contains(&"Fire Hazard".to_string()));
    assert!(response.hazards.contains(&"Asphyxiation".to_string()));
    assert_eq!(response.image_tags, vec!["Fire", "Smoke", "Sparks", "High Temperature"]);
    // 複数カテゴリ + 画像あり + 補正 30 → 上限 99
    assert_eq!(response.confidence_score, 99);
    assert_eq!(response.confidence, ConfidenceLevel::High);
    assert!(response.reference.starts_with("HIRA-"));
}

#[test]
fn test_low_quality_image_lowers_confidence() {
    let plain = assessor().assess(&AssessmentRequest::from_text("the floor is slipery"));
    let dark = assessor().assess(&AssessmentRequest::from_text("the floor is slipery").with_image("dark.jpg"));

    assert_eq!(plain.confidence_score, 45);
    assert_eq!(dark.confidence_score, 45 + 15 - 10);
}

#[test]
fn test_audio_without_text_is_pending() {
    let response = assessor().assess(&AssessmentRequest::default().with_audio("memo.wav"));

    assert_eq!(response.hazards, vec![PENDING_TRANSCRIPTION_HAZARD]);
    assert_eq!(response.confidence, ConfidenceLevel::Low);
    assert_eq!(response.confidence_score, 30);
    // 情報不明確 → 4 x 4
    assert_eq!((response.likelihood, response.severity), (4, 4));
    assert_eq!(response.risk_level, RiskLevel::High);
    // 汎用2件 + 高リスク2件
    assert_eq!(response.controls.len(), 4);
}

#[test]
fn test_empty_request_is_unspecified() {
    let response = assessor().assess(&AssessmentRequest::default());

    assert_eq!(response.hazards, vec![UNSPECIFIED_HAZARD]);
    assert_eq!(response.confidence, ConfidenceLevel::Low);
    assert_eq!(response.confidence_score, 20);
    assert!(response.evidence.is_empty());
}

#[test]
fn test_fatal_keywords_raise_severity() {
    let response = assessor().assess(&AssessmentRequest::from_text("risk of explosion near the tank"));

    assert_eq!(response.severity, 5);
    assert_eq!(response.risk_score, 15);
    assert_eq!(response.risk_level, RiskLevel::High);
}

#[test]
fn test_minor_keywords_adjust_ratings() {
    let response = assessor().assess(&AssessmentRequest::from_text("the floor is slipery"));

    assert_eq!(response.hazards[0], "Slip/Trip Hazard");
    assert_eq!((response.likelihood, response.severity), (4, 2));
    assert_eq!(response.risk_score, 8);
    assert_eq!(response.risk_level, RiskLevel::Medium);
}

#[test]
fn test_missing_controls_raise_likelihood() {
    let request = AssessmentRequest::from_text("the floor is slipery").with_missing_controls(true);
    let response = assessor().assess(&request);

    assert_eq!((response.likelihood, response.severity), (5, 2));
    assert_eq!(response.risk_score, 10);
}

#[test]
fn test_custom_base_ratings() {
    let assessor = Assessor::default().with_base_ratings(2, 2);
    let response = assessor.assess(&AssessmentRequest::from_text("hot work on the roof"));

    assert_eq!(response.confidence, ConfidenceLevel::Medium);
    assert_eq!((response.likelihood, response.severity), (2, 2));
    assert_eq!(response.risk_level, RiskLevel::Low);
}

#[test]
fn test_controls_are_deduplicated() {
    let request = AssessmentRequest::from_text("Welding near fuel with sparks and flames")
        .with_image("fire.jpg")
        .with_missing_controls(true);
    let response = assessor().assess(&request);

    let unique: HashSet<_> = response.controls.iter().collect();
    assert_eq!(unique.len(), response.controls.len());
    assert!(response.controls.len() >= 4);
}

#[test]
fn test_identical_inputs_are_deterministic() {
    let request = AssessmentRequest::from_text("Goin up the stair, messy wire n no vent!")
        .with_image("messy_corridor.jpg");

    let a = assessor().assess(&request);
    let b = assessor().assess(&request);

    assert_eq!(a.reference, b.reference);
    assert_eq!(a.hazards, b.hazards);
    assert_eq!(a.risk_score, b.risk_score);
    assert_eq!(a.confidence_score, b.confidence_score);
    assert_eq!(a.controls, b.controls);
    assert_eq!(
        a.description,
        "going up the staircase cluttered electrical wiring and poor ventilation"
    );
}

#[test]
fn test_batch_preserves_order() {
    let requests: Vec<AssessmentRequest> = [
        "hot work in the yard",
        "chemical spill in store",
        "working on a ladder",
        "",
    ]
    .iter()
    .map(|t| AssessmentRequest::from_text(*t))
    .collect();

    let engine = assessor();
    let batch = engine.assess_batch(&requests);

    assert_eq!(batch.len(), requests.len());
    for (request, response) in requests.iter().zip(&batch) {
        assert_eq!(response.reference, engine.assess(request).reference);
    }
}

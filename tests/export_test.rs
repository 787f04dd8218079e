//! PDF/Excel/JSON出力の統合テスト

use safety_ai_rust::assessment::{AssessmentRequest, Assessor};
use safety_ai_rust::cli::ExportFormat;
use safety_ai_rust::error::SafetyAiError;
use safety_ai_rust::export::{self, excel, pdf};
use safety_ai_common::AssessmentResponse;
use tempfile::tempdir;

fn create_test_responses() -> Vec<AssessmentResponse> {
    let assessor = Assessor::default();
    let requests = vec![
        AssessmentRequest::from_text("Welding steel beams in a confined space with sparks")
            .with_image("weld_bay.jpg"),
        AssessmentRequest::from_text("Working at height on unstable scaffolding").with_missing_controls(true),
        AssessmentRequest::default().with_audio("memo.wav"),
    ];

    assessor
        .assess_batch(&requests)
        .into_iter()
        .map(|mut r| {
            r.assessed_at = "2026-01-18 09:00:00".to_string();
            r
        })
        .collect()
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.pdf");

    let result = pdf::generate_pdf(&create_test_responses(), &output_path, "Site Safety Report");
    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());

    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "PDFファイルが空");
}

#[test]
fn test_pdf_generation_long_text_pages() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("long.pdf");

    let mut responses = create_test_responses();
    responses[0].reasoning = "hot work near fuel storage ".repeat(400);

    let result = pdf::generate_pdf(&responses, &output_path, "Long Report");
    assert!(result.is_ok(), "改ページを含むPDF生成に失敗: {:?}", result.err());
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.xlsx");

    let result = excel::generate_excel(&create_test_responses(), &output_path, "Site Safety Report");
    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());

    let bytes = std::fs::read(&output_path).expect("Excel読み込み失敗");
    // xlsx は ZIP 形式
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_export_reports_both_into_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_dir = dir.path().join("reports");

    let written = export::export_reports(&create_test_responses(), &ExportFormat::Both, &output_dir, "HIRA")
        .expect("レポート出力に失敗");

    assert_eq!(written, vec![output_dir.join("HIRA.pdf"), output_dir.join("HIRA.xlsx")]);
    for path in written {
        assert!(path.exists(), "出力されていない: {}", path.display());
    }
}

#[test]
fn test_export_reports_rejects_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = export::export_reports(&[], &ExportFormat::Pdf, dir.path(), "HIRA");
    assert!(matches!(result, Err(SafetyAiError::InvalidInput(_))));
}

#[test]
fn test_json_write_and_read() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("out").join("assessments.json");
    let responses = create_test_responses();

    export::write_json(&responses, &path).expect("JSON保存に失敗");
    let loaded = export::read_json(&path).expect("JSON読み込みに失敗");

    assert_eq!(loaded.len(), responses.len());
    assert_eq!(loaded[0].reference, responses[0].reference);
    assert_eq!(loaded[1].controls, responses[1].controls);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"riskScore\""));
    assert!(content.contains("\"type\": \"PPE\""));
}

#[test]
fn test_read_single_object_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("single.json");
    let responses = create_test_responses();
    std::fs::write(&path, serde_json::to_string_pretty(&responses[0]).unwrap()).unwrap();

    let loaded = export::read_json(&path).expect("JSON読み込みに失敗");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].hazards, responses[0].hazards);
}

//! Excel生成（共通ライブラリ）
//!
//! layout.rs の定義を使用してHIRA台帳形式のExcelを生成

use crate::layout::{field_value, CONTROL_COLUMNS, SUMMARY_FIELDS};
use crate::types::{AssessmentResponse, RiskLevel};
use rust_xlsxwriter::*;

const SUMMARY_SHEET: &str = "Summary";
const CONTROLS_SHEET: &str = "Controls";

/// 列幅（文字数単位）
const NARROW_COL_WIDTH: f64 = 14.0;
const WIDE_COL_WIDTH: f64 = 48.0;

/// リスクレベルごとの背景色
fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::High => Color::RGB(0xF8CBAD),
        RiskLevel::Medium => Color::RGB(0xFFE699),
        RiskLevel::Low => Color::RGB(0xC6E0B4),
    }
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `responses` - 評価結果
/// * `title` - 文書タイトル（ブックのプロパティに設定）
pub fn generate_excel_buffer(responses: &[AssessmentResponse], title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_title(title);
    workbook.set_properties(&properties);

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xD9D9D9))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 概要シート: 1行 = 1評価
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SUMMARY_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, field) in SUMMARY_FIELDS.iter().enumerate() {
            let col = col as u16;
            let width = match field.key {
                "hazards" | "description" | "reasoning" => WIDE_COL_WIDTH,
                _ => NARROW_COL_WIDTH,
            };
            worksheet.set_column_width(col, width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
            worksheet.write_string_with_format(0, col, field.label, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }

        for (index, response) in responses.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, field) in SUMMARY_FIELDS.iter().enumerate() {
                let value = field_value(response, field.key);
                let format = if field.key == "riskLevel" {
                    value_format.clone().set_background_color(risk_color(response.risk_level))
                } else {
                    value_format.clone()
                };
                worksheet.write_string_with_format(row, col as u16, &value, &format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }

        worksheet.set_freeze_panes(1, 0)
            .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
    }

    // 管理策シート: 1行 = 1管理策
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(CONTROLS_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        let widths = [NARROW_COL_WIDTH + 4.0, NARROW_COL_WIDTH, WIDE_COL_WIDTH * 2.0];
        for (col, (label, width)) in CONTROL_COLUMNS.iter().zip(widths).enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
            worksheet.write_string_with_format(0, col, *label, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }

        let mut row: u32 = 1;
        for response in responses {
            let reference = field_value(response, "reference");
            for control in &response.controls {
                worksheet.write_string_with_format(row, 0, &reference, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
                worksheet.write_string_with_format(row, 1, control.control_type.to_string(), &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
                worksheet.write_string_with_format(row, 2, &control.description, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
                row += 1;
            }
        }

        worksheet.set_freeze_panes(1, 0)
            .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

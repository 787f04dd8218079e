//! Excel生成（CLI版）
//!
//! common の excel_core でバッファを作り、ファイルに書き出す

use crate::error::{Result, SafetyAiError};
use safety_ai_common::export::excel_core;
use safety_ai_common::AssessmentResponse;
use std::path::Path;

pub fn generate_excel(responses: &[AssessmentResponse], output_path: &Path, title: &str) -> Result<()> {
    let buffer = excel_core::generate_excel_buffer(responses, title)
        .map_err(SafetyAiError::ExcelGeneration)?;

    std::fs::write(output_path, buffer)
        .map_err(|e| SafetyAiError::ExcelGeneration(format!("ファイル保存エラー: {}", e)))?;

    Ok(())
}

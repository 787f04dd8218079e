pub mod pdf;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::{Result, SafetyAiError};
use safety_ai_common::AssessmentResponse;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join(format!("{}.pdf", title)),
            output.join(format!("{}.xlsx", title)),
        )
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        (
            parent.join(format!("{}.pdf", stem)),
            parent.join(format!("{}.xlsx", stem)),
        )
    }
}

/// レポートを出力し、生成したファイルのパスを返す
pub fn export_reports(
    responses: &[AssessmentResponse],
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    if responses.is_empty() {
        return Err(SafetyAiError::InvalidInput("出力する評価結果がありません".into()));
    }

    // 拡張子なしのパスはディレクトリとして扱う
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::new();

    match format {
        ExportFormat::Pdf => {
            let path = output_path_for_format(output, title, "pdf");
            println!("- PDFを生成中...");
            pdf::generate_pdf(responses, &path, title)?;
            println!("✔ PDF出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, title, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(responses, &path, title)?;
            println!("✔ Excel出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Both => {
            let (pdf_path, excel_path) = output_paths_for_both(output, title);

            println!("- PDFを生成中...");
            pdf::generate_pdf(responses, &pdf_path, title)?;
            println!("✔ PDF出力: {}", pdf_path.display());

            println!("- Excelを生成中...");
            excel::generate_excel(responses, &excel_path, title)?;
            println!("✔ Excel出力: {}", excel_path.display());

            written.push(pdf_path);
            written.push(excel_path);
        }
    }

    Ok(written)
}

/// 評価結果をJSONで保存
pub fn write_json(responses: &[AssessmentResponse], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(responses)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 評価結果JSONを読み込む（1件のオブジェクトまたは配列）
pub fn read_json(path: &Path) -> Result<Vec<AssessmentResponse>> {
    if !path.exists() {
        return Err(SafetyAiError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let responses = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory() {
        let path = output_path_for_format(Path::new("reports"), "HIRA", "pdf");
        assert_eq!(path, PathBuf::from("reports").join("HIRA.pdf"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/site.pdf"), "HIRA", "pdf");
        assert_eq!(path, PathBuf::from("out/site.pdf"));
    }

    #[test]
    fn test_output_paths_for_both_from_file() {
        let (pdf, xlsx) = output_paths_for_both(Path::new("out/site.pdf"), "HIRA");
        assert_eq!(pdf, Path::new("out").join("site.pdf"));
        assert_eq!(xlsx, Path::new("out").join("site.xlsx"));
    }
}

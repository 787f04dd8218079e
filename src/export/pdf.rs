//! PDF生成
//!
//! 1評価 = 1ページ以上。概要欄・根拠・管理策を組み込みフォント（Helvetica）で出力する。
//! 行が下余白に達したら改ページする。

use crate::error::{Result, SafetyAiError};
use printpdf::*;
use safety_ai_common::layout::{
    field_value, wrap_text, A4_HEIGHT_MM, A4_WIDTH_MM, LINE_HEIGHT_MM, MARGIN_MM, SUMMARY_FIELDS,
    WRAP_COLUMNS,
};
use safety_ai_common::AssessmentResponse;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const TITLE_FONT_SIZE: f32 = 16.0;
const HEADING_FONT_SIZE: f32 = 12.0;
const BODY_FONT_SIZE: f32 = 10.0;

/// ラベル列の幅（mm）
const LABEL_WIDTH_MM: f32 = 32.0;
/// 値列の折り返し文字数
const VALUE_COLUMNS: usize = 75;

/// ページ送りしながらテキストを書き込むカーソル
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    y: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        layer: PdfLayerReference,
        regular: &'a IndirectFontRef,
        bold: &'a IndirectFontRef,
    ) -> Self {
        Self {
            doc,
            layer,
            regular,
            bold,
            y: A4_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        }
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(A4_WIDTH_MM),
            Mm(A4_HEIGHT_MM),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = A4_HEIGHT_MM - MARGIN_MM;
    }

    /// 残り高さが足りなければ改ページ
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_MM {
            self.new_page();
        }
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.ensure_space(LINE_HEIGHT_MM * 2.0);
        self.y -= LINE_HEIGHT_MM;
        self.layer.use_text(text, size, Mm(MARGIN_MM), Mm(self.y), self.bold);
        self.y -= LINE_HEIGHT_MM * 0.5;
    }

    fn line(&mut self, text: &str, x: f32) {
        self.ensure_space(LINE_HEIGHT_MM);
        self.y -= LINE_HEIGHT_MM;
        self.layer.use_text(text, BODY_FONT_SIZE, Mm(x), Mm(self.y), self.regular);
    }

    /// ラベル + 折り返した値
    fn field(&mut self, label: &str, value: &str) {
        let lines = wrap_text(value, VALUE_COLUMNS);
        for (index, line) in lines.iter().enumerate() {
            self.ensure_space(LINE_HEIGHT_MM);
            self.y -= LINE_HEIGHT_MM;
            if index == 0 {
                self.layer.use_text(label, BODY_FONT_SIZE, Mm(MARGIN_MM), Mm(self.y), self.bold);
            }
            self.layer.use_text(
                line.as_str(),
                BODY_FONT_SIZE,
                Mm(MARGIN_MM + LABEL_WIDTH_MM),
                Mm(self.y),
                self.regular,
            );
        }
    }

    fn paragraph(&mut self, text: &str, indent: f32) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.line(&line, MARGIN_MM + indent);
        }
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT_MM * 0.5;
    }
}

/// 評価結果をPDFに出力
pub fn generate_pdf(responses: &[AssessmentResponse], output_path: &Path, title: &str) -> Result<()> {
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| SafetyAiError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SafetyAiError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;

    let layer = doc.get_page(page1).get_layer(layer1);
    let mut writer = PageWriter::new(&doc, layer, &regular, &bold);

    for (index, response) in responses.iter().enumerate() {
        if index > 0 {
            writer.new_page();
        }

        writer.heading(title, TITLE_FONT_SIZE);
        writer.gap();

        for field in SUMMARY_FIELDS {
            writer.field(field.label, &field_value(response, field.key));
        }

        if !response.evidence.is_empty() {
            writer.gap();
            writer.heading("Evidence", HEADING_FONT_SIZE);
            for entry in &response.evidence {
                writer.paragraph(&format!("- {}", entry), 2.0);
            }
        }

        if !response.image_tags.is_empty() {
            writer.gap();
            writer.heading("Image Tags", HEADING_FONT_SIZE);
            writer.paragraph(&response.image_tags.join(", "), 2.0);
        }

        writer.gap();
        writer.heading("Control Measures", HEADING_FONT_SIZE);
        for control in &response.controls {
            writer.paragraph(
                &format!("[{}] {}", control.control_type, control.description),
                2.0,
            );
        }
    }

    log::debug!("PDFページ数: {}", writer.pages);

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| SafetyAiError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;

    Ok(())
}

//! ハザード識別モジュール
//!
//! 正規化テキストと画像タグを分類表と照合し、ハザード・根拠・信頼度を求める。
//!
//! ## 判定順序
//! 1. カテゴリを表の順に走査し、キーワードごとに
//!    - 正規化テキストへの部分一致
//!    - 語・タグとの近似一致（類似度0.8以上）
//!    を試す。最初に一致したキーワードでそのカテゴリは確定
//! 2. タグ単独の強制判定（火災・散乱）
//! 3. 根拠件数から信頼度を算出

use crate::normalizer::{normalize_text, tokenize};
use crate::similarity::best_match;
use crate::taxonomy::{HazardCategory, HazardTaxonomy};
use crate::types::{ConfidenceLevel, EvidenceEntry, HazardAnalysisResult};

/// 近似一致の閾値
pub const FUZZY_CUTOFF: f64 = 0.8;

/// ハザード未検出時の信頼度
const NO_HAZARD_SCORE: u8 = 10;
const NO_HAZARD_REASONING: &str = "No specific safety keywords or hazards identified in input.";

const BASE_SCORE: u32 = 30;
const PER_EVIDENCE_SCORE: u32 = 15;
const MULTIMODAL_BONUS: u32 = 15;
const MAX_SCORE: u32 = 99;

/// 理由文に引用する根拠の件数
const REASONING_EVIDENCE_LIMIT: usize = 3;

/// ハザード分類器
#[derive(Debug, Clone, Default)]
pub struct HazardClassifier {
    taxonomy: HazardTaxonomy,
}

impl HazardClassifier {
    pub fn new(taxonomy: HazardTaxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &HazardTaxonomy {
        &self.taxonomy
    }

    /// 生テキストを正規化してから識別する
    pub fn normalize_and_classify(&self, text: &str, tags: &[String]) -> HazardAnalysisResult {
        let normalized = normalize_text(text);
        self.classify(&normalized, tags, !text.is_empty())
    }

    /// 正規化済みテキストとタグから識別する
    ///
    /// `has_text` は元の入力テキストが空でなかったか（マルチモーダル加点の判定用）。
    pub fn classify(&self, normalized: &str, tags: &[String], has_text: bool) -> HazardAnalysisResult {
        let lowered_tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();

        // 検索語: テキストの語 → タグ（タグは1件で1語扱い）
        let search_terms: Vec<&str> = tokenize(normalized)
            .into_iter()
            .chain(lowered_tags.iter().map(|t| t.as_str()))
            .collect();

        let mut hazards: Vec<String> = Vec::new();
        let mut evidence: Vec<EvidenceEntry> = Vec::new();

        for category in &self.taxonomy.categories {
            if let Some(entry) = match_category(category, normalized, &search_terms) {
                log::debug!("カテゴリ一致: {} ({})", category.id, entry);
                evidence.push(entry);
                for hazard in &category.hazards {
                    push_unique(&mut hazards, hazard);
                }
            }
        }

        for (tag, lowered) in tags.iter().zip(&lowered_tags) {
            for tag_override in &self.taxonomy.tag_overrides {
                if tag_override.needles.iter().any(|n| lowered.contains(n.as_str())) {
                    log::debug!("タグ判定: {} -> {}", tag, tag_override.hazard);
                    push_unique(&mut hazards, &tag_override.hazard);
                    evidence.push(EvidenceEntry::VisualTag {
                        tag: tag.clone(),
                        description: tag_override.evidence.clone(),
                    });
                }
            }
        }

        let multimodal = has_text && !tags.is_empty();
        let (confidence_score, confidence_level, reasoning) = if hazards.is_empty() {
            (
                NO_HAZARD_SCORE,
                ConfidenceLevel::Low,
                NO_HAZARD_REASONING.to_string(),
            )
        } else {
            let score = confidence_score(evidence.len(), multimodal);
            (score, ConfidenceLevel::from_score(score), build_reasoning(&evidence))
        };

        HazardAnalysisResult {
            hazards,
            confidence_score,
            confidence_level,
            normalized_text: normalized.to_string(),
            evidence,
            reasoning,
        }
    }
}

/// カテゴリ内のキーワードを順に評価し、最初の一致を返す
fn match_category(
    category: &HazardCategory,
    normalized: &str,
    search_terms: &[&str],
) -> Option<EvidenceEntry> {
    for keyword in &category.keywords {
        if normalized.contains(keyword.as_str()) {
            return Some(EvidenceEntry::Keyword {
                keyword: keyword.clone(),
            });
        }

        if let Some((term, similarity)) =
            best_match(keyword, search_terms.iter().copied(), FUZZY_CUTOFF)
        {
            return Some(EvidenceEntry::Fuzzy {
                term: term.to_string(),
                keyword: keyword.clone(),
                similarity,
            });
        }
    }

    None
}

/// 信頼度スコア = min(99, 30 + 15×根拠件数 [+15 マルチモーダル])
fn confidence_score(evidence_count: usize, multimodal: bool) -> u8 {
    let count = u32::try_from(evidence_count).unwrap_or(u32::MAX);
    let mut score = BASE_SCORE.saturating_add(count.saturating_mul(PER_EVIDENCE_SCORE));
    if multimodal {
        score = score.saturating_add(MULTIMODAL_BONUS);
    }
    score.min(MAX_SCORE) as u8
}

fn build_reasoning(evidence: &[EvidenceEntry]) -> String {
    let cited: Vec<String> = evidence
        .iter()
        .take(REASONING_EVIDENCE_LIMIT)
        .map(|e| e.to_string())
        .collect();

    format!(
        "Analysis based on {} distinct hazard indicators: {}...",
        evidence.len(),
        cited.join(", ")
    )
}

fn push_unique(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|l| l == label) {
        labels.push(label.to_string());
    }
}

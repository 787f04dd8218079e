//! 安全評価オーケストレーション
//!
//! ## 処理フロー
//! 1. 画像解析（模擬）でタグと信頼度補正を得る
//! 2. ハザード識別（テキスト+タグ）
//! 3. 音声のみ・ハザードなしの場合の補完
//! 4. テキストから基準の発生可能性・重篤度を決めてリスク評価
//! 5. ハザードごとに管理策を選び、重複を除いて集約

mod types;

pub use types::AssessmentRequest;

use crate::config::Config;
use crate::error::Result;
use crate::vision;
use rayon::prelude::*;
use safety_ai_common::{
    score_risk, AssessmentResponse, ConfidenceLevel, ControlItem, ControlSelector,
    HazardClassifier, RiskLevel,
};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// 音声のみでテキストがない場合のハザード
pub const PENDING_TRANSCRIPTION_HAZARD: &str = "Pending Voice Transcription Analysis";
const PENDING_TRANSCRIPTION_SCORE: u8 = 30;

/// ハザードが1件も見つからない場合のハザード
pub const UNSPECIFIED_HAZARD: &str = "Unspecified Hazard (Further investigation required)";
const UNSPECIFIED_SCORE: u8 = 20;

/// 重篤度を最大にする語
const FATAL_TERMS: &[&str] = &["fatal", "death", "high voltage", "explosion", "crush"];
/// 軽傷・高頻度を示す語
const MINOR_TERMS: &[&str] = &["cut", "bruise", "slip", "minor"];

const MINOR_LIKELIHOOD: u8 = 4;
const MINOR_SEVERITY: u8 = 2;
const FATAL_SEVERITY: u8 = 5;

const MAX_CONFIDENCE: i32 = 99;

/// 評価エンジン
///
/// 分類表・管理策表は構築後に変更しないため、複数スレッドから同時に評価できる。
#[derive(Debug, Clone)]
pub struct Assessor {
    classifier: HazardClassifier,
    controls: ControlSelector,
    base_likelihood: u8,
    base_severity: u8,
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(HazardClassifier::default(), ControlSelector::builtin())
    }
}

impl Assessor {
    pub fn new(classifier: HazardClassifier, controls: ControlSelector) -> Self {
        let defaults = Config::default();
        Self {
            classifier,
            controls,
            base_likelihood: defaults.base_likelihood,
            base_severity: defaults.base_severity,
        }
    }

    /// 設定から構築（カスタム分類表・基準値を反映）
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = config.load_taxonomy()?;
        Ok(Self::new(HazardClassifier::new(taxonomy), ControlSelector::builtin())
            .with_base_ratings(config.base_likelihood, config.base_severity))
    }

    pub fn with_base_ratings(mut self, likelihood: u8, severity: u8) -> Self {
        self.base_likelihood = likelihood;
        self.base_severity = severity;
        self
    }

    pub fn classifier(&self) -> &HazardClassifier {
        &self.classifier
    }

    pub fn controls(&self) -> &ControlSelector {
        &self.controls
    }

    /// 1件評価する
    pub fn assess(&self, request: &AssessmentRequest) -> AssessmentResponse {
        // 1. 画像解析（模擬）
        let signal = request
            .image_name
            .as_deref()
            .map(vision::detect)
            .unwrap_or_default();

        // 2. ハザード識別
        let analysis = self.classifier.normalize_and_classify(&request.text, &signal.tags);

        let mut hazards = analysis.hazards.clone();
        let mut confidence = analysis.confidence_level;
        let mut confidence_score = (i32::from(analysis.confidence_score) + signal.confidence_boost)
            .clamp(0, MAX_CONFIDENCE) as u8;

        // 3. 補完
        if request.audio_name.is_some() && request.text.is_empty() {
            hazards.push(PENDING_TRANSCRIPTION_HAZARD.to_string());
            confidence = ConfidenceLevel::Low;
            confidence_score = PENDING_TRANSCRIPTION_SCORE;
        }

        if hazards.is_empty() {
            hazards.push(UNSPECIFIED_HAZARD.to_string());
            confidence = ConfidenceLevel::Low;
            confidence_score = UNSPECIFIED_SCORE;
        }

        // 4. リスク評価
        let (likelihood, severity) =
            base_ratings(&analysis.normalized_text, self.base_likelihood, self.base_severity);
        let risk = score_risk(
            likelihood,
            severity,
            confidence == ConfidenceLevel::Low,
            request.missing_controls,
            severity == FATAL_SEVERITY,
        );

        // 5. 管理策
        let controls = collect_controls(&self.controls, &hazards, risk.level);

        let reference = reference_id(request);
        log::info!(
            "評価完了: {} (リスク {} / {}, 信頼度 {} / {})",
            reference,
            risk.level,
            risk.score,
            confidence,
            confidence_score
        );

        AssessmentResponse {
            reference,
            assessed_at: String::new(),
            risk_score: risk.score,
            risk_level: risk.level,
            likelihood: risk.likelihood,
            severity: risk.severity,
            hazards,
            controls,
            confidence,
            confidence_score,
            reasoning: analysis.reasoning,
            description: analysis.normalized_text,
            evidence: analysis.evidence.iter().map(|e| e.to_string()).collect(),
            image_tags: signal.tags,
        }
    }

    /// 複数件を並列評価する（入力順を保持）
    pub fn assess_batch(&self, requests: &[AssessmentRequest]) -> Vec<AssessmentResponse> {
        self.assess_batch_with_progress(requests, || {})
    }

    /// 1件完了するごとに `on_done` を呼ぶ
    pub fn assess_batch_with_progress<F>(
        &self,
        requests: &[AssessmentRequest],
        on_done: F,
    ) -> Vec<AssessmentResponse>
    where
        F: Fn() + Sync,
    {
        requests
            .par_iter()
            .map(|request| {
                let response = self.assess(request);
                on_done();
                response
            })
            .collect()
    }
}

/// テキストから基準の (発生可能性, 重篤度) を決める
fn base_ratings(normalized: &str, likelihood: u8, severity: u8) -> (u8, u8) {
    if FATAL_TERMS.iter().any(|t| normalized.contains(t)) {
        (likelihood, FATAL_SEVERITY)
    } else if MINOR_TERMS.iter().any(|t| normalized.contains(t)) {
        (MINOR_LIKELIHOOD, MINOR_SEVERITY)
    } else {
        (likelihood, severity)
    }
}

/// ハザードごとに管理策を選び、(区分, 説明) の重複を除いて初出順に並べる
pub fn collect_controls(
    selector: &ControlSelector,
    hazards: &[String],
    level: RiskLevel,
) -> Vec<ControlItem> {
    let mut seen: HashSet<ControlItem> = HashSet::new();
    let mut controls = Vec::new();

    for hazard in hazards {
        for control in selector.select_for_level(hazard, level) {
            if seen.insert(control.clone()) {
                controls.push(control);
            }
        }
    }

    controls
}

/// 入力内容から参照番号を生成（同じ入力なら同じ番号）
pub fn reference_id(request: &AssessmentRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.text.as_bytes());
    hasher.update([0u8]);
    hasher.update(request.image_name.as_deref().unwrap_or("").as_bytes());
    hasher.update([0u8]);
    hasher.update(request.audio_name.as_deref().unwrap_or("").as_bytes());
    hasher.update([0u8]);
    hasher.update([u8::from(request.missing_controls)]);

    let digest = hex::encode(hasher.finalize());
    format!("HIRA-{}", &digest[..12])
}

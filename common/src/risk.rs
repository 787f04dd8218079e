//! リスク評価
//!
//! 発生可能性 × 重篤度 のマトリクス方式。情報不足・管理策欠如・死亡可能性に応じて
//! 保守側へ補正する。

use crate::types::{RiskLevel, RiskResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// リスクスコアを算出する
///
/// 補正順序:
/// 1. 情報不明確 → 発生可能性+1, 重篤度+1
/// 2. 管理策欠如 → 発生可能性+1
/// 3. 死亡可能性 → 重篤度を5に固定
///
/// 各値は補正ごとに5で頭打ち。範囲外の入力は補正前に 1..=5 に丸める。
pub fn score_risk(
    likelihood: u8,
    severity: u8,
    unclear: bool,
    missing_controls: bool,
    fatal_potential: bool,
) -> RiskResult {
    let mut likelihood = clamp_rating(likelihood);
    let mut severity = clamp_rating(severity);

    if unclear {
        likelihood = bump(likelihood);
        severity = bump(severity);
    }

    if missing_controls {
        likelihood = bump(likelihood);
    }

    if fatal_potential {
        severity = MAX_RATING;
    }

    let score = likelihood * severity;

    RiskResult {
        likelihood,
        severity,
        score,
        level: RiskLevel::from_score(score),
    }
}

fn clamp_rating(value: u8) -> u8 {
    value.clamp(MIN_RATING, MAX_RATING)
}

fn bump(value: u8) -> u8 {
    (value + 1).min(MAX_RATING)
}

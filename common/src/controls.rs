//! 管理策選定
//!
//! ハザードラベルから管理策のヒエラルキー（工学的対策・代替・管理的対策・保護具）を
//! 多層で選ぶ。規則は優先順のリストで、最初に一致した規則のみ採用する。

use crate::types::{ControlItem, ControlType, RiskLevel};

/// 高リスク時の追加条件（完全一致・大文字小文字区別）
pub const HIGH_RISK_LEVEL: &str = "High";

/// 選定規則: ラベル（小文字化）にいずれかの語が含まれれば一致
#[derive(Debug, Clone)]
pub struct ControlRule {
    pub name: String,
    pub terms: Vec<String>,
    pub controls: Vec<ControlItem>,
}

impl ControlRule {
    fn matches(&self, lowered_label: &str) -> bool {
        self.terms.iter().any(|t| lowered_label.contains(t.as_str()))
    }
}

/// 管理策セレクタ
///
/// 呼び出し間で状態を持たない。複数ハザードにまたがる重複除去は呼び出し側の責務。
#[derive(Debug, Clone)]
pub struct ControlSelector {
    rules: Vec<ControlRule>,
    fallback: Vec<ControlItem>,
    high_risk: Vec<ControlItem>,
}

impl Default for ControlSelector {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ControlSelector {
    pub fn new(rules: Vec<ControlRule>, fallback: Vec<ControlItem>, high_risk: Vec<ControlItem>) -> Self {
        Self {
            rules,
            fallback,
            high_risk,
        }
    }

    /// 組み込み規則
    pub fn builtin() -> Self {
        use ControlType::*;

        let rules = vec![
            rule(
                "fire_thermal",
                &["fire", "burn", "thermal", "explosion"],
                vec![
                    ControlItem::new(Engineering, "Install fire-resistant barriers and automated suppression systems."),
                    ControlItem::new(Administrative, "Implement Hot Work Permit system and continuous gas monitoring."),
                    ControlItem::new(Administrative, "Designate a dedicated Fire Watcher with firefighting training."),
                    ControlItem::new(Ppe, "Flame-retardant clothing (FRC), heat-resistant gloves, and face shield."),
                ],
            ),
            rule(
                "mechanical",
                &["mechanical", "machine", "moving", "grinding", "entrapment", "debris"],
                vec![
                    ControlItem::new(Engineering, "Install fixed physical guards and emergency stop buttons."),
                    ControlItem::new(Administrative, "Enforce Lock-Out Tag-Out (LOTO) procedures before maintenance."),
                    ControlItem::new(Administrative, "Operator competency verification/certification check."),
                    ControlItem::new(Ppe, "Impact-resistant goggles, cut-resistant gloves, and steel-toed boots."),
                ],
            ),
            rule(
                "chemical",
                &["chemical", "toxic", "respiratory", "inhalation", "fumes", "gas"],
                vec![
                    ControlItem::new(Engineering, "Ensure Local Exhaust Ventilation (LEV) is functioning at >0.5 m/s."),
                    ControlItem::new(Substitution, "Evaluate non-hazardous or water-based alternatives to current solvents."),
                    ControlItem::new(Administrative, "Ensure SDS (Safety Data Sheets) are accessible; perform spill response drill."),
                    ControlItem::new(Ppe, "Half-face respirator with P3/Multi-gas filters and chemical-resistant aprons/gloves."),
                ],
            ),
            rule(
                "falls_heights",
                &["fall", "height", "scaffold", "ladder", "drop", "stability"],
                vec![
                    ControlItem::new(Engineering, "Install certified collective protection (guardrails/toeboards)."),
                    ControlItem::new(Engineering, "Use debris netting or exclusion zones with physical barriers below."),
                    ControlItem::new(Administrative, "Daily inspection of scaffolding/ladders by a competent person."),
                    ControlItem::new(Ppe, "Class A full-body harness with shock-absorbing double lanyard attached to certified anchor points."),
                ],
            ),
            rule(
                "electrical",
                &["electric", "voltage", "wire", "shock", "arc"],
                vec![
                    ControlItem::new(Engineering, "Use Residual Current Devices (RCDs) or Ground Fault Circuit Interrupters (GFCIs)."),
                    ControlItem::new(Administrative, "Verify zero-energy state via 'Test-Before-Touch' protocol."),
                    ControlItem::new(Ppe, "Arc-rated (AR) clothing, insulated tools, and dielectric boots/gloves."),
                ],
            ),
            rule(
                "confined_space",
                &["confined", "asphyxiation", "oxygen", "air quality"],
                vec![
                    ControlItem::new(Engineering, "Forced mechanical ventilation for at least 30 minutes prior to entry."),
                    ControlItem::new(Administrative, "Pre-entry atmospheric testing; Standby Person/Attendant required at all times."),
                    ControlItem::new(Ppe, "Self-Contained Breathing Apparatus (SCBA) and tripod/winch for emergency retrieval."),
                ],
            ),
            rule(
                "environmental",
                &["slip", "trip", "noise", "vibration", "clutter"],
                vec![
                    ControlItem::new(Administrative, "Implement 'Housekeeping First' policy; clear walkways of cables/debris."),
                    ControlItem::new(Administrative, "Post 'Hearing Protection Required' signage; limit exposure time."),
                    ControlItem::new(Ppe, "High-grip footwear and dual hearing protection (earplugs + earmuffs)."),
                ],
            ),
        ];

        let fallback = vec![
            ControlItem::new(Administrative, "Conduct a pre-task Toolbox Talk (TBT) specifically for this activity."),
            ControlItem::new(Ppe, "Mandatory Site PPE: High-visibility vest, hard hat, and safety glasses."),
        ];

        let high_risk = vec![
            ControlItem::new(Administrative, "Stop Work Authority: Supervisor presence mandatory for the entire duration."),
            ControlItem::new(Administrative, "Emergency Response Plan (ERP) must be activated and verified before start."),
        ];

        Self::new(rules, fallback, high_risk)
    }

    pub fn rules(&self) -> &[ControlRule] {
        &self.rules
    }

    /// ハザード1件分の管理策を選ぶ
    ///
    /// `risk_level` が "High" と完全一致した場合のみ高リスク用の管理策を末尾に追加する。
    pub fn select_controls(&self, hazard: &str, risk_level: &str) -> Vec<ControlItem> {
        let lowered = hazard.to_lowercase();

        let mut controls = match self.rules.iter().find(|r| r.matches(&lowered)) {
            Some(rule) => {
                log::debug!("管理策規則: {} -> {}", hazard, rule.name);
                rule.controls.clone()
            }
            None => {
                log::debug!("管理策規則: {} -> fallback", hazard);
                self.fallback.clone()
            }
        };

        if risk_level == HIGH_RISK_LEVEL {
            controls.extend(self.high_risk.iter().cloned());
        }

        controls
    }

    /// 型付きのリスクレベルで選ぶ
    pub fn select_for_level(&self, hazard: &str, level: RiskLevel) -> Vec<ControlItem> {
        self.select_controls(hazard, level.as_str())
    }
}

fn rule(name: &str, terms: &[&str], controls: Vec<ControlItem>) -> ControlRule {
    ControlRule {
        name: name.to_string(),
        terms: terms.iter().map(|t| t.to_string()).collect(),
        controls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> ControlSelector {
        ControlSelector::builtin()
    }

    fn types(controls: &[ControlItem]) -> Vec<ControlType> {
        controls.iter().map(|c| c.control_type).collect()
    }

    #[test]
    fn test_fire_high_risk() {
        let controls = selector().select_controls("fire in work area", "High");
        assert_eq!(controls.len(), 6);
        assert_eq!(
            types(&controls),
            vec![
                ControlType::Engineering,
                ControlType::Administrative,
                ControlType::Administrative,
                ControlType::Ppe,
                ControlType::Administrative,
                ControlType::Administrative,
            ]
        );
        assert!(controls[0].description.contains("fire-resistant barriers"));
        assert!(controls[4].description.starts_with("Stop Work Authority"));
        assert!(controls[5].description.starts_with("Emergency Response Plan"));
    }

    #[test]
    fn test_fallback() {
        let controls = selector().select_controls("unrecognized hazard", "Low");
        assert_eq!(controls.len(), 2);
        assert_eq!(types(&controls), vec![ControlType::Administrative, ControlType::Ppe]);
    }

    #[test]
    fn test_high_level_is_case_sensitive() {
        assert_eq!(selector().select_controls("Fire Hazard", "high").len(), 4);
        assert_eq!(selector().select_controls("Fire Hazard", "HIGH").len(), 4);
        assert_eq!(selector().select_controls("Fire Hazard", "Medium").len(), 4);
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        let selector = selector();
        // "electrical fire" は電気より火災が優先
        let fire = selector.select_controls("Fire Hazard", "Low");
        assert_eq!(selector.select_controls("Electrical Fire", "Low"), fire);

        // "Flying Debris" は機械系
        let mechanical = selector.select_controls("Mechanical Injury", "Low");
        assert_eq!(selector.select_controls("Flying Debris", "Low"), mechanical);

        // "Structural Instability" は墜落系（stability）
        let falls = selector.select_controls("Fall from Height", "Low");
        assert_eq!(selector.select_controls("Structural Instability", "Low"), falls);
    }

    #[test]
    fn test_every_group_spans_multiple_tiers() {
        let selector = selector();
        for rule in selector.rules() {
            let first = rule.controls[0].control_type;
            assert!(
                rule.controls.iter().any(|c| c.control_type != first),
                "rule {} is single-tier",
                rule.name
            );
            assert!(rule.controls.iter().any(|c| c.control_type != ControlType::Ppe));
        }
    }

    #[test]
    fn test_builtin_labels_route_to_expected_groups() {
        let selector = selector();
        let cases = [
            ("Chemical Exposure", 4, ControlType::Substitution),
            ("Electric Shock", 3, ControlType::Engineering),
            ("Asphyxiation", 3, ControlType::Engineering),
            ("Poor Air Quality", 3, ControlType::Engineering),
            ("Slip/Trip Hazard", 3, ControlType::Administrative),
            ("Noise Induced Hearing Loss", 3, ControlType::Administrative),
        ];
        for (label, count, second_or_first) in cases {
            let controls = selector.select_controls(label, "Low");
            assert_eq!(controls.len(), count, "{}", label);
            assert!(controls.iter().any(|c| c.control_type == second_or_first), "{}", label);
        }
    }

    #[test]
    fn test_select_for_level() {
        let selector = selector();
        assert_eq!(
            selector.select_for_level("Arc Flash", RiskLevel::High),
            selector.select_controls("Arc Flash", "High")
        );
        assert_eq!(selector.select_for_level("Arc Flash", RiskLevel::High).len(), 5);
    }

    #[test]
    fn test_no_dedup_inside_selector() {
        let selector = selector();
        let first = selector.select_controls("Fire Hazard", "High");
        let second = selector.select_controls("Thermal Burn", "High");
        assert_eq!(first, second);
    }
}

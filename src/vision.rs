//! 画像解析（模擬）
//!
//! 実際の画像認識は行わず、ファイル名に含まれる語から検出タグと信頼度補正を決める。

/// 画像解析の出力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisionSignal {
    pub tags: Vec<String>,
    /// 信頼度スコアへの加算値（低画質は負）
    pub confidence_boost: i32,
}

struct VisionRule {
    needles: &'static [&'static str],
    tags: &'static [&'static str],
    boost: i32,
}

/// 優先順（最初の一致のみ採用）
const VISION_RULES: &[VisionRule] = &[
    VisionRule {
        needles: &["fire", "weld", "spark"],
        tags: &["Fire", "Smoke", "Sparks", "High Temperature"],
        boost: 30,
    },
    VisionRule {
        needles: &["height", "scaffold", "ladder"],
        tags: &["Height", "Open Edge", "Unstable Platform", "Fall Potential"],
        boost: 25,
    },
    VisionRule {
        needles: &["chemical", "acid", "leak", "drum"],
        tags: &["Chemical Spill", "Toxic Fumes", "Corrosive Material"],
        boost: 20,
    },
    VisionRule {
        needles: &["clutter", "messy", "dirt", "construction"],
        tags: &["Tripping Hazard", "Obstruction", "Poor Housekeeping"],
        boost: 15,
    },
    VisionRule {
        needles: &["dark", "blur"],
        tags: &["Low Visibility", "Unclear Environment"],
        boost: -10,
    },
];

const GENERIC_TAGS: &[&str] = &["Site environment", "General workspace"];
const GENERIC_BOOST: i32 = 5;

/// ファイル名から検出タグを推定
pub fn detect(file_name: &str) -> VisionSignal {
    let lowered = file_name.to_lowercase();

    let (tags, boost) = VISION_RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|n| lowered.contains(n)))
        .map(|rule| (rule.tags, rule.boost))
        .unwrap_or((GENERIC_TAGS, GENERIC_BOOST));

    log::debug!("画像解析(模擬): {} -> {:?}", file_name, tags);

    VisionSignal {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        confidence_boost: boost,
    }
}

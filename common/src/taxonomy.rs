//! ハザード分類表
//!
//! カテゴリごとのキーワードと出力ラベル、画像タグによる強制判定を定義する。
//! 起動時に一度だけ構築し、以後は変更しない（分類器へ所有権ごと渡す）。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// ハザードカテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardCategory {
    pub id: String,
    /// 照合キーワード（先頭から順に評価）
    pub keywords: Vec<String>,
    /// 一致時に追加するハザードラベル（全件）
    pub hazards: Vec<String>,
}

/// 画像タグによる強制判定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagOverride {
    /// タグ（小文字化後）にいずれかが含まれれば発火
    pub needles: Vec<String>,
    pub hazard: String,
    /// 根拠として記録する説明文
    pub evidence: String,
}

/// 分類表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardTaxonomy {
    pub categories: Vec<HazardCategory>,
    #[serde(default = "builtin_tag_overrides")]
    pub tag_overrides: Vec<TagOverride>,
}

impl Default for HazardTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HazardTaxonomy {
    /// 組み込みの分類表（7カテゴリ）
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                category(
                    "fire_hot",
                    &["fire", "spark", "flame", "heat", "hot", "welding", "grinding", "explosion", "burn"],
                    &["Fire Hazard", "Thermal Burn", "Explosion Risk"],
                ),
                category(
                    "mechanical",
                    &["machinery", "equipment", "grinding", "sharp", "blade", "moving parts", "crush", "pinch"],
                    &["Mechanical Injury", "Entrapment", "Flying Debris"],
                ),
                category(
                    "chemical_tox",
                    &["chemical", "acid", "toxic", "gas", "fumes", "solvent", "spill", "leak", "poison"],
                    &["Chemical Exposure", "Respiratory Irritation", "Toxic Inhalation"],
                ),
                category(
                    "height_fall",
                    &["height", "ladder", "scaffold", "roof", "fall", "drop", "climb", "unstable"],
                    &["Fall from Height", "Falling Objects", "Structural Instability"],
                ),
                category(
                    "electrical",
                    &["electrical", "wire", "shock", "voltage", "power", "circuit", "exposed", "cable"],
                    &["Electric Shock", "Arc Flash", "Electrical Fire"],
                ),
                category(
                    "confined",
                    &["confined", "tank", "pit", "narrow", "enclosure", "ventilation", "oxygen", "trapped"],
                    &["Asphyxiation", "Restricted Movement", "Poor Air Quality"],
                ),
                category(
                    "environmental",
                    &["lighting", "noise", "vibration", "slippery", "wet", "trip", "dust", "weather"],
                    &["Slip/Trip Hazard", "Noise Induced Hearing Loss", "Reduced Visibility"],
                ),
            ],
            tag_overrides: builtin_tag_overrides(),
        }
    }

    /// JSON文字列から読み込み
    ///
    /// キーワード・タグ条件は小文字に揃えたうえで検証する。
    pub fn from_json(json: &str) -> Result<Self> {
        let taxonomy: Self = serde_json::from_str(json)?;
        let taxonomy = taxonomy.lowercased();
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// カテゴリIDで検索
    pub fn category(&self, id: &str) -> Option<&HazardCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn lowercased(mut self) -> Self {
        for category in &mut self.categories {
            for keyword in &mut category.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
        }
        for tag_override in &mut self.tag_overrides {
            for needle in &mut tag_override.needles {
                *needle = needle.trim().to_lowercase();
            }
        }
        self
    }

    /// 分類表の整合性チェック
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Taxonomy("カテゴリが1件もありません".into()));
        }

        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(Error::Taxonomy("IDが空のカテゴリがあります".into()));
            }
            if category.keywords.is_empty() {
                return Err(Error::Taxonomy(format!("{}: キーワードが空です", category.id)));
            }
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(Error::Taxonomy(format!("{}: 空のキーワードがあります", category.id)));
            }
            if category.hazards.is_empty() {
                return Err(Error::Taxonomy(format!("{}: ハザードラベルが空です", category.id)));
            }
        }

        for tag_override in &self.tag_overrides {
            if tag_override.needles.is_empty() || tag_override.needles.iter().any(|n| n.is_empty()) {
                return Err(Error::Taxonomy(format!(
                    "{}: タグ条件が不正です",
                    tag_override.hazard
                )));
            }
            if tag_override.hazard.trim().is_empty() {
                return Err(Error::Taxonomy("ラベルが空のタグ判定があります".into()));
            }
        }

        Ok(())
    }
}

fn category(id: &str, keywords: &[&str], hazards: &[&str]) -> HazardCategory {
    HazardCategory {
        id: id.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        hazards: hazards.iter().map(|h| h.to_string()).collect(),
    }
}

fn builtin_tag_overrides() -> Vec<TagOverride> {
    vec![
        TagOverride {
            needles: vec!["fire".into()],
            hazard: "Fire Hazard".into(),
            evidence: "Visual evidence of Fire/Sparks detected".into(),
        },
        TagOverride {
            needles: vec!["trip".into(), "clutter".into(), "messy".into()],
            hazard: "Slip/Trip Hazard".into(),
            evidence: "Visual evidence of cluttered workspace".into(),
        },
    ]
}

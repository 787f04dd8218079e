use crate::error::{Result, SafetyAiError};
use safety_ai_common::HazardTaxonomy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 分類表パスの環境変数（設定ファイルより優先）
pub const TAXONOMY_ENV: &str = "SAFETY_AI_TAXONOMY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// カスタム分類表（JSON）
    pub taxonomy_path: Option<PathBuf>,
    /// 基準の発生可能性 (1-5)
    pub base_likelihood: u8,
    /// 基準の重篤度 (1-5)
    pub base_severity: u8,
    /// レポートの既定タイトル
    pub report_title: String,
    /// 模擬文字起こしの待ち時間（ミリ秒）
    pub transcription_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy_path: None,
            base_likelihood: 3,
            base_severity: 3,
            report_title: "Safety Assessment Report".into(),
            transcription_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SafetyAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("safety-ai").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("baseLikelihood", self.base_likelihood), ("baseSeverity", self.base_severity)] {
            if !(1..=5).contains(&value) {
                return Err(SafetyAiError::Config(format!(
                    "{} は 1〜5 で指定してください（現在: {}）",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// 使用する分類表のパス
    pub fn taxonomy_path(&self) -> Option<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(TAXONOMY_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        self.taxonomy_path.clone()
    }

    /// 分類表を読み込む（未指定なら組み込み）
    pub fn load_taxonomy(&self) -> Result<HazardTaxonomy> {
        match self.taxonomy_path() {
            Some(path) => {
                if !path.exists() {
                    return Err(SafetyAiError::FileNotFound(path.display().to_string()));
                }
                log::info!("分類表を読み込み: {}", path.display());
                Ok(HazardTaxonomy::from_file(&path)?)
            }
            None => Ok(HazardTaxonomy::builtin()),
        }
    }

    pub fn set_taxonomy_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = &path {
            // 保存前に妥当性を確認
            HazardTaxonomy::from_file(path)?;
        }
        self.taxonomy_path = path;
        self.save()
    }
}

use serde::{Deserialize, Serialize};

/// 評価リクエスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    /// 作業内容の説明（手入力または文字起こし）
    #[serde(default)]
    pub text: String,

    /// 画像ファイル名（模擬画像解析に使用）
    #[serde(default)]
    pub image_name: Option<String>,

    /// 音声ファイル名（未文字起こしの判定に使用）
    #[serde(default)]
    pub audio_name: Option<String>,

    /// 既存の管理策が欠けている
    #[serde(default)]
    pub missing_controls: bool,
}

impl AssessmentRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image_name = Some(name.into());
        self
    }

    pub fn with_audio(mut self, name: impl Into<String>) -> Self {
        self.audio_name = Some(name.into());
        self
    }

    pub fn with_missing_controls(mut self, missing: bool) -> Self {
        self.missing_controls = missing;
        self
    }
}

//! 音声文字起こし（模擬）
//!
//! 実際の音声認識は行わず、ファイル名から定型文を返す。処理時間は設定値だけ待つ。

use std::time::Duration;

const DEFAULT_TRANSCRIPT: &str =
    "Activity involving heavy machinery and potential electrical hazards in a damp environment.";

/// (ファイル名に含まれる語, 文字起こし結果) 優先順
const TRANSCRIPTS: &[(&str, &str)] = &[
    (
        "weld",
        "Welding steel beams in a confined space with poor ventilation and spark risks.",
    ),
    (
        "height",
        "Working at height on unstable scaffolding during high winds.",
    ),
    (
        "chemical",
        "Handling hazardous chemicals without proper PPE and ventilation.",
    ),
];

/// 音声ファイルを文字起こしする
pub async fn transcribe(file_name: &str, delay: Duration) -> String {
    log::info!("文字起こし(模擬): {}", file_name);

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let text = transcript_for(file_name);
    log::debug!("文字起こし結果: {}", text);
    text.to_string()
}

/// ファイル名から文字起こし結果を選ぶ
pub fn transcript_for(file_name: &str) -> &'static str {
    let lowered = file_name.to_lowercase();
    TRANSCRIPTS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, text)| *text)
        .unwrap_or(DEFAULT_TRANSCRIPT)
}

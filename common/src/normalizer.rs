//! テキスト正規化モジュール
//!
//! 音声入力・手入力の崩れた表現を、キーワード照合できる形に揃える。
//!
//! ## 処理フロー
//! 1. 小文字化・前後空白除去
//! 2. 記号を空白に置換
//! 3. 連続空白を単一化
//! 4. 口語表現を標準語に置換（宣言順に適用）

use regex::Regex;

lazy_static::lazy_static! {
    /// 単語文字・空白以外（記号）
    static ref PUNCTUATION_RE: Regex = Regex::new(r"[^\w\s]").unwrap();

    /// 口語 → 標準語の置換表（順序に意味がある）
    static ref SUBSTITUTIONS: Vec<(Regex, &'static str)> = [
        (r"\bgoin\b", "going"),
        (r"\bweldin\b", "welding"),
        (r"\bn\b", "and"),
        (r"\bwat\b", "what"),
        (r"\bdoin\b", "doing"),
        (r"\bmessy\b", "cluttered"),
        (r"\bfixin\b", "repairing"),
        (r"\bno vent\b", "poor ventilation"),
        (r"\bhi volt\b", "high voltage"),
        (r"\bstair\b", "staircase"),
        (r"\bwire\b", "electrical wiring"),
    ]
    .iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
    .collect();
}

/// テキストを正規化する
///
/// 空文字列は空文字列を返す。正規化済みの文字列に再適用しても結果は変わらない。
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, " ");

    // 句パターン（"no vent" 等）が単一空白を前提にするため先に詰める
    let mut result = collapse_whitespace(&stripped);

    for (pattern, replacement) in SUBSTITUTIONS.iter() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }

    collapse_whitespace(&result)
}

/// 連続空白を単一に
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 正規化済みテキストを語に分割
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

//! Safety AI: 作業安全評価（HIRA）支援ツール
//!
//! コアの識別・採点ロジックは `safety-ai-common` にあり、
//! このクレートは評価オーケストレーション・入出力・CLIを担う。

pub mod assessment;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod scanner;
pub mod transcriber;
pub mod vision;

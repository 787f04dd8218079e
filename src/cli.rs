use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "safety-ai")]
#[command(about = "作業安全評価（ハザード識別・リスク評価・管理策）ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1件の作業を評価してJSONを出力
    Assess {
        /// 作業内容の説明
        #[arg(short, long, default_value = "")]
        text: String,

        /// 現場写真（ファイル名のみ使用）
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 音声メモ（ファイル名のみ使用）
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// 既存の管理策が欠けている
        #[arg(long)]
        missing_controls: bool,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポート形式 (pdf/excel/both)。指定時のみ生成
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// レポート出力先ディレクトリ
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// レポートタイトル（省略時は設定値）
        #[arg(long)]
        title: Option<String>,
    },

    /// 音声メモを文字起こし（模擬）
    Transcribe {
        /// 音声ファイル
        #[arg(required = true)]
        audio: PathBuf,
    },

    /// フォルダ内の観察記録をまとめて評価
    Batch {
        /// 観察記録フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// テキストがない記録は音声を文字起こしして評価
        #[arg(long)]
        transcribe: bool,

        /// 出力JSONファイル（デフォルト: 入力フォルダ/assessments.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポート形式 (pdf/excel/both)。指定時のみ生成
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// レポート出力先ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// レポートタイトル（省略時は設定値）
        #[arg(long)]
        title: Option<String>,
    },

    /// 評価結果JSONからPDF/Excelを生成
    Export {
        /// 入力JSONファイル（1件または配列）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (pdf/excel/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ドキュメントタイトル（省略時は設定値）
        #[arg(short, long)]
        title: Option<String>,
    },

    /// テキストのハザード識別のみ実行
    Classify {
        /// 作業内容の説明
        #[arg(required = true)]
        text: String,

        /// 画像タグ（複数指定可）
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// リスクスコアを計算
    Risk {
        /// 発生可能性 (1-5)
        likelihood: u8,

        /// 重篤度 (1-5)
        severity: u8,

        /// 識別が不確か
        #[arg(long)]
        unclear: bool,

        /// 既存の管理策が欠けている
        #[arg(long)]
        missing_controls: bool,

        /// 死亡災害の可能性
        #[arg(long)]
        fatal: bool,
    },

    /// ハザードに対する管理策を表示
    Controls {
        /// ハザード名
        #[arg(required = true)]
        hazard: String,

        /// リスクレベル (High/Medium/Low)
        #[arg(short, long, default_value = "Medium")]
        level: String,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// カスタム分類表（JSON）を設定
        #[arg(long)]
        set_taxonomy: Option<PathBuf>,

        /// カスタム分類表の設定を解除
        #[arg(long)]
        clear_taxonomy: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use pdf, excel, or both", s)),
        }
    }
}

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use safety_ai_rust::{assessment, cli, config, error, export, scanner, transcriber};
use assessment::{AssessmentRequest, Assessor};
use cli::{Cli, Commands};
use config::Config;
use safety_ai_common::{score_risk, AssessmentResponse, RiskLevel};
use std::path::{Path, PathBuf};
use std::time::Duration;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Assess { text, image, audio, missing_controls, output, format, report_dir, title } => {
            let assessor = Assessor::from_config(&config).context("評価エンジンの初期化に失敗しました")?;

            let mut request = AssessmentRequest::from_text(text).with_missing_controls(missing_controls);
            if let Some(image) = &image {
                request = request.with_image(file_name_of(image));
            }
            if let Some(audio) = &audio {
                request = request.with_audio(file_name_of(audio));
            }

            let mut response = assessor.assess(&request);
            response.assessed_at = timestamp();

            match &output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&response)?;
                    std::fs::write(path, json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&response)?),
            }

            if let Some(format) = format {
                let title = title.unwrap_or_else(|| config.report_title.clone());
                let dir = report_dir.unwrap_or_else(|| PathBuf::from("."));
                export::export_reports(std::slice::from_ref(&response), &format, &dir, &title)?;
            }
        }

        Commands::Transcribe { audio } => {
            if !audio.exists() {
                return Err(error::SafetyAiError::FileNotFound(audio.display().to_string()).into());
            }
            let delay = Duration::from_millis(config.transcription_delay_ms);
            let text = transcriber::transcribe(&file_name_of(&audio), delay).await;
            println!("{}", text);
        }

        Commands::Batch { folder, transcribe, output, format, report_dir, title } => {
            println!("🦺 safety-ai - 一括評価\n");

            // 1. スキャン
            println!("[1/3] 観察記録をスキャン中...");
            let observations = scanner::scan_folder(&folder)?;
            println!("✔ {}件の観察記録を検出\n", observations.len());

            if observations.is_empty() {
                return Err(error::SafetyAiError::NoObservationsFound(folder.display().to_string()).into());
            }

            // 2. 評価
            println!("[2/3] 評価中...{}", if transcribe { " (文字起こし有効)" } else { "" });
            let delay = Duration::from_millis(config.transcription_delay_ms);
            let mut requests = Vec::with_capacity(observations.len());
            for observation in &observations {
                let mut text = observation.read_text()?;
                let audio_name = observation.audio_path.as_deref().map(file_name_of);

                if text.is_empty() && transcribe {
                    if let Some(name) = &audio_name {
                        text = transcriber::transcribe(name, delay).await;
                    }
                }

                let mut request = AssessmentRequest::from_text(text);
                request.image_name = observation.image_path.as_deref().map(file_name_of);
                request.audio_name = audio_name;
                requests.push(request);
            }

            let assessor = Assessor::from_config(&config).context("評価エンジンの初期化に失敗しました")?;
            let progress = ProgressBar::new(requests.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?.progress_chars("=> "),
            );
            let mut responses = assessor.assess_batch_with_progress(&requests, || progress.inc(1));
            progress.finish_and_clear();

            let assessed_at = timestamp();
            for response in &mut responses {
                response.assessed_at = assessed_at.clone();
            }
            print_level_summary(&responses);
            println!("✔ 評価完了\n");

            // 3. 保存
            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| folder.join("assessments.json"));
            export::write_json(&responses, &output)?;
            println!("✔ 結果を保存: {}", output.display());

            if let Some(format) = format {
                let title = title.unwrap_or_else(|| config.report_title.clone());
                let dir = report_dir.unwrap_or_else(|| folder.clone());
                export::export_reports(&responses, &format, &dir, &title)?;
            }

            println!("\n✅ 一括評価完了");
        }

        Commands::Export { input, format, output, title } => {
            println!("📄 safety-ai - エクスポート\n");

            let responses = export::read_json(&input)
                .with_context(|| format!("評価結果の読み込みに失敗しました: {}", input.display()))?;
            let title = title.unwrap_or_else(|| config.report_title.clone());
            let output = output.unwrap_or_else(|| PathBuf::from("."));

            export::export_reports(&responses, &format, &output, &title)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Classify { text, tags } => {
            let assessor = Assessor::from_config(&config).context("評価エンジンの初期化に失敗しました")?;
            let analysis = assessor.classifier().normalize_and_classify(&text, &tags);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }

        Commands::Risk { likelihood, severity, unclear, missing_controls, fatal } => {
            let risk = score_risk(likelihood, severity, unclear, missing_controls, fatal);
            println!("{}", serde_json::to_string_pretty(&risk)?);
        }

        Commands::Controls { hazard, level } => {
            let assessor = Assessor::default();
            let controls = assessor.controls().select_controls(&hazard, &level);
            println!("{}", serde_json::to_string_pretty(&controls)?);
        }

        Commands::Config { show, set_taxonomy, clear_taxonomy } => {
            let mut config = config;

            if let Some(path) = set_taxonomy {
                config.set_taxonomy_path(Some(path.clone()))?;
                println!("✔ 分類表を設定しました: {}", path.display());
            }

            if clear_taxonomy {
                config.set_taxonomy_path(None)?;
                println!("✔ 分類表の設定を解除しました（組み込みを使用）");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  分類表: {}",
                    config
                        .taxonomy_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  基準の発生可能性: {}", config.base_likelihood);
                println!("  基準の重篤度: {}", config.base_severity);
                println!("  レポートタイトル: {}", config.report_title);
                println!("  文字起こし待ち時間: {}ms", config.transcription_delay_ms);
            }
        }
    }

    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn print_level_summary(responses: &[AssessmentResponse]) {
    let count = |level: RiskLevel| responses.iter().filter(|r| r.risk_level == level).count();
    println!(
        "  High: {} / Medium: {} / Low: {}",
        count(RiskLevel::High),
        count(RiskLevel::Medium),
        count(RiskLevel::Low)
    );
}

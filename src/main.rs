use clap::Parser;
use ffe_inventory::{analyzer, cli, config, error, export, logging, report, scanner};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use error::{FfeError, Result};
use ffe_inventory_common::{AnalysisRequest, AnalysisSession, SessionState};
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, output, csv, xlsx, model } => {
            println!("🛋  ffe-inventory - FF&E解析\n");

            // 1. 画像読み込み
            println!("[1/3] 画像を読み込み中...");
            let input = scanner::load_image(&image)?;
            let preview = scanner::data_url(&input);
            println!("✔ {} ({}, {} bytes)\n", image.display(), input.mime_type, input.bytes.len());

            // 2. モデル解析
            let mut config = config;
            if let Some(model) = model {
                config.model = model;
            }
            println!("[2/3] AI解析中... (モデル: {})", config.model);
            let client = analyzer::GeminiClient::from_config(&config)?;
            let request = AnalysisRequest::with_temperature(input, config.temperature);

            let session = Mutex::new(AnalysisSession::new());
            analyzer::run_analysis(&session, &client, request, preview).await?;

            let analysis = match session.into_inner().state() {
                SessionState::Success { result, .. } => result.clone(),
                SessionState::Error { message, .. } => {
                    println!("✖ {}", message);
                    return Err(FfeError::AnalysisFailed(message.clone()));
                }
                other => {
                    return Err(FfeError::AnalysisFailed(format!("unexpected session state: {:?}", other)));
                }
            };
            println!("✔ 解析完了\n");
            print!("{}", report::format_inventory(&analysis));

            // 3. 結果保存
            println!("\n[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| report::default_output_path(&image));
            report::save_analysis(&analysis, &output)?;
            println!("✔ 結果を保存: {}", output.display());

            if let Some(path) = csv {
                export::write_csv(&analysis.items, &path)?;
                println!("✔ CSV出力: {}", path.display());
            }
            if let Some(path) = xlsx {
                export::write_xlsx(&analysis.items, &path)?;
                println!("✔ Excel出力: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Export { input, format, output } => {
            println!("📄 ffe-inventory - エクスポート\n");

            let analysis = report::load_analysis(&input)?;
            let output_dir = output.unwrap_or_else(|| {
                input
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| std::path::PathBuf::from("."))
            });

            let label = match format {
                ExportFormat::Csv => "CSV",
                ExportFormat::Excel => "Excel",
                ExportFormat::Both => "CSV/Excel",
            };
            println!("- {}を生成中... ({}件)", label, analysis.items.len());
            for path in export::export_items(&analysis.items, &format, &output_dir)? {
                println!("✔ 出力: {}", path.display());
            }

            println!("\n✅ エクスポート完了");
        }

        Commands::Overlay { input } => {
            let analysis = report::load_analysis(&input)?;
            print!("{}", report::format_overlays(&analysis));
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  温度: {}", config.temperature);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIエンドポイント: {}", config.api_base_url);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

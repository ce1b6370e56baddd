use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffe-inventory")]
#[command(about = "室内写真からFF&E（家具・什器・備品）一覧を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を解析してFF&E一覧を出力
    Analyze {
        /// 室内写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 出力JSONファイル（デフォルト: 画像と同じ場所の <名前>.ffe.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSVも出力する
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Excelも出力する
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// モデル名を上書き
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 解析結果JSONからCSV/Excelを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 解析結果JSONのオーバーレイ矩形を表示
    Overlay {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

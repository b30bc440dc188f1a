//! CLIモジュール

use crate::config::{CliArgs, Config};
use crate::context::Context;
use crate::error::ContextError;
use crate::level::Level;
use crate::logger::{create_logger, Logger};
use crate::sink;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// ft-log - コンテキスト値付きのカラーログを出力する
#[derive(Parser, Debug)]
#[command(name = "ft-log")]
#[command(about = "コンテキスト値付きのカラーログを出力する", long_about = None)]
pub struct Cli {
    /// 設定ファイルのパス
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 抽出するコンテキストキー（複数指定可、設定ファイルより優先）
    #[arg(short, long = "key", global = true)]
    pub keys: Vec<String>,

    /// コンテキストに設定する値（key=value形式、複数指定可）
    #[arg(long = "ctx", value_parser = parse_context_pair, global = true)]
    pub ctx: Vec<(String, String)>,

    /// タイムスタンプを付けない
    #[arg(long, global = true)]
    pub no_timestamps: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 情報メッセージを出力（白）
    Info { message: String },
    /// 成功メッセージを出力（緑）
    Success { message: String },
    /// エラーメッセージを出力（赤）
    Error { message: String },
    /// 解決済みの設定を表示
    ShowConfig,
}

/// `key=value` を分解する
///
/// 最初の '=' で分割するため、値に '=' を含めてもよい。
pub fn parse_context_pair(s: &str) -> Result<(String, String), ContextError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ContextError::MissingSeparator(s.to_string()))?;
    if key.trim().is_empty() {
        return Err(ContextError::EmptyKey(s.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// 指定された値からコンテキストを作成
fn build_context(pairs: &[(String, String)]) -> Context {
    pairs
        .iter()
        .fold(Context::background(), |ctx, (key, value)| {
            ctx.with_value(key.as_str(), value.clone())
        })
}

fn dispatch(logger: &dyn Logger, level: Level, ctx: &Context, message: &str) {
    match level {
        Level::Info => logger.info(Some(ctx), message),
        Level::Success => logger.success(Some(ctx), message),
        Level::Error => logger.error(Some(ctx), message),
    }
}

fn describe_config(config: &Config) -> String {
    let keys = match &config.context_keys {
        Some(keys) => format!("[{}]", keys.join(", ")),
        None => "(未設定)".to_string(),
    };
    format!("context_keys: {}\ntimestamps: {}", keys, config.timestamps)
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        keys: cli.keys.clone(),
        no_timestamps: cli.no_timestamps,
    };
    let config = Config::load(&cli_args)?;
    debug!("設定: {:?}", config);

    let (level, message) = match cli.command {
        Commands::ShowConfig => {
            println!("{}", describe_config(&config));
            return Ok(());
        }
        Commands::Info { ref message } => (Level::Info, message),
        Commands::Success { ref message } => (Level::Success, message),
        Commands::Error { ref message } => (Level::Error, message),
    };

    sink::set_timestamps(config.timestamps);
    let logger = create_logger(config.context_keys);
    let ctx = build_context(&cli.ctx);
    dispatch(logger.as_ref(), level, &ctx, message);

    Ok(())
}

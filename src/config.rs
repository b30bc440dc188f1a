//! 設定モジュール
//!
//! ロガー本体は設定ファイルを読まない。ここはコマンドライン
//! フロントエンドがロガーを組み立てるための設定。

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 抽出するコンテキストキー（未設定ならNone）
    pub context_keys: Option<Vec<String>>,
    /// 出力行にタイムスタンプを付けるか
    pub timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_keys: None,
            timestamps: true,
        }
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    context_keys: Option<Vec<String>>,
    timestamps: Option<bool>,
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    /// 設定ファイルのパス（未指定ならデフォルトの場所）
    pub config_path: Option<PathBuf>,
    /// 空でなければ設定ファイルのキーを置き換える
    pub keys: Vec<String>,
    pub no_timestamps: bool,
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 設定ファイル > デフォルト値
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = cli_args
            .config_path
            .clone()
            .or_else(default_config_path);
        if let Some(path) = config_path {
            // 明示されたファイルが無い場合はIOエラーにする
            if cli_args.config_path.is_some() || path.exists() {
                let file_config = read_file_config(&path)?;
                config.merge_file_config(file_config);
            }
        }

        config.merge_cli_args(cli_args);
        config.validate()?;

        Ok(config)
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: FileConfig) {
        if let Some(keys) = file_config.context_keys {
            self.context_keys = Some(keys);
        }
        if let Some(timestamps) = file_config.timestamps {
            self.timestamps = timestamps;
        }
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if !cli_args.keys.is_empty() {
            self.context_keys = Some(cli_args.keys.clone());
        }
        if cli_args.no_timestamps {
            self.timestamps = false;
        }
    }

    /// 設定値をバリデート
    ///
    /// キーは空でなく、出力形式と衝突する '=' と ',' を含まないこと。
    fn validate(&self) -> Result<(), ConfigError> {
        for key in self.context_keys.iter().flatten() {
            if key.trim().is_empty() || key.contains('=') || key.contains(',') {
                return Err(ConfigError::InvalidKey(key.clone()));
            }
        }
        Ok(())
    }
}

/// デフォルトの設定ファイルパス（~/.ft-logging/config.toml）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ft-logging").join("config.toml"))
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    debug!("設定ファイルを読み込みます: {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

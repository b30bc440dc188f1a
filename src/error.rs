//! エラー型定義モジュール
//!
//! ログ出力そのものはエラーを返さない。ここにあるのは
//! 設定読み込みとコマンドライン引数の解析で使うエラーのみ。

use std::io;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("無効なコンテキストキー: {0:?}")]
    InvalidKey(String),
}

/// コンテキスト指定（key=value）の解析エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("'='がありません: {0}")]
    MissingSeparator(String),

    #[error("キーが空です: {0}")]
    EmptyKey(String),
}

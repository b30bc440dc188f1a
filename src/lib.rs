//! ft_logging - コンテキスト値抽出付きのカラーコンソールロガー
//!
//! INFO（白）・SUCCESS（緑）・ERROR（赤）の3種類のログを出力する。
//! 設定されたキーの値を呼び出し側が渡すコンテキストから取り出し、
//! ` {key=value, ...}` として行末に付加する。

pub mod cli;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod format;
pub mod level;
pub mod logger;
pub mod logging;
pub mod sink;

pub use context::{Context, ValueLookup};
pub use level::Level;
pub use logger::{create_logger, ConsoleLogger, Logger};

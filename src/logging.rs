//! 診断ログの初期化モジュール
//!
//! カラー出力とは別に、クレート内部の診断情報（出力先の差し替え、
//! 書き込み失敗、設定読み込み）をtracing経由で標準エラー出力に出す。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG未設定時のフィルタ
const DEFAULT_FILTER: &str = "warn";

/// 診断ログを初期化
///
/// RUST_LOG環境変数でログレベルを設定可能（デフォルトはwarn）。
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

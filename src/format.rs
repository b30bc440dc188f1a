//! 行フォーマットモジュール

use crate::color;

/// 1行分のログを組み立てる
///
/// 形式: `<color>[<LEVEL>]<reset> <message>`、
/// コンテキスト情報があれば末尾に ` {<context_info>}` を付加する。
/// メッセージは解釈せずそのまま出力する。
pub fn format_line(color: &str, level: &str, message: &str, context_info: &str) -> String {
    if context_info.is_empty() {
        format!("{}[{}]{} {}", color, level, color::RESET, message)
    } else {
        format!(
            "{}[{}]{} {} {{{}}}",
            color,
            level,
            color::RESET,
            message,
            context_info
        )
    }
}

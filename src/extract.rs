//! コンテキスト値抽出モジュール

use crate::context::ValueLookup;
use std::fmt::Write;

/// 設定されたキーの値をコンテキストから抽出して整形する
///
/// 形式: `key1=value1, key2=value2`
///
/// - 順序は設定されたキーの順序に従う
/// - コンテキストに存在しないキーは黙って省略する
/// - コンテキストがNone、キーが空、または一致するキーがない場合は空文字列
pub fn extract_context_info(keys: &[String], ctx: Option<&dyn ValueLookup>) -> String {
    let ctx = match ctx {
        Some(ctx) if !keys.is_empty() => ctx,
        _ => return String::new(),
    };

    let mut result = String::new();
    for key in keys {
        if let Some(value) = ctx.lookup(key) {
            if !result.is_empty() {
                result.push_str(", ");
            }
            // Stringへの書き込みは失敗しない
            let _ = write!(result, "{}={}", key, value);
        }
    }
    result
}

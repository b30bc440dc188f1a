//! ANSIカラーテーブル

/// 色のリセット
pub const RESET: &str = "\x1b[0m";
/// 赤（ERROR）
pub const RED: &str = "\x1b[31m";
/// 緑（SUCCESS）
pub const GREEN: &str = "\x1b[32m";
/// 白（INFO）
pub const WHITE: &str = "\x1b[37m";

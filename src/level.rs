//! 重要度モジュール

use crate::color;
use std::fmt;

/// ログの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Success,
    Error,
}

impl Level {
    /// 角括弧内に表示するラベル
    pub fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Error => "ERROR",
        }
    }

    /// 対応するANSIカラー
    pub fn color(self) -> &'static str {
        match self {
            Level::Info => color::WHITE,
            Level::Success => color::GREEN,
            Level::Error => color::RED,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

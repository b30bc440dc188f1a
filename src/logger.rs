//! ロガーモジュール

use crate::context::ValueLookup;
use crate::extract::extract_context_info;
use crate::format::format_line;
use crate::level::Level;
use crate::sink;

/// 3種類の重要度を持つロギングインターフェース
///
/// 各操作は失敗せず、共有出力先に1行を書き込む。
pub trait Logger: Send + Sync {
    /// 情報メッセージ（白）
    fn info(&self, ctx: Option<&dyn ValueLookup>, message: &str);

    /// 成功メッセージ（緑）
    fn success(&self, ctx: Option<&dyn ValueLookup>, message: &str);

    /// エラーメッセージ（赤）
    fn error(&self, ctx: Option<&dyn ValueLookup>, message: &str);
}

/// コンソールロガー
///
/// 抽出するコンテキストキーは作成時に固定され、以後変更されない。
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    context_keys: Option<Vec<String>>,
}

impl ConsoleLogger {
    /// 新しいConsoleLoggerを作成し、初期化内容を出力する
    ///
    /// `context_keys` は抽出するキーの一覧（不要ならNoneまたは空）。
    pub fn new(context_keys: Option<Vec<String>>) -> Self {
        let logger = Self { context_keys };
        sink::write_line(&logger.describe());
        logger
    }

    /// 設定されたコンテキストキー（未設定の場合はNone）
    pub fn context_keys(&self) -> Option<&[String]> {
        self.context_keys.as_deref()
    }

    fn keys(&self) -> &[String] {
        self.context_keys.as_deref().unwrap_or_default()
    }

    fn describe(&self) -> String {
        let keys = self.keys();
        if keys.is_empty() {
            "[ft_logging] Initialized with no context extraction".to_string()
        } else {
            format!(
                "[ft_logging] Initialized with context keys: [{}]",
                keys.join(", ")
            )
        }
    }

    /// 色とラベルを指定してログを出力
    pub fn log_with_color(
        &self,
        ctx: Option<&dyn ValueLookup>,
        color: &str,
        level: &str,
        message: &str,
    ) {
        let context_info = extract_context_info(self.keys(), ctx);
        sink::write_line(&format_line(color, level, message, &context_info));
    }

    fn log(&self, ctx: Option<&dyn ValueLookup>, level: Level, message: &str) {
        self.log_with_color(ctx, level.color(), level.label(), message);
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, ctx: Option<&dyn ValueLookup>, message: &str) {
        self.log(ctx, Level::Info, message);
    }

    fn success(&self, ctx: Option<&dyn ValueLookup>, message: &str) {
        self.log(ctx, Level::Success, message);
    }

    fn error(&self, ctx: Option<&dyn ValueLookup>, message: &str) {
        self.log(ctx, Level::Error, message);
    }
}

/// ロガーを作成
///
/// 例:
/// ```
/// use ft_logging::{create_logger, Context};
///
/// let logger = create_logger(Some(vec!["request_id".to_string()]));
/// let ctx = Context::background().with_value("request_id", "abc123");
/// logger.info(Some(&ctx), "request received");
/// ```
pub fn create_logger(context_keys: Option<Vec<String>>) -> Box<dyn Logger> {
    Box::new(ConsoleLogger::new(context_keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::context::Context;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    fn keys(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    fn quiet_capture() -> sink::Capture {
        let capture = sink::capture();
        sink::set_timestamps(false);
        capture
    }

    #[test]
    fn test_new_logger_stores_keys() {
        let _capture = quiet_capture();
        let logger = ConsoleLogger::new(keys(&["request_id", "user_id"]));
        assert_eq!(logger.context_keys().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_new_logger_none_keys() {
        let _capture = quiet_capture();
        let logger = ConsoleLogger::new(None);
        assert!(logger.context_keys().is_none());
    }

    #[test]
    fn test_new_logger_empty_keys() {
        let _capture = quiet_capture();
        let logger = ConsoleLogger::new(Some(Vec::new()));
        assert_eq!(logger.context_keys(), Some(&[][..]));
    }

    #[test]
    fn test_announcement_without_keys() {
        let capture = quiet_capture();
        ConsoleLogger::new(None);
        ConsoleLogger::new(Some(Vec::new()));

        assert_eq!(
            capture.lines(),
            vec![
                "[ft_logging] Initialized with no context extraction",
                "[ft_logging] Initialized with no context extraction",
            ]
        );
    }

    #[test]
    fn test_announcement_with_keys_keeps_order_and_duplicates() {
        let capture = quiet_capture();
        ConsoleLogger::new(keys(&["user_id", "request_id", "user_id"]));

        assert_eq!(
            capture.contents(),
            "[ft_logging] Initialized with context keys: [user_id, request_id, user_id]\n"
        );
    }

    #[test]
    fn test_info() {
        let capture = quiet_capture();
        let logger = create_logger(None);
        capture.clear();

        logger.info(Some(&Context::background()), "[TEST] test info message");

        assert_eq!(
            capture.contents(),
            "\x1b[37m[INFO]\x1b[0m [TEST] test info message\n"
        );
    }

    #[test]
    fn test_success() {
        let capture = quiet_capture();
        let logger = create_logger(None);
        capture.clear();

        logger.success(Some(&Context::background()), "operation completed");

        let output = capture.contents();
        assert!(output.contains("[SUCCESS]"));
        assert!(output.contains("operation completed"));
        assert!(output.starts_with(color::GREEN));
    }

    #[test]
    fn test_error() {
        let capture = quiet_capture();
        let logger = create_logger(None);
        capture.clear();

        logger.error(Some(&Context::background()), "something went wrong");

        let output = capture.contents();
        assert!(output.contains("[ERROR]"));
        assert!(output.contains("something went wrong"));
        assert!(output.starts_with(color::RED));
    }

    #[test]
    fn test_color_codes_and_reset_position() {
        let capture = quiet_capture();
        let logger = create_logger(None);
        let ctx = Context::background();

        for (level, expected) in [
            (Level::Info, "\x1b[37m[INFO]\x1b[0m white"),
            (Level::Success, "\x1b[32m[SUCCESS]\x1b[0m green"),
            (Level::Error, "\x1b[31m[ERROR]\x1b[0m red"),
        ] {
            capture.clear();
            let message = expected.rsplit(' ').next().unwrap_or_default();
            match level {
                Level::Info => logger.info(Some(&ctx), message),
                Level::Success => logger.success(Some(&ctx), message),
                Level::Error => logger.error(Some(&ctx), message),
            }
            assert_eq!(capture.lines(), vec![expected]);
        }
    }

    #[test]
    fn test_context_extraction_order() {
        let capture = quiet_capture();
        let logger = create_logger(keys(&["request_id", "user_id"]));
        capture.clear();

        let ctx = Context::background()
            .with_value("user_id", "user-456")
            .with_value("request_id", "abc123");
        logger.info(Some(&ctx), "test message");

        assert_eq!(
            capture.contents(),
            "\x1b[37m[INFO]\x1b[0m test message {request_id=abc123, user_id=user-456}\n"
        );
    }

    #[test]
    fn test_context_extraction_skips_missing_key() {
        let capture = quiet_capture();
        let logger = create_logger(keys(&["request_id", "user_id", "trace_id"]));
        capture.clear();

        let ctx = Context::background()
            .with_value("request_id", "abc123")
            .with_value("user_id", "user-456");
        logger.info(Some(&ctx), "test message");

        let output = capture.contents();
        assert!(output.contains("request_id=abc123"));
        assert!(output.contains("user_id=user-456"));
        assert!(!output.contains("trace_id"));
    }

    #[test]
    fn test_no_keys_never_render_context() {
        let capture = quiet_capture();
        let logger = create_logger(None);
        capture.clear();

        let ctx = Context::background().with_value("request_id", "abc123");
        logger.info(Some(&ctx), "no context values");

        let output = capture.contents();
        assert!(!output.contains('{'));
        assert!(output.contains("no context values"));
    }

    #[test]
    fn test_no_matching_values() {
        let capture = quiet_capture();
        let logger = create_logger(keys(&["request_id", "user_id"]));
        capture.clear();

        logger.info(Some(&Context::background()), "no context values");

        let output = capture.contents();
        assert!(!output.contains('{'));
        assert!(output.contains("no context values"));
    }

    #[test]
    fn test_none_context() {
        let capture = quiet_capture();
        let logger = create_logger(keys(&["request_id"]));
        capture.clear();

        logger.info(None, "nil context");

        let output = capture.contents();
        assert!(output.contains("nil context"));
        assert!(!output.contains('{'));
    }

    #[test]
    fn test_map_context() {
        let capture = quiet_capture();
        let logger = create_logger(keys(&["attempt"]));
        capture.clear();

        let mut map = HashMap::new();
        map.insert("attempt".to_string(), 2);
        logger.error(Some(&map), "retrying");

        assert_eq!(
            capture.contents(),
            "\x1b[31m[ERROR]\x1b[0m retrying {attempt=2}\n"
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let capture = quiet_capture();
        let logger = create_logger(keys(&["request_id"]));
        capture.clear();

        let ctx = Context::background().with_value("request_id", "abc123");
        logger.success(Some(&ctx), "same");
        logger.success(Some(&ctx), "same");

        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn test_log_with_custom_label() {
        let capture = quiet_capture();
        let logger = ConsoleLogger::new(keys(&["request_id"]));
        capture.clear();

        let ctx = Context::background().with_value("request_id", "abc123");
        logger.log_with_color(Some(&ctx), color::GREEN, "DONE", "custom");

        assert_eq!(
            capture.contents(),
            "\x1b[32m[DONE]\x1b[0m custom {request_id=abc123}\n"
        );
    }

    #[test]
    fn test_concurrent_lines_are_not_interleaved() {
        let capture = quiet_capture();
        let logger: Arc<dyn Logger> = Arc::from(create_logger(keys(&["worker"])));
        capture.clear();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    let ctx = Context::background().with_value("worker", i);
                    for _ in 0..25 {
                        logger.info(Some(&ctx), "tick");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = capture.lines();
        assert_eq!(lines.len(), 200);
        for line in lines {
            assert!(line.starts_with("\x1b[37m[INFO]\x1b[0m tick {worker="));
            assert!(line.ends_with('}'));
        }
    }
}

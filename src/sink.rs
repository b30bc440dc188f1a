//! 共有出力先モジュール
//!
//! プロセス全体で1つの出力ストリーム（デフォルトは標準エラー出力）。
//! 1回のログ呼び出しは、プレフィックスと改行を含めた完成済みの行を
//! ロック内で1回の `write_all` で書き込む。

use chrono::Local;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

/// タイムスタンププレフィックスの形式
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S ";

struct SinkState {
    writer: Box<dyn Write + Send>,
    timestamps: bool,
}

static SINK: OnceLock<Mutex<SinkState>> = OnceLock::new();

/// キャプチャ同士の重なりを防ぐ
static CAPTURE_LOCK: Mutex<()> = Mutex::new(());

fn state() -> MutexGuard<'static, SinkState> {
    SINK.get_or_init(|| {
        Mutex::new(SinkState {
            writer: Box::new(io::stderr()),
            timestamps: true,
        })
    })
    .lock()
    .unwrap_or_else(PoisonError::into_inner)
}

fn emit(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(bytes)?;
    writer.flush()
}

/// 1行を共有出力先に書き込む
///
/// 改行が無ければ付加する。書き込みエラーは呼び出し側に返さない。
pub fn write_line(line: &str) {
    let mut state = state();

    let mut record = String::with_capacity(line.len() + 21);
    if state.timestamps {
        record.push_str(&Local::now().format(TIMESTAMP_FORMAT).to_string());
    }
    record.push_str(line);
    if !line.ends_with('\n') {
        record.push('\n');
    }

    if let Err(e) = emit(state.writer.as_mut(), record.as_bytes()) {
        debug!("ログ出力先への書き込みに失敗: {}", e);
    }
}

/// 出力先を差し替え、以前の出力先を返す
pub fn set_output(writer: Box<dyn Write + Send>) -> Box<dyn Write + Send> {
    debug!("ログ出力先を差し替えます");
    std::mem::replace(&mut state().writer, writer)
}

/// タイムスタンププレフィックスの有無を設定し、以前の設定を返す
pub fn set_timestamps(enabled: bool) -> bool {
    std::mem::replace(&mut state().timestamps, enabled)
}

/// タイムスタンププレフィックスが有効かどうか
pub fn timestamps() -> bool {
    state().timestamps
}

/// メモリ上の共有バッファ
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 出力のキャプチャ
///
/// 生存中は出力先がメモリ上のバッファになり、破棄時に
/// 以前の出力先とタイムスタンプ設定を復元する。
/// 同時に存在できるキャプチャは1つだけ（同一スレッドでの入れ子は不可）。
pub struct Capture {
    buffer: SharedBuffer,
    previous: Option<SinkState>,
    _exclusive: MutexGuard<'static, ()>,
}

/// 出力をメモリ上のバッファにリダイレクトする
pub fn capture() -> Capture {
    let exclusive = CAPTURE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let buffer = SharedBuffer::default();

    let mut state = state();
    let previous = SinkState {
        writer: std::mem::replace(&mut state.writer, Box::new(buffer.clone())),
        timestamps: state.timestamps,
    };
    drop(state);
    debug!("ログ出力をキャプチャします");

    Capture {
        buffer,
        previous: Some(previous),
        _exclusive: exclusive,
    }
}

impl Capture {
    /// キャプチャされた内容
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.bytes()).into_owned()
    }

    /// キャプチャされた内容を行単位で取得
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// バッファを空にする
    pub fn clear(&self) {
        self.buffer.bytes().clear();
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut state = state();
            state.writer = previous.writer;
            state.timestamps = previous.timestamps;
        }
    }
}

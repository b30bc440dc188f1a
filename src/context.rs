//! リクエストスコープのコンテキストモジュール
//!
//! 呼び出し側が毎回明示的に渡すキー・値の参照構造。
//! スレッドローカルなどの暗黙的な伝搬は行わない。

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// キーから表示可能な値を引くための読み取り専用インターフェース
pub trait ValueLookup {
    /// キーに対応する値を返す（存在しない場合はNone）
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display>;
}

struct Binding {
    key: String,
    value: Box<dyn fmt::Display + Send + Sync>,
    parent: Option<Arc<Binding>>,
}

/// 不変のコンテキスト
///
/// `with_value` は親を変更せずに子コンテキストを返す。
/// 同じキーを再度束縛すると新しい値が古い値を隠す。
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Binding>>,
}

impl Context {
    /// 空のルートコンテキスト
    pub fn background() -> Self {
        Self::default()
    }

    /// 値を追加した子コンテキストを作成
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: fmt::Display + Send + Sync + 'static,
    {
        Self {
            head: Some(Arc::new(Binding {
                key: key.into(),
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// キーに対応する値を取得（新しい束縛が優先）
    pub fn value(&self, key: &str) -> Option<&dyn fmt::Display> {
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            if binding.key == key {
                let value: &dyn fmt::Display = &*binding.value;
                return Some(value);
            }
            node = binding.parent.as_deref();
        }
        None
    }

    /// 束縛の数（隠された束縛も含む）
    pub fn len(&self) -> usize {
        self.bindings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        std::iter::successors(self.head.as_deref(), |b| b.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings().map(|b| (&b.key, b.value.to_string())))
            .finish()
    }
}

impl ValueLookup for Context {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.value(key)
    }
}

impl<V: fmt::Display> ValueLookup for HashMap<String, V> {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.get(key).map(|v| v as &dyn fmt::Display)
    }
}

impl<V: fmt::Display> ValueLookup for HashMap<&str, V> {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.get(key).map(|v| v as &dyn fmt::Display)
    }
}

impl<V: fmt::Display> ValueLookup for BTreeMap<String, V> {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.get(key).map(|v| v as &dyn fmt::Display)
    }
}

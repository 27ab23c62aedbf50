//! Key normalization and sharing.
//!
//! Every key that enters a [`crate::nodemap::NodeMap`] is folded to upper
//! case first, and every lookup folds its argument the same way, which is
//! what makes the map case-insensitive.
//!
//! Node maps in a large tree repeat the same handful of keys (`"*"`, `"_"`,
//! common words) millions of times. An [`Interner`] lets the tree builder
//! share one allocation per distinct key:
//!
//! ```
//! use sparse_nodemap::key::Interner;
//!
//! let mut interner = Interner::new();
//! let a = interner.intern_key("hello");
//! let b = interner.intern_key("HeLLo");
//! assert_eq!(&*a, "HELLO");
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use ahash::AHashSet;

/// A stored, normalized key.
pub type Key = Arc<str>;

/// Fold a key to its canonical upper case form.
///
/// Borrows when the key is already normalized, which is the common case for
/// keys that came out of another node map.
pub fn normalize(key: &str) -> Cow<'_, str> {
    if key.is_ascii() {
        if key.bytes().any(|b| b.is_ascii_lowercase()) {
            Cow::Owned(key.to_ascii_uppercase())
        } else {
            Cow::Borrowed(key)
        }
    } else {
        let upper = key.to_uppercase();
        if upper == key {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(upper)
        }
    }
}

/// Pool of shared strings.
#[derive(Clone, Debug, Default)]
pub struct Interner {
    strings: AHashSet<Arc<str>>,
}

impl Interner {
    /// Create an empty Interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared copy of `s`, adding it to the pool if needed.
    pub fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(shared) = self.strings.get(s) {
            return Arc::clone(shared);
        }
        let shared: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&shared));
        shared
    }

    /// Normalize `key` and return its shared copy.
    pub fn intern_key(&mut self, key: &str) -> Key {
        self.intern(&normalize(key))
    }

    /// How many distinct strings are pooled?
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Is the pool empty?
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

//! Provides [`NodeMap`], the branching structure held by each node of a
//! large, sparse pattern tree.
//!
//! Most nodes in such a tree have no children or exactly one, so a node
//! map only allocates its hash table once it holds two entries, and gives
//! the table back as soon as it is down to one again:
//!
//!  - no entries: nothing is allocated
//!  - one entry: the key and value are stored inline
//!  - two or more: an insertion ordered [`indexmap::IndexMap`]
//!
//! Keys are case-insensitive. They are folded to upper case before they are
//! stored and before every lookup.
//!
//! Example 1
//! ```
//! use sparse_nodemap::nodemap::NodeMap;
//!
//! let mut map = NodeMap::new();
//! map.put("Foo", "x");
//! assert_eq!(map.get("FOO"), Some(&"x"));
//! assert!(!map.is_expanded());
//!
//! map.put("Bar", "y");
//! assert_eq!(map.len(), 2);
//! assert!(map.is_expanded());
//!
//! // Removal is by value, not by key.
//! assert!(map.remove(&"x").is_ok());
//! assert_eq!(map.get("bar"), Some(&"y"));
//! assert!(!map.is_expanded());
//! ```
//!
//! Example 2
//! ```
//! use sparse_nodemap::nodemap::NodeMap;
//! use sparse_nodemap::value::Value;
//!
//! // A root with two leaf children, each holding a single template.
//! let mut root = NodeMap::root();
//! for word in ["HELLO", "BYE"] {
//!     let mut leaf = NodeMap::child();
//!     leaf.put("<template>", Value::text("..."));
//!     root.put(word, Value::node(leaf));
//! }
//! // Each leaf averages (1 + 0 / 1) / 2, the root divides their sum by 2.
//! assert_eq!(root.average_size(), 0.5);
//! ```
//!
//! A `NodeMap` does no locking of its own. Mutation needs `&mut self`, so
//! a tree shared between threads must be wrapped by its owner, typically in
//! a single [`std::sync::RwLock`] around the whole tree.

use std::fmt::Debug;
use std::mem;
use std::sync::Arc;

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

use crate::diagnostics::{Diagnostics, RemoveError};
use crate::iterator::{Iter, Keys, Values};
use crate::key::{normalize, Interner, Key};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Values stored in a NodeMap must implement NodeValue.
///
/// A value which is itself a node map is a child node of the enclosing
/// tree, and [`NodeMap::average_size`] descends into it.
pub trait NodeValue: Sized {
    /// The nested node map, if this value is one.
    fn as_node_map(&self) -> Option<&NodeMap<Self>> {
        None
    }
}

macro_rules! leaf_values {
    ($($t:ty),* $(,)?) => {
        $(impl NodeValue for $t {})*
    };
}

leaf_values!(
    String, Arc<str>, Box<str>, bool, char, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16,
    u32, u64, u128, usize,
);

impl<'a> NodeValue for &'a str {}

pub(crate) type Entries<V> = IndexMap<Key, V, RandomState>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Slots<V> {
    Empty,
    Single { key: Key, value: V },
    Expanded(Box<Entries<V>>),
}

impl<V> Default for Slots<V> {
    fn default() -> Self {
        Slots::Empty
    }
}

impl<V> Slots<V> {
    // Collapse a table that is down to one entry.
    fn settle(mut entries: Box<Entries<V>>) -> Self {
        if entries.len() > 1 {
            return Slots::Expanded(entries);
        }
        match entries.pop() {
            Some((key, value)) => Slots::Single { key, value },
            None => Slots::Empty,
        }
    }
}

/// Case-insensitive map from string keys to values, optimized for zero or
/// one entries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_crate",
        from = "NodeMapWire<V>",
        into = "NodeMapWire<V>",
        bound(
            serialize = "V: Clone + serde_crate::Serialize",
            deserialize = "V: serde_crate::Deserialize<'de>"
        )
    )
)]
pub struct NodeMap<V> {
    pub(crate) slots: Slots<V>,
    parented: bool,
}

impl<V> Default for NodeMap<V> {
    fn default() -> Self {
        Self::root()
    }
}

impl<V> NodeMap<V> {
    /// Create a new, empty NodeMap for the root of a tree.
    pub fn new() -> Self {
        Self::root()
    }

    /// Create a new, empty NodeMap for the root of a tree.
    pub fn root() -> Self {
        Self {
            slots: Slots::Empty,
            parented: false,
        }
    }

    /// Create a new, empty NodeMap for a node which has a parent.
    pub fn child() -> Self {
        Self {
            slots: Slots::Empty,
            parented: true,
        }
    }

    /// Does this node have a parent?
    pub fn has_parent(&self) -> bool {
        self.parented
    }

    /// How many entries does the NodeMap contain?
    #[inline(always)]
    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Empty => 0,
            Slots::Single { .. } => 1,
            Slots::Expanded(entries) => entries.len(),
        }
    }

    /// Is the NodeMap empty?
    pub fn is_empty(&self) -> bool {
        matches!(self.slots, Slots::Empty)
    }

    /// Are the entries held in an allocated table?
    pub fn is_expanded(&self) -> bool {
        matches!(self.slots, Slots::Expanded(_))
    }

    /// Remove every entry, releasing the table if there is one.
    pub fn clear(&mut self) {
        self.slots = Slots::Empty;
    }

    /// Associate `value` with the normalized form of `key`, replacing any
    /// value already held for it.
    ///
    /// Unlike most maps this returns the value now stored, not the one it
    /// replaced.
    pub fn put(&mut self, key: &str, value: V) -> &mut V {
        let key: Key = Arc::from(&*normalize(key));
        self.put_key(key, value)
    }

    /// As [`NodeMap::put`], sharing the stored key through `interner`.
    pub fn put_interned(&mut self, key: &str, value: V, interner: &mut Interner) -> &mut V {
        let key = interner.intern_key(key);
        self.put_key(key, value)
    }

    fn put_key(&mut self, key: Key, value: V) -> &mut V {
        let (slots, index) = match mem::take(&mut self.slots) {
            Slots::Empty => (Slots::Single { key, value }, 0),
            Slots::Single { key: sole, .. } if sole == key => (Slots::Single { key, value }, 0),
            Slots::Single {
                key: sole,
                value: sole_value,
            } => {
                let mut entries = Entries::with_capacity_and_hasher(2, RandomState::new());
                entries.insert(sole, sole_value);
                let (index, _) = entries.insert_full(key, value);
                (Slots::Expanded(Box::new(entries)), index)
            }
            Slots::Expanded(mut entries) => {
                let (index, _) = entries.insert_full(key, value);
                (Slots::Expanded(entries), index)
            }
        };
        self.slots = slots;
        match &mut self.slots {
            Slots::Single { value, .. } => value,
            Slots::Expanded(entries) => &mut entries[index],
            Slots::Empty => unreachable!("a value was just stored"),
        }
    }

    /// Get a reference to the value held for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        match &self.slots {
            Slots::Empty => None,
            Slots::Single { key: sole, value } => (**sole == *normalize(key)).then_some(value),
            Slots::Expanded(entries) => entries.get(&*normalize(key)),
        }
    }

    /// Get a mutable reference to the value held for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match &mut self.slots {
            Slots::Empty => None,
            Slots::Single { key: sole, value } => (**sole == *normalize(key)).then_some(value),
            Slots::Expanded(entries) => entries.get_mut(&*normalize(key)),
        }
    }

    /// Does the NodeMap contain the supplied key?
    pub fn contains_key(&self, key: &str) -> bool {
        match &self.slots {
            Slots::Empty => false,
            Slots::Single { key: sole, .. } => **sole == *normalize(key),
            Slots::Expanded(entries) => entries.contains_key(&*normalize(key)),
        }
    }

    /// A snapshot of the stored keys, in insertion order.
    ///
    /// The set is built fresh on every call, so changing it has no effect
    /// on the NodeMap.
    pub fn key_set(&self) -> IndexSet<Key> {
        self.keys().cloned().collect()
    }

    /// Create an iterator over the entries, in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    /// Create an iterator over the stored keys.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Create an iterator over the stored values.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    /// Remove the first entry, in insertion order, whose value equals
    /// `value`, and return it.
    ///
    /// There is no index by value, so this is a linear scan. When a
    /// removal leaves a single entry the table is released.
    pub fn remove(&mut self, value: &V) -> Result<(Key, V), RemoveError>
    where
        V: PartialEq,
    {
        match mem::take(&mut self.slots) {
            Slots::Empty => Err(RemoveError::Empty),
            Slots::Single {
                key,
                value: sole_value,
            } => {
                if sole_value == *value {
                    Ok((key, sole_value))
                } else {
                    self.slots = Slots::Single {
                        key,
                        value: sole_value,
                    };
                    Err(RemoveError::NotFound)
                }
            }
            Slots::Expanded(mut entries) => {
                let index = entries.values().position(|v| v == value);
                let removed = index.and_then(|index| entries.shift_remove_index(index));
                self.slots = Slots::settle(entries);
                removed.ok_or(RemoveError::NotFound)
            }
        }
    }

    /// As [`NodeMap::remove`], but a failure is reported to `sink` and the
    /// NodeMap is left unchanged.
    pub fn remove_or_report<D>(&mut self, value: &V, sink: &D) -> Option<(Key, V)>
    where
        V: PartialEq + Debug,
        D: Diagnostics + ?Sized,
    {
        match self.remove(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                sink.error(format_args!("{err} when trying to remove {value:?}."));
                None
            }
        }
    }

    /// The average branching factor of the subtree rooted here.
    ///
    /// Each child node map contributes its own average size. A node with a
    /// parent reports `(len + total / len) / 2`, the root reports
    /// `total / len`. An empty NodeMap reports `0.0`.
    ///
    /// The walk uses an explicit stack, so very deep trees are fine.
    pub fn average_size(&self) -> f64
    where
        V: NodeValue,
    {
        struct Frame<'a, V> {
            node: &'a NodeMap<V>,
            children: Values<'a, V>,
            total: f64,
        }

        impl<'a, V> Frame<'a, V> {
            fn new(node: &'a NodeMap<V>) -> Self {
                Self {
                    node,
                    children: node.values(),
                    total: 0.0,
                }
            }
        }

        let mut stack = vec![Frame::new(self)];
        while let Some(top) = stack.last_mut() {
            match top.children.find_map(NodeValue::as_node_map) {
                Some(child) => stack.push(Frame::new(child)),
                None => {
                    let average = top.node.branching(top.total);
                    stack.pop();
                    match stack.last_mut() {
                        Some(parent) => parent.total += average,
                        None => return average,
                    }
                }
            }
        }
        0.0
    }

    fn branching(&self, total: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let count = self.len() as f64;
        if self.parented {
            (count + total / count) / 2.0
        } else {
            total / count
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
struct NodeMapWire<V> {
    parented: bool,
    entries: Vec<(String, V)>,
}

#[cfg(feature = "serde")]
impl<V> From<NodeMap<V>> for NodeMapWire<V> {
    fn from(map: NodeMap<V>) -> Self {
        Self {
            parented: map.parented,
            entries: map
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl<V> From<NodeMapWire<V>> for NodeMap<V> {
    fn from(wire: NodeMapWire<V>) -> Self {
        let mut map = if wire.parented {
            NodeMap::child()
        } else {
            NodeMap::root()
        };
        for (key, value) in wire.entries {
            map.put(&key, value);
        }
        map
    }
}

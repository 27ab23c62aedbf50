//! A ready made value type for building trees of node maps.
//!
//! A [`Value`] is either a child node or a piece of text (a template, a
//! file name, ...) stored at the end of a path.
//!
//! ```
//! use sparse_nodemap::nodemap::NodeMap;
//! use sparse_nodemap::value::Value;
//!
//! let mut root: NodeMap<Value> = NodeMap::root();
//! root.put("hello", Value::node(NodeMap::child()))
//!     .as_node_mut()
//!     .unwrap()
//!     .put("<template>", Value::text("Hi there"));
//!
//! let hello = root.get("HELLO").and_then(Value::as_node).unwrap();
//! assert_eq!(hello.get("<TEMPLATE>").and_then(Value::as_text), Some("Hi there"));
//! ```

use std::sync::Arc;

use crate::key::Interner;
use crate::nodemap::{NodeMap, NodeValue};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A child node or a piece of text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Value {
    Node(Box<NodeMap<Value>>),
    Text(Arc<str>),
}

impl Value {
    /// Wrap a child node.
    pub fn node(map: NodeMap<Value>) -> Self {
        Value::Node(Box::new(map))
    }

    /// Wrap a piece of text.
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Value::Text(text.into())
    }

    /// Wrap a piece of text, sharing it through `interner`.
    pub fn text_in(text: &str, interner: &mut Interner) -> Self {
        Value::Text(interner.intern(text))
    }

    pub fn as_node(&self) -> Option<&NodeMap<Value>> {
        match self {
            Value::Node(node) => Some(&**node),
            Value::Text(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut NodeMap<Value>> {
        match self {
            Value::Node(node) => Some(&mut **node),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(&**text),
            Value::Node(_) => None,
        }
    }
}

impl NodeValue for Value {
    fn as_node_map(&self) -> Option<&NodeMap<Self>> {
        self.as_node()
    }
}

impl From<NodeMap<Value>> for Value {
    fn from(map: NodeMap<Value>) -> Self {
        Value::node(map)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::text(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::text(text)
    }
}

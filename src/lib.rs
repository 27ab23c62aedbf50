//! Provides [`crate::nodemap::NodeMap`], a case-insensitive string keyed map
//! built to be the per-node branching structure of a very large, deep and
//! sparsely branching tree, such as the pattern graph of a chat bot.
//!
//! In such a tree almost every node has zero children or one. A NodeMap
//! therefore holds a single entry inline and only allocates a hash table
//! once a second key arrives. When removals bring it back down to one entry
//! the table is released again.
//!
//! Values are opaque to the map except for one thing: a value may itself be
//! a node map (see [`crate::nodemap::NodeValue`]). The ready made
//! [`crate::value::Value`] type covers the usual case of a tree whose nodes
//! hold either child nodes or text.
//!
//! Examples:
//! * node map : [`crate::nodemap`]
//! * values : [`crate::value`]
//! * key sharing : [`crate::key`]
//!
//! Typical usages for this data structure:
//!  - Pattern matching graphs (AIML style)
//!  - Tries with case-insensitive word atoms
//!  - Any tree with millions of mostly unary nodes

#[cfg(feature = "serde")]
extern crate serde_crate;

pub mod diagnostics;

pub mod iterator;

pub mod key;

pub mod nodemap;

pub mod value;

pub use diagnostics::{Diagnostics, LogDiagnostics, RemoveError};
pub use key::{Interner, Key};
pub use nodemap::{NodeMap, NodeValue};
pub use value::Value;

#[cfg(test)]
mod proptests;

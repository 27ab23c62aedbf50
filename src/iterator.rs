//! Provides NodeMap iterators.
//!
//! Entries come back in insertion order. A key which is overwritten keeps
//! its original position.
use std::iter::FusedIterator;

use crate::key::Key;
use crate::nodemap::{NodeMap, Slots};

enum Inner<'a, V> {
    Single(Option<(&'a Key, &'a V)>),
    Expanded(indexmap::map::Iter<'a, Key, V>),
}

/// Iterator over the entries of a NodeMap.
pub struct Iter<'a, V> {
    inner: Inner<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Single(pair) => pair.take(),
            Inner::Expanded(entries) => entries.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Single(pair) => {
                let n = usize::from(pair.is_some());
                (n, Some(n))
            }
            Inner::Expanded(entries) => entries.size_hint(),
        }
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        let inner = match &self.inner {
            Inner::Single(pair) => Inner::Single(*pair),
            Inner::Expanded(entries) => Inner::Expanded(entries.clone()),
        };
        Iter { inner }
    }
}

// Iterator
impl<'a, V> IntoIterator for &'a NodeMap<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        let inner = match &self.slots {
            Slots::Empty => Inner::Single(None),
            Slots::Single { key, value } => Inner::Single(Some((key, value))),
            Slots::Expanded(entries) => Inner::Expanded(entries.iter()),
        };
        Iter { inner }
    }
}

/// Iterator over the keys of a NodeMap.
pub struct Keys<'a, V>(Iter<'a, V>);

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self(iter)
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// Iterator over the values of a NodeMap.
pub struct Values<'a, V>(Iter<'a, V>);

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self(iter)
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

enum IntoInner<V> {
    Single(Option<(Key, V)>),
    Expanded(indexmap::map::IntoIter<Key, V>),
}

/// Consuming iterator over a NodeMap.
pub struct IntoIter<V> {
    inner: IntoInner<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IntoInner::Single(pair) => pair.take(),
            IntoInner::Expanded(entries) => entries.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IntoInner::Single(pair) => {
                let n = usize::from(pair.is_some());
                (n, Some(n))
            }
            IntoInner::Expanded(entries) => entries.size_hint(),
        }
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for NodeMap<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        let inner = match self.slots {
            Slots::Empty => IntoInner::Single(None),
            Slots::Single { key, value } => IntoInner::Single(Some((key, value))),
            Slots::Expanded(entries) => IntoInner::Expanded((*entries).into_iter()),
        };
        IntoIter { inner }
    }
}

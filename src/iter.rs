// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::{self, Debug};
use std::iter;
use std::marker::PhantomData;
use std::ptr;

use compare::{Compare, Natural};

use super::map::TreeMap;
use super::node::{as_ptr, predecessor, rightmost, successor, TreeNode};

/// A position in a `TreeMap`: either an entry or the end position one past
/// the greatest key.
///
/// Cursors walk in both directions by following parent links, so stepping
/// costs O(1) amortized and nothing is allocated. Two cursors are equal
/// when they point at the same entry of the same map.
///
/// # Examples
///
/// ```rust
/// use stable_rbtree::TreeMap;
///
/// let map: TreeMap<i32, &str> = vec![(1, "a"), (2, "b")].into_iter().collect();
///
/// let mut cursor = map.end();
/// cursor.move_prev();
/// assert_eq!(cursor.key_value(), Some((&2, &"b")));
/// cursor.move_prev();
/// assert_eq!(cursor, map.begin());
/// ```
pub struct Cursor<'a, K: 'a, V: 'a, C: 'a + Compare<K> = Natural<K>> {
    tree: &'a TreeMap<K, V, C>,
    // Null at the end position.
    node: *const TreeNode<K, V>,
}

impl<'a, K, V, C: Compare<K>> Cursor<'a, K, V, C> {
    pub(crate) fn new(tree: &'a TreeMap<K, V, C>, node: *const TreeNode<K, V>) -> Cursor<'a, K, V, C> {
        Cursor {
            tree: tree,
            node: node,
        }
    }

    /// Returns true at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_null()
    }

    /// Steps to the entry with the next greater key. From the greatest key
    /// this reaches the end position; the end position stays put.
    pub fn move_next(&mut self) {
        self.node = unsafe { successor(self.node as *mut TreeNode<K, V>) };
    }

    /// Steps to the entry with the next smaller key. From the end position
    /// this reaches the greatest key; from the smallest key it wraps to the
    /// end position.
    pub fn move_prev(&mut self) {
        self.node = unsafe {
            if self.node.is_null() {
                rightmost(as_ptr(&self.tree.root) as *mut TreeNode<K, V>)
            } else {
                predecessor(self.node as *mut TreeNode<K, V>)
            }
        };
    }

    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        unsafe { self.node.as_ref() }.map(|n| (&n.key, &n.value))
    }
}

impl<'a, K, V, C: Compare<K>> Clone for Cursor<'a, K, V, C> {
    fn clone(&self) -> Cursor<'a, K, V, C> {
        *self
    }
}

impl<'a, K, V, C: Compare<K>> Copy for Cursor<'a, K, V, C> {}

impl<'a, K, V, C: Compare<K>> PartialEq for Cursor<'a, K, V, C> {
    fn eq(&self, other: &Cursor<'a, K, V, C>) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<'a, K, V, C: Compare<K>> Eq for Cursor<'a, K, V, C> {}

impl<'a, K: Debug, V: Debug, C: Compare<K>> Debug for Cursor<'a, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.key_value() {
            Some((k, v)) => write!(f, "Cursor({:?}: {:?})", k, v),
            None => write!(f, "Cursor(end)"),
        }
    }
}

// Walks the closed node interval [front, back] from both ends. Both are
// null once it is exhausted.
pub(crate) struct RawIter<K, V> {
    front: *mut TreeNode<K, V>,
    back: *mut TreeNode<K, V>,
}

impl<K, V> RawIter<K, V> {
    pub(crate) fn new(front: *mut TreeNode<K, V>, back: *mut TreeNode<K, V>) -> RawIter<K, V> {
        if front.is_null() || back.is_null() {
            RawIter::empty()
        } else {
            RawIter {
                front: front,
                back: back,
            }
        }
    }

    pub(crate) fn empty() -> RawIter<K, V> {
        RawIter {
            front: ptr::null_mut(),
            back: ptr::null_mut(),
        }
    }

    fn next(&mut self) -> Option<*mut TreeNode<K, V>> {
        if self.front.is_null() {
            return None;
        }
        let cur = self.front;
        if cur == self.back {
            *self = RawIter::empty();
        } else {
            self.front = unsafe { successor(cur) };
        }
        Some(cur)
    }

    fn next_back(&mut self) -> Option<*mut TreeNode<K, V>> {
        if self.back.is_null() {
            return None;
        }
        let cur = self.back;
        if cur == self.front {
            *self = RawIter::empty();
        } else {
            self.back = unsafe { predecessor(cur) };
        }
        Some(cur)
    }
}

/// Lazy iterator over the entries of a map, in ascending key order.
pub struct Iter<'a, K: 'a, V: 'a> {
    raw: RawIter<K, V>,
    length: usize,
    marker: PhantomData<&'a TreeNode<K, V>>,
}

/// Lazy iterator over the entries of a map, in ascending key order, with
/// the values being mutable.
pub struct IterMut<'a, K: 'a, V: 'a> {
    raw: RawIter<K, V>,
    length: usize,
    marker: PhantomData<&'a mut TreeNode<K, V>>,
}

/// Lazy iterator over a sub-range of a map.
pub struct Range<'a, K: 'a, V: 'a> {
    raw: RawIter<K, V>,
    marker: PhantomData<&'a TreeNode<K, V>>,
}

/// Lazy iterator over a sub-range of a map, with the values being mutable.
pub struct RangeMut<'a, K: 'a, V: 'a> {
    raw: RawIter<K, V>,
    marker: PhantomData<&'a mut TreeNode<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(raw: RawIter<K, V>, length: usize) -> Iter<'a, K, V> {
        Iter {
            raw: raw,
            length: length,
            marker: PhantomData,
        }
    }
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(raw: RawIter<K, V>, length: usize) -> IterMut<'a, K, V> {
        IterMut {
            raw: raw,
            length: length,
            marker: PhantomData,
        }
    }
}

impl<'a, K, V> Range<'a, K, V> {
    pub(crate) fn new(raw: RawIter<K, V>) -> Range<'a, K, V> {
        Range {
            raw: raw,
            marker: PhantomData,
        }
    }
}

impl<'a, K, V> RangeMut<'a, K, V> {
    pub(crate) fn new(raw: RawIter<K, V>) -> RangeMut<'a, K, V> {
        RangeMut {
            raw: raw,
            marker: PhantomData,
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> {
        Iter::new(RawIter::new(self.raw.front, self.raw.back), self.length)
    }
}

// The node pointers handed out by `RawIter` are live for `'a`: the map is
// borrowed for that long and cannot be restructured meanwhile.

#[inline]
unsafe fn entry<'a, K, V>(node: *mut TreeNode<K, V>) -> (&'a K, &'a V) {
    (&(*node).key, &(*node).value)
}

#[inline]
unsafe fn entry_mut<'a, K, V>(node: *mut TreeNode<K, V>) -> (&'a K, &'a mut V) {
    (&(*node).key, &mut (*node).value)
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.raw.next().map(|n| {
            self.length -= 1;
            unsafe { entry(n) }
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.raw.next_back().map(|n| {
            self.length -= 1;
            unsafe { entry(n) }
        })
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.raw.next().map(|n| {
            self.length -= 1;
            unsafe { entry_mut(n) }
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.raw.next_back().map(|n| {
            self.length -= 1;
            unsafe { entry_mut(n) }
        })
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.raw.next().map(|n| unsafe { entry(n) })
    }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.raw.next_back().map(|n| unsafe { entry(n) })
    }
}

impl<'a, K, V> Iterator for RangeMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.raw.next().map(|n| unsafe { entry_mut(n) })
    }
}

impl<'a, K, V> DoubleEndedIterator for RangeMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.raw.next_back().map(|n| unsafe { entry_mut(n) })
    }
}

/// TreeMap keys iterator.
pub struct Keys<'a, K: 'a, V: 'a>(pub(crate) iter::Map<Iter<'a, K, V>, fn((&'a K, &'a V)) -> &'a K>);

/// TreeMap values iterator.
pub struct Values<'a, K: 'a, V: 'a>(pub(crate) iter::Map<Iter<'a, K, V>, fn((&'a K, &'a V)) -> &'a V>);

/// TreeMap mutable values iterator.
pub struct ValuesMut<'a, K: 'a, V: 'a>(pub(crate) iter::Map<IterMut<'a, K, V>,
                                                            fn((&'a K, &'a mut V)) -> &'a mut V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.0.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a K> {
        self.0.next_back()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.0.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a V> {
        self.0.next_back()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        self.0.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.0.next_back()
    }
}

/// Lazy forward iterator over a map that consumes the map while iterating
pub struct IntoIter<K, V> {
    stack: Vec<TreeNode<K, V>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Option<Box<TreeNode<K, V>>>, length: usize) -> IntoIter<K, V> {
        IntoIter {
            stack: root.map_or(vec![], |b| vec![*b]),
            remaining: length,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        // Parent pointers of unpacked nodes dangle from here on; only the
        // owned links are followed.
        while let Some(node) = self.stack.pop() {
            let TreeNode { key, value, left, right, color, .. } = node;

            match left {
                Some(b_left) => {
                    self.stack.push(TreeNode {
                        key: key,
                        value: value,
                        parent: ptr::null_mut(),
                        left: None,
                        right: right,
                        color: color,
                    });
                    self.stack.push(*b_left);
                }
                None => {
                    if let Some(b_right) = right {
                        self.stack.push(*b_right);
                    }
                    self.remaining -= 1;
                    return Some((key, value));
                }
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(feature="ordered_iter")]
impl<'a, K, V> ::ordered_iter::OrderedMapIterator for Iter<'a, K, V> {
    type Key = &'a K;
    type Val = &'a V;
}

#[cfg(test)]
mod test_iter {
    use super::super::map::TreeMap;

    fn sample() -> TreeMap<i32, char> {
        vec![(3, 'c'), (1, 'a'), (5, 'e'), (2, 'b'), (4, 'd')].into_iter().collect()
    }

    #[test]
    fn cursor_walks_both_ways() {
        let map = sample();
        let mut cursor = map.begin();
        let mut keys = vec![];
        while !cursor.is_end() {
            keys.push(*cursor.key().unwrap());
            cursor.move_next();
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        assert_eq!(cursor, map.end());

        let mut keys = vec![];
        loop {
            cursor.move_prev();
            if cursor.is_end() {
                break;
            }
            keys.push(*cursor.key().unwrap());
        }
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn cursor_next_then_prev_round_trips() {
        let map = sample();
        let mut cursor = map.begin();
        while !cursor.is_end() {
            let here = cursor;
            let mut probe = cursor;
            probe.move_next();
            probe.move_prev();
            assert_eq!(probe, here);
            cursor.move_next();
        }
    }

    #[test]
    fn cursor_end_boundary() {
        let map = sample();
        let mut cursor = map.end();
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert_eq!(cursor.key_value(), Some((&5, &'e')));
        cursor.move_next();
        assert_eq!(cursor, map.end());
    }

    #[test]
    fn cursor_empty_map() {
        let map: TreeMap<i32, i32> = TreeMap::new();
        assert_eq!(map.begin(), map.end());
        let mut cursor = map.end();
        cursor.move_prev();
        assert!(cursor.is_end());
        assert_eq!(cursor.value(), None);
    }

    #[test]
    fn cursor_identity_includes_map() {
        let a = sample();
        let b = sample();
        assert!(a.end() != b.end());
        assert!(a.begin() != b.begin());
        assert_eq!(format!("{:?}", a.begin()), "Cursor(1: 'a')");
        assert_eq!(format!("{:?}", a.end()), "Cursor(end)");
    }

    #[test]
    fn iter_both_ends() {
        let map = sample();
        let mut it = map.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some((&1, &'a')));
        assert_eq!(it.next_back(), Some((&5, &'e')));
        assert_eq!(it.len(), 3);
        let rest: Vec<i32> = it.map(|(&k, _)| k).collect();
        assert_eq!(rest, vec![2, 3, 4]);

        let rev: Vec<i32> = map.keys().rev().cloned().collect();
        assert_eq!(rev, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn iter_mut_from_back() {
        let mut map = sample();
        for (_, v) in map.iter_mut().rev().take(2) {
            *v = 'z';
        }
        let values: String = map.values().collect();
        assert_eq!(values, "abczz");
    }

    #[test]
    fn into_iter_sorted() {
        let map = sample();
        let it = map.into_iter();
        assert_eq!(it.len(), 5);
        let v: Vec<(i32, char)> = it.collect();
        assert_eq!(v, vec![(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd'), (5, 'e')]);
    }

    #[test]
    fn into_iter_partial_drop() {
        let map: TreeMap<i32, String> = (0..50).map(|i| (i, i.to_string())).collect();
        let mut it = map.into_iter();
        assert_eq!(it.next(), Some((0, "0".to_string())));
        assert_eq!(it.len(), 49);
    }
}

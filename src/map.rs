// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering::{self, Equal, Greater, Less};
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter;
use std::mem::replace;
use std::ops::{self, Bound};
use std::ptr;

use compare::{natural, Compare, Natural};
use log::debug;

use super::fixup::{insert_rebalance, remove_rebalance};
use super::iter::{Cursor, IntoIter, Iter, IterMut, Keys, Range, RangeMut, RawIter, Values, ValuesMut};
use super::node::{as_mut_ptr, as_ptr, clone_link, leftmost, rightmost, Color, Dir, Link, TreeNode};
use super::traverse::{self, Order};
use super::validate::{self, InvariantViolation};

/// Outcome of `TreeMap::insert` and `TreeMap::insert_or_update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertResult {
    /// A new entry was added.
    Inserted,
    /// The key was present and its value was overwritten.
    Updated,
    /// The key was present and the map is unchanged.
    Failed,
}

/// An ordered map implemented as a red-black tree.
///
/// Every node owns its two subtrees and keeps a non-owning pointer to its
/// parent, which lets cursors and iterators step in either direction
/// without an auxiliary stack. Insertion repairs red-red links on the way
/// back up from the new leaf; removal repairs black-height deficits the
/// same way. Lookups, insertion and removal are all O(log n).
///
/// # Examples
///
/// ```rust
/// use stable_rbtree::{InsertResult, TreeMap};
///
/// let mut map = TreeMap::new();
///
/// assert_eq!(map.insert(2, "bar"), InsertResult::Inserted);
/// assert_eq!(map.insert(1, "foo"), InsertResult::Inserted);
/// assert_eq!(map.insert(3, "quux"), InsertResult::Inserted);
///
/// // Strict insertion leaves existing entries alone.
/// assert_eq!(map.insert(3, "baz"), InsertResult::Failed);
/// assert_eq!(map.insert_or_update(3, "baz"), InsertResult::Updated);
///
/// // In ascending order by keys
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
///
/// map.remove(&1);
/// assert_eq!(map.len(), 2);
///
/// for key in 0..4 {
///     match map.get(&key) {
///         Some(value) => println!("{} has a value: {}", key, value),
///         None => println!("{} not in map", key),
///     }
/// }
///
/// map.clear();
/// assert!(map.is_empty());
/// ```
///
/// A `TreeMap` can also be used with a custom ordering:
///
/// ```rust
/// use stable_rbtree::TreeMap;
///
/// struct Troll<'a> {
///     name: &'a str,
///     level: u32,
/// }
///
/// let mut trolls = TreeMap::with_comparator(|l: &Troll, r: &Troll| l.level.cmp(&r.level));
///
/// trolls.insert(Troll { name: "Orgarr", level: 2 }, vec!["King Karl"]);
/// trolls.insert(Troll { name: "Blargarr", level: 3 }, vec!["Odd"]);
/// trolls.insert(Troll { name: "Wartilda", level: 1 }, vec![]);
///
/// // Print the trolls, ordered by level with smallest level first
/// for (troll, heroes) in trolls.iter() {
///     println!("level {}: '{}' has slain {} heroes",
///              troll.level, troll.name, heroes.len());
/// }
/// ```
pub struct TreeMap<K, V, C: Compare<K> = Natural<K>> {
    pub(crate) root: Link<K, V>,
    length: usize,
    cmp: C,
}

// The parent pointers are never shared outside a `&`/`&mut` borrow of the
// map, so thread safety follows that of the contents.
unsafe impl<K: Send, V: Send, C: Compare<K> + Send> Send for TreeMap<K, V, C> {}
unsafe impl<K: Sync, V: Sync, C: Compare<K> + Sync> Sync for TreeMap<K, V, C> {}

impl<K: Clone, V: Clone, C: Compare<K> + Clone> Clone for TreeMap<K, V, C> {
    fn clone(&self) -> TreeMap<K, V, C> {
        TreeMap {
            root: clone_link(&self.root, ptr::null_mut()),
            length: self.length,
            cmp: self.cmp.clone(),
        }
    }
}

// FIXME: determine what `PartialEq` means for comparator-based `TreeMap`s
impl<K: PartialEq + Ord, V: PartialEq> PartialEq for TreeMap<K, V> {
    #[inline]
    fn eq(&self, other: &TreeMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<K: Eq + Ord, V: Eq> Eq for TreeMap<K, V> {}

impl<K: Ord, V: PartialOrd> PartialOrd for TreeMap<K, V> {
    #[inline]
    fn partial_cmp(&self, other: &TreeMap<K, V>) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<K: Ord, V: Ord> Ord for TreeMap<K, V> {
    #[inline]
    fn cmp(&self, other: &TreeMap<K, V>) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<K: Debug, V: Debug, C> Debug for TreeMap<K, V, C>
    where C: Compare<K>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;

        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", *k, *v)?;
        }

        write!(f, "}}")
    }
}

impl<K, V, C> Default for TreeMap<K, V, C>
    where C: Compare<K> + Default
{
    #[inline]
    fn default() -> TreeMap<K, V, C> {
        TreeMap::with_comparator(Default::default())
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for TreeMap<K, V, C>
    where C: Compare<K> + Compare<Q, K>
{
    type Output = V;
    #[inline]
    fn index(&self, i: &'a Q) -> &V {
        self.get(i).expect("no entry found for key")
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::IndexMut<&'a Q> for TreeMap<K, V, C>
    where C: Compare<K> + Compare<Q, K>
{
    #[inline]
    fn index_mut(&mut self, i: &'a Q) -> &mut V {
        self.get_mut(i).expect("no entry found for key")
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty `TreeMap` ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    /// let mut map: TreeMap<&str, i32> = TreeMap::new();
    /// ```
    pub fn new() -> TreeMap<K, V> {
        TreeMap::with_comparator(natural())
    }
}

impl<K, V, C> TreeMap<K, V, C>
    where C: Compare<K>
{
    /// Creates an empty `TreeMap` ordered according to the given comparator.
    pub fn with_comparator(cmp: C) -> TreeMap<K, V, C> {
        TreeMap {
            root: None,
            length: 0,
            cmp: cmp,
        }
    }

    /// Returns the comparator according to which the `TreeMap` is ordered.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Gets a lazy iterator over the keys in the map, in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    /// let mut map = TreeMap::new();
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    /// map.insert("b", 2);
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, ["a", "b", "c"]);
    /// ```
    pub fn keys<'a>(&'a self) -> Keys<'a, K, V> {
        fn first<A, B>((a, _): (A, B)) -> A {
            a
        }
        let first: fn((&'a K, &'a V)) -> &'a K = first; // coerce to fn pointer

        Keys(self.iter().map(first))
    }

    /// Gets a lazy iterator over the values in the map, in ascending order
    /// with respect to the corresponding keys.
    pub fn values<'a>(&'a self) -> Values<'a, K, V> {
        fn second<A, B>((_, b): (A, B)) -> B {
            b
        }
        let second: fn((&'a K, &'a V)) -> &'a V = second; // coerce to fn pointer

        Values(self.iter().map(second))
    }

    /// Gets a lazy iterator over the values in the map, in ascending order
    /// with respect to the corresponding keys, returning a mutable reference
    /// to each value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    /// let mut map = TreeMap::new();
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    /// map.insert("b", 2);
    ///
    /// for x in map.values_mut() {
    ///     *x += 1;
    /// }
    ///
    /// let values: Vec<_> = map.values().cloned().collect();
    /// assert_eq!(values, [2, 3, 4]);
    /// ```
    pub fn values_mut<'a>(&'a mut self) -> ValuesMut<'a, K, V> {
        fn second<A, B>((_, b): (A, B)) -> B {
            b
        }
        let second: fn((&'a K, &'a mut V)) -> &'a mut V = second; // coerce to fn pointer

        ValuesMut(self.iter_mut().map(second))
    }

    /// Gets a lazy double-ended iterator over the key-value pairs in the
    /// map, in ascending order.
    pub fn iter(&self) -> Iter<K, V> {
        let root = as_ptr(&self.root) as *mut TreeNode<K, V>;
        let raw = unsafe { RawIter::new(leftmost(root), rightmost(root)) };
        Iter::new(raw, self.length)
    }

    /// Gets a lazy double-ended iterator over the key-value pairs in the
    /// map, with the values being mutable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    /// let mut map = TreeMap::new();
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    /// map.insert("b", 2);
    ///
    /// // Add 10 until we find "b"
    /// for (key, value) in map.iter_mut() {
    ///     *value += 10;
    ///     if key == &"b" { break }
    /// }
    ///
    /// assert_eq!(map.get(&"a"), Some(&11));
    /// assert_eq!(map.get(&"b"), Some(&12));
    /// assert_eq!(map.get(&"c"), Some(&3));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        let root = as_mut_ptr(&mut self.root);
        let raw = unsafe { RawIter::new(leftmost(root), rightmost(root)) };
        IterMut::new(raw, self.length)
    }

    /// Gets a lazy iterator that consumes the treemap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    /// let mut map = TreeMap::new();
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    /// map.insert("b", 2);
    ///
    /// // Not possible with a regular `.iter()`
    /// let vec: Vec<(&str, i32)> = map.into_iter().collect();
    /// assert_eq!(vec, vec![("a", 1), ("b", 2), ("c", 3)]);
    /// ```
    pub fn into_iter(self) -> IntoIter<K, V> {
        let TreeMap { root, length, .. } = self;
        IntoIter::new(root, length)
    }

    /// Returns a cursor at the entry with the smallest key, or at the end
    /// position if the map is empty.
    pub fn begin(&self) -> Cursor<K, V, C> {
        let first = unsafe { leftmost(as_ptr(&self.root) as *mut TreeNode<K, V>) };
        Cursor::new(self, first)
    }

    /// Returns a cursor at the end position, one past the greatest key.
    /// Moving it backwards reaches the greatest key.
    pub fn end(&self) -> Cursor<K, V, C> {
        Cursor::new(self, ptr::null())
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.begin().key_value()
    }

    /// Returns the entry with the greatest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut end = self.end();
        end.move_prev();
        end.key_value()
    }

    /// Return the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.length
    }

    /// Return true if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        if self.length != 0 {
            debug!("clearing tree map of {} entries", self.length);
        }
        self.root = None;
        self.length = 0
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[inline]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
        where C: Compare<Q, K>
    {
        let cmp = &self.cmp;
        tree_find_with(&self.root, |k| cmp.compare(key, k))
    }

    /// Returns true if the map contains a value for the specified key.
    #[inline]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
        where C: Compare<Q, K>
    {
        self.get(key).is_some()
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    #[inline]
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
        where C: Compare<Q, K>
    {
        let cmp = &self.cmp;
        tree_find_with_mut(&mut self.root, |k| cmp.compare(key, k))
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// Returns `Inserted` when a new entry was added and `Failed`, dropping
    /// `key` and `value`, when the map already held the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::{InsertResult, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a"), InsertResult::Inserted);
    /// assert_eq!(map.insert(37, "b"), InsertResult::Failed);
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> InsertResult {
        let (inserted, _) = self.insert_with(key, || value);
        if inserted {
            InsertResult::Inserted
        } else {
            InsertResult::Failed
        }
    }

    /// Inserts a key-value pair, overwriting the value of an existing entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::{InsertResult, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert_or_update(37, "a"), InsertResult::Inserted);
    /// assert_eq!(map.insert_or_update(37, "b"), InsertResult::Updated);
    /// assert_eq!(map[&37], "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert_or_update(&mut self, key: K, value: V) -> InsertResult {
        let mut val = Some(value);
        let (inserted, slot) = self.insert_with(key, || val.take().unwrap());
        match val {
            None => InsertResult::Inserted,
            Some(val) => {
                debug_assert!(!inserted);
                unsafe { *slot = val };
                InsertResult::Updated
            }
        }
    }

    /// If a value for `key` does not exist, create one by callling `default`.
    /// Returns a mut reference to the new or existing value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut count: TreeMap<&str, usize> = TreeMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in vec!["a","b","a","c","a","b"] {
    ///     *count.get_or_insert(x, || 0) += 1;
    /// }
    /// assert_eq!(count[&"a"], 3);
    /// ```
    pub fn get_or_insert<F>(&mut self, key: K, default: F) -> &mut V
        where F: FnOnce() -> V
    {
        let (_, ret) = self.insert_with(key, default);
        unsafe { &mut *ret }
    }

    // The returned pointer stays valid across the rebalancing: nodes are
    // relinked, never moved.
    fn insert_with<F>(&mut self, key: K, default: F) -> (bool, *mut V)
        where F: FnOnce() -> V
    {
        let (inserted, ret) = insert(&mut self.root, ptr::null_mut(), key, default, &self.cmp);
        if inserted {
            self.length += 1;
            if let Some(root) = self.root.as_mut() {
                root.color = Color::Black;
            }
        }
        (inserted, ret)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
        where C: Compare<Q, K>
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
        where C: Compare<Q, K>
    {
        let mut done = false;
        let ret = remove(&mut self.root, Target::Key(key), &self.cmp, &mut done);
        if ret.is_some() {
            self.length -= 1;
            if let Some(root) = self.root.as_mut() {
                root.color = Color::Black;
            }
        }
        ret
    }

    /// Returns the value for which `f(key)` returns `Equal`. `f` is invoked
    /// with current key and guides tree navigation. That means `f` should
    /// be aware of natural ordering of the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut headers = TreeMap::new();
    /// headers.insert("Content-Type", "application/xml");
    /// headers.insert("User-Agent", "Curl-Rust/0.1");
    ///
    /// let ua = headers.find_with(|&k| "User-Agent".cmp(k));
    /// assert_eq!(*ua.unwrap(), "Curl-Rust/0.1");
    /// ```
    #[inline]
    pub fn find_with<F>(&self, f: F) -> Option<&V>
        where F: FnMut(&K) -> Ordering
    {
        tree_find_with(&self.root, f)
    }

    /// Mutable counterpart of `find_with`.
    #[inline]
    pub fn find_with_mut<F>(&mut self, f: F) -> Option<&mut V>
        where F: FnMut(&K) -> Ordering
    {
        tree_find_with_mut(&mut self.root, f)
    }

    /// Walks the tree depth-first in the given order, calling `visitor` on
    /// every entry until it returns `false`.
    ///
    /// Returns `true` if every entry was visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stable_rbtree::{Order, TreeMap};
    ///
    /// let map: TreeMap<i32, ()> = (1..8).map(|k| (k, ())).collect();
    ///
    /// let mut small = vec![];
    /// let finished = map.visit(Order::InOrder, |&k, _| {
    ///     small.push(k);
    ///     k < 3
    /// });
    /// assert!(!finished);
    /// assert_eq!(small, [1, 2, 3]);
    /// ```
    pub fn visit<F>(&self, order: Order, mut visitor: F) -> bool
        where F: FnMut(&K, &V) -> bool
    {
        traverse::visit(&self.root, order, &mut visitor)
    }

    /// Visits entries in ascending key order.
    pub fn visit_inorder<F>(&self, visitor: F) -> bool
        where F: FnMut(&K, &V) -> bool
    {
        self.visit(Order::InOrder, visitor)
    }

    /// Visits each node before its subtrees.
    pub fn visit_preorder<F>(&self, visitor: F) -> bool
        where F: FnMut(&K, &V) -> bool
    {
        self.visit(Order::PreOrder, visitor)
    }

    /// Visits each node after its subtrees.
    pub fn visit_postorder<F>(&self, visitor: F) -> bool
        where F: FnMut(&K, &V) -> bool
    {
        self.visit(Order::PostOrder, visitor)
    }

    /// Checks every structural invariant of the underlying red-black tree
    /// and returns the black height of the root.
    ///
    /// This is a debugging aid: it walks the whole tree, and a map built
    /// only through this API always passes.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let ret = validate::validate(&self.root, self.length, &self.cmp);
        if let Err(ref e) = ret {
            debug!("tree map failed validation: {}", e);
        }
        ret
    }
}

// range iterators.

impl<K, V, C> TreeMap<K, V, C>
    where C: Compare<K>
{
    // First node not below `bound`, or null.
    fn lower_node<Q: ?Sized>(&self, bound: Bound<&Q>) -> *mut TreeNode<K, V>
        where C: Compare<Q, K>
    {
        let mut found: *const TreeNode<K, V> = ptr::null();
        let mut current = &self.root;
        while let Some(ref n) = *current {
            let keep = match bound {
                Bound::Unbounded => true,
                Bound::Included(k) => self.cmp.compare(k, &n.key) != Greater,
                Bound::Excluded(k) => self.cmp.compare(k, &n.key) == Less,
            };
            if keep {
                found = &**n;
                current = &n.left;
            } else {
                current = &n.right;
            }
        }
        found as *mut TreeNode<K, V>
    }

    // Last node not above `bound`, or null.
    fn upper_node<Q: ?Sized>(&self, bound: Bound<&Q>) -> *mut TreeNode<K, V>
        where C: Compare<Q, K>
    {
        let mut found: *const TreeNode<K, V> = ptr::null();
        let mut current = &self.root;
        while let Some(ref n) = *current {
            let keep = match bound {
                Bound::Unbounded => true,
                Bound::Included(k) => self.cmp.compare(k, &n.key) != Less,
                Bound::Excluded(k) => self.cmp.compare(k, &n.key) == Greater,
            };
            if keep {
                found = &**n;
                current = &n.right;
            } else {
                current = &n.left;
            }
        }
        found as *mut TreeNode<K, V>
    }

    fn range_raw<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>) -> RawIter<K, V>
        where C: Compare<Min, K> + Compare<Max, K>
    {
        let front = self.lower_node(min);
        let back = self.upper_node(max);
        if front.is_null() || back.is_null() {
            return RawIter::empty();
        }
        // Crossed bounds leave front past back.
        let crossed = unsafe { self.cmp.compare(&(*front).key, &(*back).key) == Greater };
        if crossed {
            RawIter::empty()
        } else {
            RawIter::new(front, back)
        }
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the map, starting
    /// at min, and ending at max. If min is `Unbounded`, then it will be treated as "negative
    /// infinity", and if max is `Unbounded`, then it will be treated as "positive infinity".
    /// Thus range(Unbounded, Unbounded) will yield the whole collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Included, Unbounded};
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (&key, &value) in map.range(Included(&4), Included(&8)) {
    ///     println!("{}: {}", key, value);
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(Included(&4), Unbounded).next());
    /// ```
    pub fn range<'a, Min: ?Sized, Max: ?Sized>(&'a self,
                                               min: Bound<&Min>,
                                               max: Bound<&Max>)
                                               -> Range<'a, K, V>
        where C: Compare<Min, K> + Compare<Max, K>
    {
        Range::new(self.range_raw(min, max))
    }

    /// Mutable counterpart of `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included};
    /// use stable_rbtree::TreeMap;
    ///
    /// let mut map: TreeMap<&str, i32> = ["Alice", "Bob", "Carol", "Cheryl"].iter()
    ///                                                                      .map(|&s| (s, 0))
    ///                                                                      .collect();
    /// for (_, balance) in map.range_mut(Included(&"B"), Excluded(&"Cheryl")) {
    ///     *balance += 100;
    /// }
    /// assert_eq!(map[&"Alice"], 0);
    /// assert_eq!(map[&"Carol"], 100);
    /// ```
    pub fn range_mut<'a, Min: ?Sized, Max: ?Sized>(&'a mut self,
                                                   min: Bound<&Min>,
                                                   max: Bound<&Max>)
                                                   -> RangeMut<'a, K, V>
        where C: Compare<Min, K> + Compare<Max, K>
    {
        RangeMut::new(self.range_raw(min, max))
    }
}

// Next 2 functions have the same convention: comparator gets
// at input current key and returns search_key cmp cur_key
// (i.e. search_key.cmp(&cur_key))
fn tree_find_with<K, V, F>(node: &Link<K, V>, mut f: F) -> Option<&V>
    where F: FnMut(&K) -> Ordering
{
    let mut current = node;
    loop {
        match *current {
            Some(ref r) => {
                match f(&r.key) {
                    Less => current = &r.left,
                    Greater => current = &r.right,
                    Equal => return Some(&r.value),
                }
            }
            None => return None,
        }
    }
}

// See comments above tree_find_with
fn tree_find_with_mut<K, V, F>(node: &mut Link<K, V>, mut f: F) -> Option<&mut V>
    where F: FnMut(&K) -> Ordering
{
    let mut current = node;
    loop {
        let temp = current; // hack to appease borrowck
        match *temp {
            Some(ref mut r) => {
                match f(&r.key) {
                    Less => current = &mut r.left,
                    Greater => current = &mut r.right,
                    Equal => return Some(&mut r.value),
                }
            }
            None => return None,
        }
    }
}

// Descends to the key's position, hangs a red leaf there if the key is
// missing and repairs red links on the way back up. Returns whether a node
// was added and where the key's value lives.
fn insert<K, V, F, C>(node: &mut Link<K, V>,
                      parent: *mut TreeNode<K, V>,
                      key: K,
                      default: F,
                      cmp: &C)
                      -> (bool, *mut V)
    where C: Compare<K>,
          F: FnOnce() -> V
{
    match *node {
        Some(ref mut save) => {
            let save_ptr: *mut TreeNode<K, V> = &mut **save;
            let dir = match cmp.compare(&key, &save.key) {
                Less => Dir::Left,
                Greater => Dir::Right,
                Equal => return (false, &mut save.value),
            };
            let ret = insert(save.child_mut(dir), save_ptr, key, default, cmp);
            if ret.0 {
                insert_rebalance(save, dir);
            }
            ret
        }
        None => {
            let mut leaf = Box::new(TreeNode::new(key, default(), parent));
            let ret: *mut V = &mut leaf.value;
            *node = Some(leaf);
            (true, ret)
        }
    }
}

enum Target<'q, Q: ?Sized + 'q> {
    Key(&'q Q),
    // The greatest key of the subtree: the in-order predecessor of the
    // node whose left subtree is being searched.
    Max,
}

impl<'q, Q: ?Sized> Clone for Target<'q, Q> {
    fn clone(&self) -> Target<'q, Q> {
        *self
    }
}

impl<'q, Q: ?Sized> Copy for Target<'q, Q> {}

// Removes the target node below `node`. `done` turns true once no black
// height deficit is left for the callers to repair.
fn remove<K, V, C, Q: ?Sized>(node: &mut Link<K, V>,
                              target: Target<Q>,
                              cmp: &C,
                              done: &mut bool)
                              -> Option<(K, V)>
    where C: Compare<Q, K>
{
    let save = match node.as_mut() {
        None => {
            *done = true; // bottom of tree
            return None;
        }
        Some(save) => save,
    };

    let ord = match target {
        Target::Key(key) => cmp.compare(key, &save.key),
        Target::Max => if save.right.is_some() { Greater } else { Equal },
    };

    let (dir, ret) = match ord {
        Less => (Dir::Left, remove(&mut save.left, target, cmp, done)),
        Greater => (Dir::Right, remove(&mut save.right, target, cmp, done)),
        Equal if save.left.is_some() && save.right.is_some() => {
            // Pull the predecessor's entry up into this node, then repair
            // the left subtree it was taken from.
            let ret = remove(&mut save.left, Target::<Q>::Max, cmp, done).map(|(key, value)| {
                (replace(&mut save.key, key), replace(&mut save.value, value))
            });
            (Dir::Left, ret)
        }
        Equal => return unlink(node, done),
    };

    if ret.is_some() && !*done {
        *done = remove_rebalance(save, dir);
    }
    ret
}

// Splices out a node with at most one child.
fn unlink<K, V>(node: &mut Link<K, V>, done: &mut bool) -> Option<(K, V)> {
    let TreeNode { key, value, parent, left, right, color } = *node.take()?;
    let mut child = if left.is_none() { right } else { left };

    if color == Color::Red {
        *done = true;
    } else if let Some(c) = child.as_mut() {
        if c.is_red() {
            c.color = Color::Black;
            *done = true;
        }
    }

    if let Some(c) = child.as_mut() {
        c.parent = parent;
    }
    *node = child;
    Some((key, value))
}

impl<K, V, C> iter::FromIterator<(K, V)> for TreeMap<K, V, C>
    where C: Compare<K> + Default
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> TreeMap<K, V, C> {
        let mut map: TreeMap<K, V, C> = Default::default();
        map.extend(iter);
        map
    }
}

// Later pairs win, as with the standard maps.
impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
    where C: Compare<K>
{
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert_or_update(k, v);
        }
    }
}

impl<K: Hash, V: Hash, C> Hash for TreeMap<K, V, C>
    where C: Compare<K>
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        for elt in self.iter() {
            elt.hash(state);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
    where C: Compare<K>
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut TreeMap<K, V, C>
    where C: Compare<K>
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C>
    where C: Compare<K>
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> {
        self.into_iter()
    }
}

// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::mem::swap;
use std::ops::Not;
use std::ptr;

pub type Link<K, V> = Option<Box<TreeNode<K, V>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a node is meant. `!dir` is the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

impl Not for Dir {
    type Output = Dir;

    #[inline]
    fn not(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

// Every node owns its children through `left`/`right`. `parent` is a plain
// back pointer (null at the root) used only for navigation, never for
// freeing. Boxed nodes never move, so the pointer survives any shuffling of
// the boxes themselves.
pub struct TreeNode<K, V> {
    pub key: K,
    pub value: V,
    pub parent: *mut TreeNode<K, V>,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
    pub color: Color,
}

impl<K, V> TreeNode<K, V> {
    /// Creates a new red leaf hanging off `parent`.
    #[inline]
    pub fn new(key: K, value: V, parent: *mut TreeNode<K, V>) -> TreeNode<K, V> {
        TreeNode {
            key: key,
            value: value,
            parent: parent,
            left: None,
            right: None,
            color: Color::Red,
        }
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn child(&self, dir: Dir) -> &Link<K, V> {
        match dir {
            Dir::Left => &self.left,
            Dir::Right => &self.right,
        }
    }

    #[inline]
    pub fn child_mut(&mut self, dir: Dir) -> &mut Link<K, V> {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

/// An empty link counts as black.
#[inline]
pub fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().map_or(false, |n| n.is_red())
}

pub fn as_ptr<K, V>(link: &Link<K, V>) -> *const TreeNode<K, V> {
    match *link {
        Some(ref n) => &**n,
        None => ptr::null(),
    }
}

pub fn as_mut_ptr<K, V>(link: &mut Link<K, V>) -> *mut TreeNode<K, V> {
    match *link {
        Some(ref mut n) => &mut **n,
        None => ptr::null_mut(),
    }
}

// Rotate the subtree at `root` in direction `dir`: the child on the `!dir`
// side becomes the subtree root, the old root moves down on the `dir` side
// and is colored red, the promoted node black. Only boxes change hands.
pub fn rotate<K, V>(root: &mut Box<TreeNode<K, V>>, dir: Dir) {
    let odir = !dir;
    let old_parent = root.parent;
    let old_root: *mut TreeNode<K, V> = &mut **root;

    let mut save = root.child_mut(odir).take().expect("rotation pivot must exist");

    root.color = Color::Red;
    save.color = Color::Black;

    // The inner subtree of the pivot crosses over to the old root.
    *root.child_mut(odir) = save.child_mut(dir).take();
    if let Some(inner) = root.child_mut(odir).as_mut() {
        inner.parent = old_root;
    }

    swap(root, &mut save); // save now owns the old root
    root.parent = old_parent;
    save.parent = &mut **root;
    *root.child_mut(dir) = Some(save);
}

pub fn double_rotate<K, V>(root: &mut Box<TreeNode<K, V>>, dir: Dir) {
    if let Some(child) = root.child_mut(!dir).as_mut() {
        rotate(child, !dir);
    }
    rotate(root, dir);
}

// Navigation over raw pointers. Callers guarantee `node` is either null or
// points into a live tree; only the link fields are read.

pub unsafe fn leftmost<K, V>(mut node: *mut TreeNode<K, V>) -> *mut TreeNode<K, V> {
    if node.is_null() {
        return node;
    }
    loop {
        let left = as_ptr(&(*node).left) as *mut TreeNode<K, V>;
        if left.is_null() {
            return node;
        }
        debug_assert!((*left).parent == node);
        node = left;
    }
}

pub unsafe fn rightmost<K, V>(mut node: *mut TreeNode<K, V>) -> *mut TreeNode<K, V> {
    if node.is_null() {
        return node;
    }
    loop {
        let right = as_ptr(&(*node).right) as *mut TreeNode<K, V>;
        if right.is_null() {
            return node;
        }
        debug_assert!((*right).parent == node);
        node = right;
    }
}

/// Next node in key order, or null after the last one.
pub unsafe fn successor<K, V>(mut node: *mut TreeNode<K, V>) -> *mut TreeNode<K, V> {
    if node.is_null() {
        return node;
    }
    let right = as_ptr(&(*node).right) as *mut TreeNode<K, V>;
    if !right.is_null() {
        return leftmost(right);
    }
    // Climb while we are a right child.
    let mut parent = (*node).parent;
    while !parent.is_null() && as_ptr(&(*parent).right) == node as *const _ {
        node = parent;
        parent = (*node).parent;
    }
    parent
}

/// Previous node in key order, or null before the first one.
pub unsafe fn predecessor<K, V>(mut node: *mut TreeNode<K, V>) -> *mut TreeNode<K, V> {
    if node.is_null() {
        return node;
    }
    let left = as_ptr(&(*node).left) as *mut TreeNode<K, V>;
    if !left.is_null() {
        return rightmost(left);
    }
    let mut parent = (*node).parent;
    while !parent.is_null() && as_ptr(&(*parent).left) == node as *const _ {
        node = parent;
        parent = (*node).parent;
    }
    parent
}

// Deep copy with freshly wired parent pointers.
pub fn clone_link<K: Clone, V: Clone>(link: &Link<K, V>, parent: *mut TreeNode<K, V>) -> Link<K, V> {
    link.as_ref().map(|n| {
        let mut copy = Box::new(TreeNode {
            key: n.key.clone(),
            value: n.value.clone(),
            parent: parent,
            left: None,
            right: None,
            color: n.color,
        });
        let copy_ptr: *mut TreeNode<K, V> = &mut *copy;
        copy.left = clone_link(&n.left, copy_ptr);
        copy.right = clone_link(&n.right, copy_ptr);
        copy
    })
}

/// Hand-built subtrees for exercising individual cases.
#[cfg(test)]
pub mod build {
    use super::{Color, Link, TreeNode};
    use std::ptr;

    pub fn node(key: i32, color: Color, left: Link<i32, i32>, right: Link<i32, i32>) -> Box<TreeNode<i32, i32>> {
        let mut n = Box::new(TreeNode {
            key: key,
            value: key * 10,
            parent: ptr::null_mut(),
            left: left,
            right: right,
            color: color,
        });
        let n_ptr: *mut TreeNode<i32, i32> = &mut *n;
        if let Some(l) = n.left.as_mut() {
            l.parent = n_ptr;
        }
        if let Some(r) = n.right.as_mut() {
            r.parent = n_ptr;
        }
        n
    }

    pub fn red(key: i32, left: Link<i32, i32>, right: Link<i32, i32>) -> Link<i32, i32> {
        Some(node(key, Color::Red, left, right))
    }

    pub fn black(key: i32, left: Link<i32, i32>, right: Link<i32, i32>) -> Link<i32, i32> {
        Some(node(key, Color::Black, left, right))
    }

    /// `(key, color)` pairs in preorder.
    pub fn shape(link: &Link<i32, i32>) -> Vec<(i32, Color)> {
        fn walk(link: &Link<i32, i32>, out: &mut Vec<(i32, Color)>) {
            if let Some(n) = link.as_ref() {
                out.push((n.key, n.color));
                walk(&n.left, out);
                walk(&n.right, out);
            }
        }
        let mut out = vec![];
        walk(link, &mut out);
        out
    }

    /// Asserts every child's parent pointer names its structural parent.
    pub fn assert_parents(link: &Link<i32, i32>) {
        if let Some(n) = link.as_ref() {
            let n_ptr: *const TreeNode<i32, i32> = &**n;
            for child in [&n.left, &n.right] {
                if let Some(c) = child.as_ref() {
                    assert_eq!(c.parent as *const _, n_ptr, "bad parent of {}", c.key);
                }
                assert_parents(child);
            }
        }
    }
}

#[cfg(test)]
mod test_node {
    use super::build::{assert_parents, black, red, shape};
    use super::Color::{Black, Red};
    use super::{double_rotate, predecessor, rotate, successor, leftmost, rightmost, as_mut_ptr, Dir};
    use std::ptr;

    #[test]
    fn rotate_left_promotes_right_child() {
        //     2            4
        //    / \          / \
        //   1   4   ->   2   5
        //      / \      / \
        //     3   5    1   3
        let mut root = black(2, black(1, None, None), red(4, black(3, None, None), black(5, None, None)));
        rotate(root.as_mut().unwrap(), Dir::Left);

        assert_eq!(shape(&root),
                   vec![(4, Black), (2, Red), (1, Black), (3, Black), (5, Black)]);
        assert!(root.as_ref().unwrap().parent.is_null());
        assert_parents(&root);
    }

    #[test]
    fn rotate_keeps_outer_parent() {
        let mut top = black(10, red(5, None, black(7, None, None)), None);
        {
            let top_ptr: *mut _ = &mut **top.as_mut().unwrap();
            let left = top.as_mut().unwrap().left.as_mut().unwrap();
            rotate(left, Dir::Left);
            assert_eq!(left.key, 7);
            assert_eq!(left.parent, top_ptr);
        }
        assert_parents(&top);
    }

    #[test]
    fn double_rotate_right() {
        //     5           4
        //    /           / \
        //   3     ->    3   5
        //    \
        //     4
        let mut root = black(5, red(3, None, red(4, None, None)), None);
        double_rotate(root.as_mut().unwrap(), Dir::Right);

        assert_eq!(shape(&root), vec![(4, Black), (3, Red), (5, Red)]);
        assert_parents(&root);
    }

    #[test]
    fn navigation() {
        let mut root = black(4,
                             red(2, black(1, None, None), black(3, None, None)),
                             red(6, black(5, None, None), black(7, None, None)));
        unsafe {
            let first = leftmost(as_mut_ptr(&mut root));
            let last = rightmost(as_mut_ptr(&mut root));
            assert_eq!((*first).key, 1);
            assert_eq!((*last).key, 7);

            let mut keys = vec![];
            let mut cur = first;
            while !cur.is_null() {
                keys.push((*cur).key);
                cur = successor(cur);
            }
            assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);

            let mut keys = vec![];
            let mut cur = last;
            while !cur.is_null() {
                keys.push((*cur).key);
                cur = predecessor(cur);
            }
            assert_eq!(keys, vec![7, 6, 5, 4, 3, 2, 1]);

            assert!(successor::<i32, i32>(ptr::null_mut()).is_null());
        }
    }
}

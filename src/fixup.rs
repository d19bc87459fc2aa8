// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bottom-up repairs run on the way back out of the recursive insert and
//! remove drivers in `map.rs`.

use log::trace;

use super::node::{double_rotate, is_red, rotate, Color, Dir, TreeNode};

/// Repairs a red-red violation below `root` after an insertion into its
/// `dir` subtree.
///
/// Runs at every ancestor of a fresh node: recoloring pushes the red link
/// up one level, and the next caller has to look at it again.
pub fn insert_rebalance<K, V>(root: &mut Box<TreeNode<K, V>>, dir: Dir) {
    if !is_red(root.child(dir)) {
        return;
    }

    if is_red(root.child(!dir)) {
        trace!("insert fixup: color flip");
        root.color = Color::Red;
        for child in [root.left.as_mut(), root.right.as_mut()] {
            if let Some(child) = child {
                child.color = Color::Black;
            }
        }
        return;
    }

    let (outer_red, inner_red) = match root.child(dir) {
        Some(ref child) => (is_red(child.child(dir)), is_red(child.child(!dir))),
        None => return,
    };

    if outer_red {
        trace!("insert fixup: single rotation");
        rotate(root, !dir);
    } else if inner_red {
        trace!("insert fixup: double rotation");
        double_rotate(root, !dir);
    }
}

/// Repairs a black-height deficit in the `dir` subtree of `root`.
///
/// Returns `true` once the deficit is absorbed, `false` when the whole
/// subtree is now one black short and the parent must continue.
pub fn remove_rebalance<K, V>(root: &mut Box<TreeNode<K, V>>, dir: Dir) -> bool {
    if is_red(root.child(!dir)) {
        trace!("remove fixup: red sibling");
        // The old root moves down to the deficient side, red, and picks up
        // a black sibling. Finish the repair one level down.
        rotate(root, dir);
        return match root.child_mut(dir).as_mut() {
            Some(demoted) => rebalance_black_sibling(demoted, dir),
            None => true,
        };
    }
    rebalance_black_sibling(root, dir)
}

fn rebalance_black_sibling<K, V>(root: &mut Box<TreeNode<K, V>>, dir: Dir) -> bool {
    let (outer_red, inner_red) = match root.child(!dir) {
        Some(ref sibling) => (is_red(sibling.child(!dir)), is_red(sibling.child(dir))),
        None => return false,
    };

    if !outer_red && !inner_red {
        let done = root.is_red();
        trace!("remove fixup: recolor, done = {}", done);
        root.color = Color::Black;
        if let Some(sibling) = root.child_mut(!dir).as_mut() {
            sibling.color = Color::Red;
        }
        return done;
    }

    let saved = root.color;
    if outer_red {
        trace!("remove fixup: single rotation");
        rotate(root, dir);
    } else {
        trace!("remove fixup: double rotation");
        double_rotate(root, dir);
    }
    root.color = saved;
    for child in [root.left.as_mut(), root.right.as_mut()] {
        if let Some(child) = child {
            child.color = Color::Black;
        }
    }
    true
}

#[cfg(test)]
mod test_fixup {
    use super::super::node::build::{assert_parents, black, red, shape};
    use super::super::node::Color::{Black, Red};
    use super::super::node::Dir;
    use super::{insert_rebalance, remove_rebalance};

    #[test]
    fn insert_color_flip() {
        let mut root = black(2, red(1, red(0, None, None), None), red(3, None, None));
        insert_rebalance(root.as_mut().unwrap(), Dir::Left);
        assert_eq!(shape(&root), vec![(2, Red), (1, Black), (0, Red), (3, Black)]);
    }

    #[test]
    fn insert_outer_grandchild_single_rotation() {
        let mut root = black(3, red(2, red(1, None, None), None), None);
        insert_rebalance(root.as_mut().unwrap(), Dir::Left);
        assert_eq!(shape(&root), vec![(2, Black), (1, Red), (3, Red)]);
        assert_parents(&root);
    }

    #[test]
    fn insert_inner_grandchild_double_rotation() {
        let mut root = black(1, None, red(3, red(2, None, None), None));
        insert_rebalance(root.as_mut().unwrap(), Dir::Right);
        assert_eq!(shape(&root), vec![(2, Black), (1, Red), (3, Red)]);
        assert_parents(&root);
    }

    #[test]
    fn insert_no_violation() {
        let mut root = black(2, red(1, None, None), None);
        insert_rebalance(root.as_mut().unwrap(), Dir::Left);
        assert_eq!(shape(&root), vec![(2, Black), (1, Red)]);

        let mut root = black(2, black(1, red(0, None, None), None), None);
        insert_rebalance(root.as_mut().unwrap(), Dir::Left);
        assert_eq!(shape(&root), vec![(2, Black), (1, Black), (0, Red)]);
    }

    // In the remove cases the left subtree has just lost a black node, so
    // it is one short of the right one.

    #[test]
    fn remove_recolor_black_parent_propagates() {
        let mut root = black(1, None, black(2, None, None));
        assert!(!remove_rebalance(root.as_mut().unwrap(), Dir::Left));
        assert_eq!(shape(&root), vec![(1, Black), (2, Red)]);
    }

    #[test]
    fn remove_recolor_red_parent_absorbs() {
        let mut root = red(1, None, black(2, None, None));
        assert!(remove_rebalance(root.as_mut().unwrap(), Dir::Left));
        assert_eq!(shape(&root), vec![(1, Black), (2, Red)]);
    }

    #[test]
    fn remove_outer_red_nephew() {
        let mut root = black(1, None, black(2, None, red(3, None, None)));
        assert!(remove_rebalance(root.as_mut().unwrap(), Dir::Left));
        assert_eq!(shape(&root), vec![(2, Black), (1, Black), (3, Black)]);
        assert_parents(&root);
    }

    #[test]
    fn remove_inner_red_nephew_keeps_root_color() {
        let mut root = red(1, None, black(3, red(2, None, None), None));
        assert!(remove_rebalance(root.as_mut().unwrap(), Dir::Left));
        assert_eq!(shape(&root), vec![(2, Red), (1, Black), (3, Black)]);
        assert_parents(&root);
    }

    #[test]
    fn remove_red_sibling() {
        //    2                4
        //   / \              / \
        //  1   4      ->    2   5
        //     / \            \
        //    3   5            3
        // (1 removed above: the left side is one black short)
        let mut root = black(2,
                             black(1, None, None),
                             red(4, black(3, None, None), black(5, None, None)));
        // Detach 1 to simulate the deficit.
        root.as_mut().unwrap().left = None;
        assert!(remove_rebalance(root.as_mut().unwrap(), Dir::Left));
        assert_eq!(shape(&root), vec![(4, Black), (2, Black), (3, Red), (5, Black)]);
        assert_parents(&root);
    }
}

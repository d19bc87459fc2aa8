// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering::Less;
use std::error::Error;
use std::fmt;

use compare::Compare;

use super::node::{is_red, Link, TreeNode};

/// A broken red-black tree invariant, as reported by `TreeMap::validate`.
///
/// None of these can be produced through the public API of `TreeMap`; they
/// exist to catch bugs in the rebalancing code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    RedRed,
    /// Keys are not strictly ascending in order.
    OrderViolation,
    /// Two sibling subtrees have different black heights.
    BlackHeightMismatch { left: usize, right: usize },
    /// A node's parent pointer does not name its structural parent.
    ParentMismatch,
    /// The cached length differs from the number of reachable nodes.
    LengthMismatch { cached: usize, counted: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvariantViolation::RedRoot => write!(f, "root node is red"),
            InvariantViolation::RedRed => write!(f, "red node has a red child"),
            InvariantViolation::OrderViolation => write!(f, "keys out of order"),
            InvariantViolation::BlackHeightMismatch { left, right } => {
                write!(f, "black height mismatch: left {}, right {}", left, right)
            }
            InvariantViolation::ParentMismatch => write!(f, "parent pointer mismatch"),
            InvariantViolation::LengthMismatch { cached, counted } => {
                write!(f, "length is {} but {} nodes are reachable", cached, counted)
            }
        }
    }
}

impl Error for InvariantViolation {}

struct Checker<'a, K: 'a, C: 'a> {
    cmp: &'a C,
    prev: Option<&'a K>,
    count: usize,
}

impl<'a, K, C: Compare<K>> Checker<'a, K, C> {
    // Returns the black height of `link`, counting the nodes on any path
    // down to an empty position (empty positions count as zero).
    fn walk<V>(&mut self,
               link: &'a Link<K, V>,
               parent: *const TreeNode<K, V>)
               -> Result<usize, InvariantViolation> {
        let node = match *link {
            None => return Ok(0),
            Some(ref node) => node,
        };

        if node.parent as *const TreeNode<K, V> != parent {
            return Err(InvariantViolation::ParentMismatch);
        }
        if node.is_red() && (is_red(&node.left) || is_red(&node.right)) {
            return Err(InvariantViolation::RedRed);
        }

        let this: *const TreeNode<K, V> = &**node;
        let left = self.walk(&node.left, this)?;

        // In-order position: every key must be greater than the last one.
        if let Some(prev) = self.prev {
            if self.cmp.compare(prev, &node.key) != Less {
                return Err(InvariantViolation::OrderViolation);
            }
        }
        self.prev = Some(&node.key);
        self.count += 1;

        let right = self.walk(&node.right, this)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                left: left,
                right: right,
            });
        }

        Ok(if node.is_red() { left } else { left + 1 })
    }
}

/// Deep-checks the tree rooted at `root` and returns its black height.
pub fn validate<K, V, C>(root: &Link<K, V>, length: usize, cmp: &C) -> Result<usize, InvariantViolation>
    where C: Compare<K>
{
    if is_red(root) {
        return Err(InvariantViolation::RedRoot);
    }

    let mut checker = Checker {
        cmp: cmp,
        prev: None,
        count: 0,
    };
    let height = checker.walk(root, std::ptr::null())?;

    if checker.count != length {
        return Err(InvariantViolation::LengthMismatch {
            cached: length,
            counted: checker.count,
        });
    }
    Ok(height)
}

#[cfg(test)]
mod test_validate {
    use compare::natural;

    use super::super::node::build::{black, red};
    use super::{validate, InvariantViolation};

    #[test]
    fn empty_tree_is_valid() {
        assert_eq!(validate::<i32, i32, _>(&None, 0, &natural()), Ok(0));
    }

    #[test]
    fn valid_tree_reports_black_height() {
        let root = black(2, red(1, None, None), red(3, None, None));
        assert_eq!(validate(&root, 3, &natural()), Ok(1));

        let root = black(4,
                         black(2, red(1, None, None), None),
                         black(6, None, red(7, None, None)));
        assert_eq!(validate(&root, 5, &natural()), Ok(2));
    }

    #[test]
    fn red_root() {
        let root = red(1, None, None);
        assert_eq!(validate(&root, 1, &natural()), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn red_red() {
        let root = black(3, red(2, red(1, None, None), None), black(4, None, None));
        assert_eq!(validate(&root, 4, &natural()), Err(InvariantViolation::RedRed));
    }

    #[test]
    fn black_height_mismatch() {
        let root = black(2, black(1, None, None), None);
        assert_eq!(validate(&root, 2, &natural()),
                   Err(InvariantViolation::BlackHeightMismatch { left: 1, right: 0 }));
    }

    #[test]
    fn order_violation_deep_in_subtree() {
        // 5 sits in the left subtree of 4.
        let root = black(4, black(2, None, red(5, None, None)), black(6, None, None));
        assert_eq!(validate(&root, 4, &natural()), Err(InvariantViolation::OrderViolation));
    }

    #[test]
    fn parent_mismatch() {
        let mut root = black(2, red(1, None, None), red(3, None, None));
        root.as_mut().unwrap().left.as_mut().unwrap().parent = std::ptr::null_mut();
        assert_eq!(validate(&root, 3, &natural()), Err(InvariantViolation::ParentMismatch));
    }

    #[test]
    fn length_mismatch() {
        let root = black(2, red(1, None, None), red(3, None, None));
        assert_eq!(validate(&root, 4, &natural()),
                   Err(InvariantViolation::LengthMismatch { cached: 4, counted: 3 }));
    }

    #[test]
    fn display() {
        assert_eq!(InvariantViolation::BlackHeightMismatch { left: 2, right: 1 }.to_string(),
                   "black height mismatch: left 2, right 1");
    }
}

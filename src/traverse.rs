// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::node::Link;

/// Depth-first visiting order for `TreeMap::visit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree: ascending key order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

// Returns false as soon as the visitor does.
pub fn visit<K, V, F>(link: &Link<K, V>, order: Order, visitor: &mut F) -> bool
    where F: FnMut(&K, &V) -> bool
{
    let node = match *link {
        Some(ref node) => node,
        None => return true,
    };

    match order {
        Order::InOrder => {
            visit(&node.left, order, visitor) && visitor(&node.key, &node.value) &&
            visit(&node.right, order, visitor)
        }
        Order::PreOrder => {
            visitor(&node.key, &node.value) && visit(&node.left, order, visitor) &&
            visit(&node.right, order, visitor)
        }
        Order::PostOrder => {
            visit(&node.left, order, visitor) && visit(&node.right, order, visitor) &&
            visitor(&node.key, &node.value)
        }
    }
}

#[cfg(test)]
mod test_traverse {
    use super::super::node::build::{black, red};
    use super::{visit, Order};

    fn collect(order: Order) -> Vec<i32> {
        let root = black(4,
                         red(2, black(1, None, None), black(3, None, None)),
                         black(5, None, None));
        let mut keys = vec![];
        assert!(visit(&root, order, &mut |&k, _| {
            keys.push(k);
            true
        }));
        keys
    }

    #[test]
    fn orders() {
        assert_eq!(collect(Order::InOrder), vec![1, 2, 3, 4, 5]);
        assert_eq!(collect(Order::PreOrder), vec![4, 2, 1, 3, 5]);
        assert_eq!(collect(Order::PostOrder), vec![1, 3, 2, 5, 4]);
    }

    #[test]
    fn early_stop() {
        let root = black(2, red(1, None, None), red(3, None, None));
        let mut seen = vec![];
        let finished = visit(&root, Order::InOrder, &mut |&k, &v| {
            seen.push((k, v));
            k < 2
        });
        assert!(!finished);
        assert_eq!(seen, vec![(1, 10), (2, 20)]);
    }

    #[test]
    fn empty() {
        let mut called = false;
        assert!(visit::<i32, i32, _>(&None, Order::PostOrder, &mut |_, _| {
            called = true;
            false
        }));
        assert!(!called);
    }
}

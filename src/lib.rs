// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An ordered map based on a red-black tree.
//!
//! `TreeMap` keeps its entries sorted by key under a total order supplied
//! through the `compare` crate (the keys' natural `Ord` by default), and
//! offers O(log n) lookup, insertion and removal. Nodes carry parent links,
//! so `Cursor`s and the iterators can step forwards and backwards from any
//! position.
//!
//! ```rust
//! use stable_rbtree::{InsertResult, TreeMap};
//!
//! let mut map = TreeMap::new();
//! for k in [8, 3, 10, 1, 6] {
//!     assert_eq!(map.insert(k, k * 100), InsertResult::Inserted);
//! }
//! assert_eq!(map.insert(1, 0), InsertResult::Failed);
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, [1, 3, 6, 8, 10]);
//! assert!(map.validate().is_ok());
//! ```

mod fixup;
mod iter;
mod map;
mod node;
mod traverse;
mod validate;

pub use iter::{Cursor, IntoIter, Iter, IterMut, Keys, Range, RangeMut, Values, ValuesMut};
pub use map::{InsertResult, TreeMap};
pub use traverse::Order;
pub use validate::InvariantViolation;

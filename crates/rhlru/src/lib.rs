//! # rhlru
//!
//! Bounded in-memory LRU cache.
//!
//! ## Architecture
//! - **Arena**: one `Vec` of nodes linked into a circular list by `u32`
//!   offsets; slot 0 is the sentinel holding head and tail
//! - **Table**: robin-hood open addressing over 32-bit subhashes, backward
//!   shift deletion, sized for a 0.8 fill ratio
//! - **Reservoir**: unused and deleted slots stay linked at the tail, so the
//!   next insert always takes the tail slot and evicts only if it is live
//!
//! ```
//! use rhlru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["c", "a"]);
//! ```

#![warn(missing_docs)]

mod arena;
mod cache;
mod error;
mod iter;
mod shared;
mod table;

#[cfg(test)]
mod proptests;

pub use cache::{Displaced, LruCache, MAX_CAPACITY};
pub use equivalent::Equivalent;
pub use error::{Error, Result};
pub use iter::{Iter, IterMut, Keys, Values, ValuesMut};
pub use shared::SharedLruCache;

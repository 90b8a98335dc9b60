//! # scoreset
//!
//! A key→score index ordered by score, built as a skip list, plus a
//! HyperLogLog estimator for approximate distinct counts. These are the two
//! building blocks of a sorted-set (`ZADD`/`ZREM`/`PFADD` style) store.
//!
//! ## Core idea
//! Every key owns exactly one node. Nodes are linked at level 0 in score
//! order; each node is also linked at a random number of higher levels, so a
//! search can skip over long runs of level-0 entries. A hash map from key to
//! node makes existence checks and deletes O(1) to locate.

pub mod error;
pub mod hll;
pub mod index;
pub mod types;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use hll::HyperLogLog;
pub use index::{Options, OrderedIndex};
pub use types::{Entry, Score};

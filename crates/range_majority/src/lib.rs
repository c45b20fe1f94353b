//! Offline range frequency-threshold queries.
//!
//! Given a fixed integer array and a batch of `(l, r, k)` queries, each query
//! asks for the smallest value occurring at least `ceil(len / k)` times in
//! `a[l..=r]`. Since the whole batch is known up front, queries are answered
//! with a block-sweep (Mo's algorithm): a window slides over the array while
//! a treap of treaps — counts on the outside, the values at each count on the
//! inside — answers "smallest value with count >= threshold" in `O(log n)`
//! per probe and `O(log n)` per window step.

mod driver;
mod freq_index;
mod scheduler;
mod treap;

pub use driver::run;
pub use freq_index::FrequencyIndex;
pub use scheduler::{RangeQuery, solve};
pub use treap::{TreapMap, TreapMultiset};

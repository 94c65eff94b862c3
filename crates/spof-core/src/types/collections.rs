//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
pub use smallvec::SmallVec;

/// SmallVec sized for per-edge rule sets (at most two rules fire on one edge).
pub type SmallVec2<T> = SmallVec<[T; 2]>;

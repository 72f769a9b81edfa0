//! View derivation: the pure pipeline from raw state to rendered lists.
//!
//! Both halves are pure functions over the latest state; the engine calls
//! them after each mutation and memoizes the pipeline output on its inputs.

mod counts;
mod pipeline;

pub use counts::email_counts;
pub use pipeline::{derive_view, Section};

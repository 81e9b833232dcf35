//! Blockfall (workspace facade crate).
//!
//! This package keeps the `blockfall::{core,engine,input,score,term,types}`
//! public API stable while the implementation lives in dedicated crates
//! under `crates/`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_score as score;
pub use blockfall_term as term;
pub use blockfall_types as types;

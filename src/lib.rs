//! Madani Estimation scorekeeper (workspace facade crate).
//!
//! The rules engine, persistence, input mapping and rendering live in
//! dedicated crates under `crates/`; this package re-exports them as
//! `madani_estimation::{core,store,input,term,types}` and hosts the
//! application glue that wires them together.

pub mod app;
pub mod config;
pub mod logging;

pub use madani_core as core;
pub use madani_input as input;
pub use madani_store as store;
pub use madani_term as term;
pub use madani_types as types;

//! Minimal store/reducer seam.
//!
//! The coordinator only needs the generic action-dispatch + reduce contract
//! from its host; this module carries that contract so the crate is usable
//! and testable on its own.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State
//!    ↑           │
//!    │        Effect ──→ spawned task ──→ completion action
//!    └───────────────────────────────────────────┘
//! ```
//!
//! - **State**: owned by the [`Store`], mutated only inside reduce passes
//! - **Effect**: a deferred, cancellable description of async work
//! - **Store**: runs reduce passes serially; tasks re-enter via a channel

mod effect;
mod reducer;
mod runtime;

pub use effect::{Effect, TaskKey};
pub use reducer::Reducer;
pub use runtime::Store;

//! Loadable state machine and the higher-order reducer that drives it.
//!
//! # Lifecycle
//!
//! ```text
//! NotLoaded{false} ──ready_to_load──→ NotLoaded{true} ──pass──→ Loading{None}
//! Loaded{v}        ──mark_as_stale──→ Loaded{v,stale} ──pass──→ Loading{Some(v)}
//! Loading{..}      ──Ok(v)──→  Loaded{v}
//! Loading{..}      ──Err───→  Failed          (cancellation never lands here)
//! any              ──unload──→ NotLoaded{false}
//! ```

mod action;
mod container;
mod lens;
mod reducer;
mod value;

pub use action::{LoadHint, LoadableAction};
pub use container::{Loadable, ObservedLoadable};
pub use lens::{ActionPrism, StateLens};
pub use reducer::LoadableReducer;
pub use value::LoadableValue;

pub(crate) use reducer::{LoadFn, Predicate};

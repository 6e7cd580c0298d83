//! Reducer trait for the store seam.

use super::effect::Effect;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen. All
/// asynchronous work is described by the returned [`Effect`]; the reducer
/// body itself never suspends.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer handles.
    type Action;

    /// Process an action, mutating state in place, and describe any
    /// follow-up work as an effect.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;
}

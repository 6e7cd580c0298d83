//! Shared test fixtures: a single string loadable, a pair of independent
//! loadables, and an identified record type for pagination tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use loadstate::{
    ActionPrism, Effect, Identifiable, LoadError, LoadableAction, LoadableReducer, LoadableValue,
    Reducer, StateLens,
};

// --- load plans (rebindable mid-test) ---

/// What the next load should do. Tests rebind the shared slot to change
/// behavior between attempts.
#[derive(Debug, Clone)]
pub enum LoadPlan {
    Value(&'static str),
    Empty,
    Fail(&'static str),
    Cancelled,
    Sleep(Duration),
}

pub type SharedPlan = Arc<Mutex<LoadPlan>>;

pub fn plan(initial: LoadPlan) -> SharedPlan {
    Arc::new(Mutex::new(initial))
}

pub async fn run_plan(plan: LoadPlan) -> Result<Option<String>, LoadError> {
    match plan {
        LoadPlan::Value(value) => Ok(Some(value.to_string())),
        LoadPlan::Empty => Ok(None),
        LoadPlan::Fail(message) => Err(LoadError::failure(anyhow::anyhow!(message))),
        LoadPlan::Cancelled => Err(LoadError::Cancelled),
        LoadPlan::Sleep(duration) => {
            tokio::time::sleep(duration).await;
            Ok(Some("late".to_string()))
        }
    }
}

// --- single string loadable ---

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: LoadableValue<String>,
    /// Loadable actions the inner reducer observed, in order.
    pub seen: Vec<&'static str>,
}

#[derive(Debug)]
pub enum ProfileAction {
    /// Configured trigger: force a load.
    Fetch,
    /// Mark the profile stale; the coordinator reloads in the same pass.
    Refresh,
    /// Reset to the resting state; cancels any in-flight load.
    CancelFetch,
    Profile(LoadableAction<String>),
}

pub struct ProfileInner;

impl Reducer for ProfileInner {
    type State = ProfileState;
    type Action = ProfileAction;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        match action {
            ProfileAction::Fetch => {}
            ProfileAction::Refresh => state.profile.mark_as_stale(),
            ProfileAction::CancelFetch => state.profile.unload(),
            ProfileAction::Profile(action) => state.seen.push(label(&action)),
        }
        Effect::none()
    }
}

fn label(action: &LoadableAction<String>) -> &'static str {
    match action {
        LoadableAction::LoadRequestCompleted { result: Ok(_), .. } => "completed-ok",
        LoadableAction::LoadRequestCompleted { result: Err(_), .. } => "completed-err",
        LoadableAction::LoadRequestCancelled => "cancelled",
    }
}

pub fn profile_lens(state: &ProfileState) -> &LoadableValue<String> {
    &state.profile
}

pub fn profile_lens_mut(state: &mut ProfileState) -> &mut LoadableValue<String> {
    &mut state.profile
}

pub fn profile_action(action: &ProfileAction) -> Option<&LoadableAction<String>> {
    match action {
        ProfileAction::Profile(action) => Some(action),
        _ => None,
    }
}

pub fn profile_reducer(plan: SharedPlan) -> LoadableReducer<ProfileInner, String> {
    LoadableReducer::new(
        ProfileInner,
        StateLens::new(profile_lens, profile_lens_mut),
        ActionPrism::new(ProfileAction::Profile, profile_action),
        "profile",
        move |_state: ProfileState| run_plan(plan.lock().clone()),
    )
    .performs_load_on(|action| matches!(action, ProfileAction::Fetch))
}

// --- two independent loadables ---

#[derive(Debug, Clone, Default)]
pub struct PairState {
    pub left: LoadableValue<String>,
    pub right: LoadableValue<String>,
}

#[derive(Debug)]
pub enum PairAction {
    FetchLeft,
    FetchRight,
    Left(LoadableAction<String>),
    Right(LoadableAction<String>),
}

pub struct PairInner;

impl Reducer for PairInner {
    type State = PairState;
    type Action = PairAction;

    fn reduce(&self, _state: &mut Self::State, _action: Self::Action) -> Effect<Self::Action> {
        Effect::none()
    }
}

fn left_of(state: &PairState) -> &LoadableValue<String> {
    &state.left
}

fn left_of_mut(state: &mut PairState) -> &mut LoadableValue<String> {
    &mut state.left
}

fn left_action(action: &PairAction) -> Option<&LoadableAction<String>> {
    match action {
        PairAction::Left(action) => Some(action),
        _ => None,
    }
}

fn right_of(state: &PairState) -> &LoadableValue<String> {
    &state.right
}

fn right_of_mut(state: &mut PairState) -> &mut LoadableValue<String> {
    &mut state.right
}

fn right_action(action: &PairAction) -> Option<&LoadableAction<String>> {
    match action {
        PairAction::Right(action) => Some(action),
        _ => None,
    }
}

/// Two loadable reducers stacked over a no-op inner, each with its own task
/// key and load plan.
pub fn pair_reducer(
    left: SharedPlan,
    right: SharedPlan,
) -> LoadableReducer<LoadableReducer<PairInner, String>, String> {
    let right_reducer = LoadableReducer::new(
        PairInner,
        StateLens::new(right_of, right_of_mut),
        ActionPrism::new(PairAction::Right, right_action),
        "right",
        move |_state: PairState| run_plan(right.lock().clone()),
    )
    .performs_load_on(|action| matches!(action, PairAction::FetchRight));

    LoadableReducer::new(
        right_reducer,
        StateLens::new(left_of, left_of_mut),
        ActionPrism::new(PairAction::Left, left_action),
        "left",
        move |_state: PairState| run_plan(left.lock().clone()),
    )
    .performs_load_on(|action| matches!(action, PairAction::FetchLeft))
}

// --- identified record for pagination tests ---

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: u32,
    pub label: String,
}

impl Record {
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

impl Identifiable for Record {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

//! Synced command dispatch for the Basalt lockstep prototype.
//!
//! The lockstep core delivers an agreed, ordered stream of named text
//! commands to [`dispatch`], identically on every participant. This crate
//! resolves each action against a session-owned [`CommandRegistry`], runs
//! it through the deterministic execution gate, and executes the matching
//! handler against the synchronized [`sim_state::SimWorld`]. Log output is
//! the only participant-local effect a handler may have besides the
//! explicitly unsynced [`sim_state::LocalState`].

mod action;
pub mod args;
mod gate;
mod handlers;
mod hooks;
mod registry;
pub mod script_env;
mod toggle;

pub use action::SyncedAction;
pub use gate::{authorize, Refusal};
pub use handlers::{dispatch, Collaborators};
pub use hooks::{
    DirectSpawner, DispatchHooks, GiveSpec, NoHooks, NoScriptReloader, ScriptReloader,
    UnitSpawner,
};
pub use registry::{CommandId, CommandRegistry, CommandSpec, ModConfig, RegisterError};
pub use script_env::{CallinClass, MemoryScriptEnv, ScriptEnvHost};
pub use toggle::set_or_invert;

//! Shared reload protocol for the synced scripting environments.
//!
//! The rules environment and the gaia environment speak the same protocol,
//! parameterized by a [`ScriptEnvHost`]. Gated branches (reload, disable,
//! call-in toggles) require cheating to be enabled and the first simulation
//! frame to have passed; everything else is forwarded as a chat-style
//! message to the environment.

use tracing::{error, info, warn};

use sim_state::{PlayerId, SimWorld};

use crate::action::SyncedAction;

/// Which half of an environment's engine call-ins a toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallinClass {
    Synced,
    Unsynced,
}

impl CallinClass {
    fn label(self) -> &'static str {
        match self {
            CallinClass::Synced => "synced",
            CallinClass::Unsynced => "unsynced",
        }
    }
}

/// Host interface of one scripting environment.
pub trait ScriptEnvHost {
    fn name(&self) -> &'static str;
    fn is_loaded(&self) -> bool;
    /// Unloads (if loaded) and reloads the environment. Returns whether the
    /// environment is loaded afterwards.
    fn reload(&mut self) -> bool;
    fn unload(&mut self);
    fn callins_enabled(&self, class: CallinClass) -> bool;
    /// Flips the subscription for one call-in class and returns the new
    /// state.
    fn toggle_callins(&mut self, class: CallinClass) -> bool;
    fn dispatch_chat_message(&mut self, text: &str, player: Option<PlayerId>);
}

/// Runs one action against an environment host.
///
/// Returns `true` in every case: the action was recognized even when a
/// precondition refused it, and unrecognized arguments are valid chat
/// forwards by definition.
pub fn execute_script_env_action(
    host: &mut dyn ScriptEnvHost,
    action: &SyncedAction,
    world: &SimWorld,
) -> bool {
    let args = action.args();
    match args {
        "reload" | "enable" => {
            if !gated_branch_allowed(host, action, world) {
                return true;
            }
            if args == "enable" && host.is_loaded() {
                warn!("{} is already loaded", host.name());
                return true;
            }
            if host.reload() {
                info!("{} loaded", host.name());
            } else {
                error!("{} loading failed", host.name());
            }
        }
        "disable" => {
            if !gated_branch_allowed(host, action, world) {
                return true;
            }
            if host.is_loaded() {
                host.unload();
            }
            info!("{} disabled", host.name());
        }
        "scallins" | "ucallins" => {
            if !gated_branch_allowed(host, action, world) {
                return true;
            }
            let class = if args == "scallins" {
                CallinClass::Synced
            } else {
                CallinClass::Unsynced
            };
            let enabled = host.toggle_callins(class);
            info!(
                "{} {} callins {}",
                host.name(),
                class.label(),
                if enabled { "enabled" } else { "disabled" }
            );
        }
        _ => {
            // Not a protocol keyword; forward the raw text as chat.
            if host.is_loaded() {
                host.dispatch_chat_message(args, action.player());
            } else {
                info!("{} is not loaded", host.name());
            }
        }
    }
    true
}

/// Checks the shared precondition of the gated branches and logs which of
/// the two conditions is unmet.
fn gated_branch_allowed(
    host: &dyn ScriptEnvHost,
    action: &SyncedAction,
    world: &SimWorld,
) -> bool {
    if !world.global.cheat_enabled {
        warn!(
            "synced {} scripts require cheating to {}",
            host.name(),
            action.args()
        );
        return false;
    }
    if world.global.pre_sim_frame() {
        warn!(
            "cannot execute /{} {} before the first gameframe",
            action.command(),
            action.args()
        );
        return false;
    }
    true
}

/// In-memory environment used by the console binary and the tests.
#[derive(Debug)]
pub struct MemoryScriptEnv {
    name: &'static str,
    loaded: bool,
    synced_callins: bool,
    unsynced_callins: bool,
    /// When set, `reload` leaves the environment unloaded, simulating a
    /// script error during startup.
    pub fail_reload: bool,
    pub reload_count: u32,
    pub chat_log: Vec<(String, Option<PlayerId>)>,
}

impl MemoryScriptEnv {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            loaded: false,
            synced_callins: true,
            unsynced_callins: true,
            fail_reload: false,
            reload_count: 0,
            chat_log: Vec::new(),
        }
    }
}

impl ScriptEnvHost for MemoryScriptEnv {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn reload(&mut self) -> bool {
        self.reload_count += 1;
        self.loaded = !self.fail_reload;
        self.loaded
    }

    fn unload(&mut self) {
        self.loaded = false;
    }

    fn callins_enabled(&self, class: CallinClass) -> bool {
        match class {
            CallinClass::Synced => self.synced_callins,
            CallinClass::Unsynced => self.unsynced_callins,
        }
    }

    fn toggle_callins(&mut self, class: CallinClass) -> bool {
        let slot = match class {
            CallinClass::Synced => &mut self.synced_callins,
            CallinClass::Unsynced => &mut self.unsynced_callins,
        };
        *slot = !*slot;
        *slot
    }

    fn dispatch_chat_message(&mut self, text: &str, player: Option<PlayerId>) {
        self.chat_log.push((text.to_string(), player));
    }
}

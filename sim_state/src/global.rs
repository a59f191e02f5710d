use serde::{Deserialize, Serialize};

/// Synchronized global flags plus the simulation clock.
///
/// All fields are lockstep state. The boolean flags gate or alter simulation
/// outcomes (cheating, free construction, def editing, ...) and must only be
/// mutated through synced actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    pub cheat_enabled: bool,
    pub god_mode: bool,
    pub no_cost: bool,
    pub edit_defs_enabled: bool,
    pub dev_lua: bool,
    pub no_helper_ais: bool,
    pub no_spectator_chat: bool,
    frame: i32,
}

impl GlobalState {
    pub fn frame(&self) -> i32 {
        self.frame
    }

    /// True until the first simulation frame has been resolved.
    ///
    /// Several commands (scripting-environment reloads, `take`) behave
    /// differently before frame one.
    pub fn pre_sim_frame(&self) -> bool {
        self.frame <= 0
    }

    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }
}

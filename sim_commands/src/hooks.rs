//! Collaborator seams invoked by handlers.
//!
//! The dispatch layer stays narrow: anything that is really the business of
//! another engine subsystem (unit construction, selection refresh, script
//! reloads) goes through one of these traits. All implementations must be
//! deterministic and must only be called from the frame-processing thread.

use tracing::info;

use sim_state::{PlayerId, SimWorld, TeamId};

/// Notifications fired when a toggle changes state other subsystems depend
/// on. Default implementations are no-ops so hosts only wire what they use.
pub trait DispatchHooks {
    /// The helper-AI flag changed; selection state may need a refresh.
    fn possible_command_change(&mut self) {}

    /// God-mode changed; controlled-team assignments may need a refresh.
    fn controlled_teams_changed(&mut self) {}
}

/// Hook sink for hosts that need no notifications.
#[derive(Debug, Default)]
pub struct NoHooks;

impl DispatchHooks for NoHooks {}

/// One parsed `(count, type)` entry of a give batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveSpec {
    pub count: u32,
    pub unit_type: String,
}

/// Constructs units on behalf of the `give` command.
///
/// The whole batch is validated before this is called, so implementations
/// may assume the target team exists and never need to roll back.
pub trait UnitSpawner {
    fn give_units(&mut self, world: &mut SimWorld, specs: &[GiveSpec], team: TeamId);
}

/// Spawner that places units straight into the unit registry.
#[derive(Debug, Default)]
pub struct DirectSpawner;

impl UnitSpawner for DirectSpawner {
    fn give_units(&mut self, world: &mut SimWorld, specs: &[GiveSpec], team: TeamId) {
        for spec in specs {
            for _ in 0..spec.count {
                world.units.spawn(team, spec.unit_type.clone());
            }
            info!(
                "gave {} x {} to team {}",
                spec.count, spec.unit_type, team
            );
        }
    }
}

/// Reload endpoints for engine-side script assets (unit scripts and
/// explosion generators).
pub trait ScriptReloader {
    fn reload_unit_scripts(&mut self, args: &str, player: Option<PlayerId>);
    fn reload_explosion_generators(&mut self, args: &str);
}

/// Reloader for hosts without reloadable script assets.
#[derive(Debug, Default)]
pub struct NoScriptReloader;

impl ScriptReloader for NoScriptReloader {
    fn reload_unit_scripts(&mut self, _args: &str, _player: Option<PlayerId>) {}
    fn reload_explosion_generators(&mut self, _args: &str) {}
}

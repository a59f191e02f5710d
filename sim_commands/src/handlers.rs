//! Handler bodies and the dispatch entry point.
//!
//! Every handler mutates shared state through `&mut SimWorld` (synced) or
//! `&mut LocalState` (presentation only) and runs to completion on the
//! frame-processing thread. Log lines are participant-local and carry no
//! determinism obligation; everything else a handler touches must end up
//! identical on all participants.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use sim_state::{LocalState, SimWorld, TeamId, UnitId};

use crate::action::SyncedAction;
use crate::args::{parse_i32, parse_i64, parse_u32};
use crate::gate::authorize;
use crate::hooks::{DispatchHooks, GiveSpec, ScriptReloader, UnitSpawner};
use crate::registry::{CommandId, CommandRegistry};
use crate::script_env::{execute_script_env_action, ScriptEnvHost};
use crate::toggle::{log_system_status, set_or_invert};

/// External subsystems the handlers delegate to.
pub struct Collaborators<'a> {
    pub spawner: &'a mut dyn UnitSpawner,
    pub hooks: &'a mut dyn DispatchHooks,
    pub rules_env: &'a mut dyn ScriptEnvHost,
    pub gaia_env: &'a mut dyn ScriptEnvHost,
    pub script_reloader: &'a mut dyn ScriptReloader,
}

/// Resolves and executes one delivered synced action.
///
/// Called exactly once per action, in delivery order. Returns `true` when a
/// registered handler ran (including recognized-but-no-op outcomes) and
/// `false` for unknown commands and gate denials.
pub fn dispatch(
    world: &mut SimWorld,
    local: &mut LocalState,
    registry: &CommandRegistry,
    collabs: &mut Collaborators<'_>,
    action: &SyncedAction,
) -> bool {
    let Some(spec) = registry.lookup(action.command()) else {
        debug!("unknown synced command '{}'", action.command());
        return false;
    };
    let spec = *spec;

    if let Err(refusal) = authorize(&spec, action, world) {
        warn!("/{} refused: {}", action.command(), refusal);
        return false;
    }

    match spec.id {
        CommandId::Cheat => {
            world.global.cheat_enabled =
                set_or_invert(world.global.cheat_enabled, action.args(), false);
            log_system_status("Cheating", world.global.cheat_enabled);
            true
        }
        CommandId::NoHelp => {
            world.global.no_helper_ais =
                set_or_invert(world.global.no_helper_ais, action.args(), false);
            collabs.hooks.possible_command_change();
            log_system_status("No-helper-AIs", world.global.no_helper_ais);
            true
        }
        CommandId::NoSpecDraw => {
            // Presentation-only flag: mutates LocalState, never the synced
            // world, and no gate decision may ever read it.
            local.allow_spectator_draw =
                set_or_invert(local.allow_spectator_draw, action.args(), true);
            log_system_status("Spectator map drawing", local.allow_spectator_draw);
            true
        }
        CommandId::GodMode => {
            world.global.god_mode = set_or_invert(world.global.god_mode, action.args(), false);
            collabs.hooks.controlled_teams_changed();
            log_system_status("God-Mode", world.global.god_mode);
            true
        }
        CommandId::GlobalLos => execute_global_los(world, action),
        CommandId::NoCost => {
            world.global.no_cost = set_or_invert(world.global.no_cost, action.args(), false);
            log_system_status("Everything-for-free (no resource costs)", world.global.no_cost);
            true
        }
        CommandId::Give => execute_give(world, collabs, action),
        CommandId::Destroy => execute_destroy(world, action),
        CommandId::NoSpectatorChat => {
            world.global.no_spectator_chat =
                set_or_invert(world.global.no_spectator_chat, action.args(), false);
            log_system_status("Spectator chat", !world.global.no_spectator_chat);
            true
        }
        CommandId::ReloadCob => {
            collabs
                .script_reloader
                .reload_unit_scripts(action.args(), action.player());
            true
        }
        CommandId::ReloadCegs => {
            collabs
                .script_reloader
                .reload_explosion_generators(action.args());
            true
        }
        CommandId::DevLua => {
            world.global.dev_lua = set_or_invert(world.global.dev_lua, action.args(), false);
            log_system_status("Lua dev-mode (can cause desyncs if enabled)", world.global.dev_lua);
            true
        }
        CommandId::EditDefs => {
            world.global.edit_defs_enabled =
                set_or_invert(world.global.edit_defs_enabled, action.args(), false);
            log_system_status("Unit-, feature- & weapon-def editing", world.global.edit_defs_enabled);
            true
        }
        CommandId::LuaRules => execute_script_env_action(collabs.rules_env, action, world),
        CommandId::LuaGaia => execute_script_env_action(collabs.gaia_env, action, world),
        CommandId::Desync => execute_desync(world, local, action),
        CommandId::Atm => execute_atm(world, action),
        CommandId::Take => execute_take(world, action),
        CommandId::Skip => execute_skip(world, action),
    }
}

fn execute_global_los(world: &mut SimWorld, action: &SyncedAction) -> bool {
    let args = action.args();
    if args.is_empty() {
        world.los.invert_all();
        info!(
            "global LOS toggled for all {} allyteams",
            world.los.ally_team_count()
        );
        return true;
    }
    match parse_u32(args, "allyteam") {
        Ok(ally_team) if world.los.invert(ally_team as usize) => {
            info!("global LOS toggled for allyteam {ally_team}");
            true
        }
        Ok(ally_team) => {
            warn!("bad allyteam {ally_team}");
            false
        }
        Err(err) => {
            warn!("{err}");
            false
        }
    }
}

/// Parse failure for a give batch. Any error refuses the whole action so no
/// partial spawn can happen.
#[derive(Debug, Error, PartialEq, Eq)]
enum GiveParseError {
    #[error("empty unit specification")]
    Empty,
    #[error("count {0} is not followed by a unit type")]
    DanglingCount(u32),
    #[error("unexpected second count {0}")]
    DoubleCount(u32),
    #[error("numeric token '{0}' is out of range")]
    BadNumber(String),
}

/// Grammar: `[count] unit-type [[count] unit-type ...] [target-team]`.
/// A numeric token counts the following type (default 1); one trailing
/// numeric token names the target team.
fn parse_give_args(args: &str) -> Result<(Vec<GiveSpec>, Option<u32>), GiveParseError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let mut specs = Vec::new();
    let mut pending_count: Option<u32> = None;
    let mut team: Option<u32> = None;

    for (index, token) in tokens.iter().enumerate() {
        if token.chars().all(|c| c.is_ascii_digit()) {
            let value = token
                .parse::<u32>()
                .map_err(|_| GiveParseError::BadNumber(token.to_string()))?;
            if let Some(previous) = pending_count {
                return Err(GiveParseError::DoubleCount(previous));
            }
            if index + 1 == tokens.len() && !specs.is_empty() {
                team = Some(value);
            } else {
                pending_count = Some(value);
            }
        } else {
            specs.push(GiveSpec {
                count: pending_count.take().unwrap_or(1),
                unit_type: token.to_string(),
            });
        }
    }

    if let Some(count) = pending_count {
        return Err(GiveParseError::DanglingCount(count));
    }
    if specs.is_empty() {
        return Err(GiveParseError::Empty);
    }
    Ok((specs, team))
}

fn execute_give(
    world: &mut SimWorld,
    collabs: &mut Collaborators<'_>,
    action: &SyncedAction,
) -> bool {
    // The gate already required a valid player for this command.
    let Some(issuer_team) = action
        .player()
        .and_then(|id| world.players.player(id))
        .map(|player| player.team)
    else {
        return false;
    };

    let (specs, team) = match parse_give_args(action.args()) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("/give '{}' rejected: {}", action.args(), err);
            return false;
        }
    };
    let team = team.map(TeamId).unwrap_or(issuer_team);
    if !world.teams.contains(team) {
        warn!("/give rejected: team {team} does not exist");
        return false;
    }

    collabs.spawner.give_units(world, &specs, team);
    true
}

fn execute_destroy(world: &mut SimWorld, action: &SyncedAction) -> bool {
    info!("destroying units: {}", action.args());
    for token in action.args().split_whitespace() {
        match parse_u32(token, "unit id") {
            Ok(raw) => {
                let id = UnitId(raw);
                match world.units.kill(id, None, false, false) {
                    Ok(()) => info!("unit {id} destroyed"),
                    Err(err) => warn!("{err}"),
                }
            }
            // A bad token never aborts the rest of the batch.
            Err(err) => warn!("{err}; continuing"),
        }
    }
    true
}

fn execute_desync(world: &mut SimWorld, local: &LocalState, action: &SyncedAction) -> bool {
    error!("desyncing in frame {}", world.global.frame());

    // Only the issuing participant mutates; everyone else runs the same
    // handler as a no-op. This is the one deliberate lockstep violation in
    // the table and exists to exercise desync detection.
    if local.local_player != action.player() {
        return true;
    }
    let last_unit = world.units.iter().map(|(id, _)| id).next_back();
    if let Some(id) = last_unit {
        if let Some(unit) = world.units.unit_by_id_mut(id) {
            unit.x += 2;
        }
    }
    true
}

fn execute_atm(world: &mut SimWorld, action: &SyncedAction) -> bool {
    let Some(team) = action
        .player()
        .and_then(|id| world.players.player(id))
        .map(|player| player.team)
    else {
        return false;
    };

    let args = action.args();
    let amount = if args.is_empty() {
        1000
    } else {
        match parse_i64(args, "atm amount") {
            Ok(value) => value,
            Err(err) => {
                warn!("{err}; crediting nothing");
                0
            }
        }
    };
    let amount = amount.max(0);

    if let Some(team) = world.teams.team_mut(team) {
        team.add_metal(amount);
        team.add_energy(amount);
    }
    info!("credited team {team} with {amount} metal and {amount} energy");
    true
}

fn execute_take(world: &mut SimWorld, action: &SyncedAction) -> bool {
    let Some(actor) = action
        .player()
        .and_then(|id| world.players.player(id))
        .cloned()
    else {
        return false;
    };

    if actor.spectator && !world.global.cheat_enabled {
        warn!("/take refused: spectators may only take under cheat-mode");
        return false;
    }
    // Before frame one there is nothing to transfer; report handled.
    if world.global.pre_sim_frame() {
        return true;
    }

    for team_id in world.teams.ids() {
        if !world.teams.allied_with(team_id, actor.team) {
            continue;
        }
        if world.players.team_has_active_player(team_id) {
            continue;
        }
        world.give_everything_to(team_id, actor.team);
        if team_id != actor.team {
            info!("transferred abandoned team {team_id} to team {}", actor.team);
        }
    }
    true
}

fn execute_skip(world: &mut SimWorld, action: &SyncedAction) -> bool {
    let args = action.args();
    if let Some(rest) = args.strip_prefix("start") {
        match parse_i32(rest.trim(), "skip target frame") {
            Ok(target_frame) => {
                world.skip.start(target_frame);
                info!("skipping to frame {target_frame}");
            }
            Err(_) => warn!("/{}: wrong syntax", action.command()),
        }
    } else if args == "end" {
        world.skip.end();
        info!("skip finished");
    } else {
        warn!("/{}: wrong syntax", action.command());
    }
    true
}

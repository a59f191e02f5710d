//! Interactive console for exercising the synced command table.
//!
//! Reads one command line per stdin line and dispatches it against a small
//! demo world as player 0. Meta lines starting with `#` drive the session:
//! `#frame [n]` advances the clock, `#hash` prints the synced world digest,
//! `#sweep` runs the unit cleanup sweep, `#quit` exits.

use std::io::{self, BufRead};

use tracing::{info, warn};

use sim_commands::{
    dispatch, Collaborators, CommandRegistry, DirectSpawner, MemoryScriptEnv, ModConfig,
    NoHooks, NoScriptReloader, SyncedAction,
};
use sim_state::{
    world_hash, AllyTeamId, LocalState, Player, PlayerId, SimWorld, Team, TeamId,
};

fn demo_world() -> SimWorld {
    let mut world = SimWorld::new(2);
    world.teams.insert(TeamId(0), Team::new(AllyTeamId(0)));
    world.teams.insert(TeamId(1), Team::new(AllyTeamId(0)));
    world.teams.insert(TeamId(2), Team::new(AllyTeamId(1)));
    world.players.insert(
        PlayerId(0),
        Player {
            team: TeamId(0),
            active: true,
            spectator: false,
        },
    );
    world.players.insert(
        PlayerId(1),
        Player {
            team: TeamId(2),
            active: true,
            spectator: false,
        },
    );
    world.units.spawn(TeamId(1), "tank");
    world.units.spawn(TeamId(1), "scout");
    world.units.spawn(TeamId(2), "tank");
    world
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut world = demo_world();
    let mut local = LocalState {
        allow_spectator_draw: true,
        local_player: Some(PlayerId(0)),
    };
    let registry = CommandRegistry::with_default_commands(&ModConfig {
        allow_desync_debug: true,
        ..ModConfig::default()
    });

    let mut spawner = DirectSpawner;
    let mut hooks = NoHooks;
    let mut rules_env = MemoryScriptEnv::new("LuaRules");
    let mut gaia_env = MemoryScriptEnv::new("LuaGaia");
    let mut reloader = NoScriptReloader;

    info!(
        commands = registry.len(),
        "console ready; issuing as player 0"
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("stdin read failed: {err}");
                break;
            }
        };

        if let Some(meta) = line.trim().strip_prefix('#') {
            if !run_meta(meta, &mut world) {
                break;
            }
            continue;
        }

        let Some(action) = SyncedAction::from_line(&line, Some(PlayerId(0))) else {
            continue;
        };
        let mut collabs = Collaborators {
            spawner: &mut spawner,
            hooks: &mut hooks,
            rules_env: &mut rules_env,
            gaia_env: &mut gaia_env,
            script_reloader: &mut reloader,
        };
        let handled = dispatch(&mut world, &mut local, &registry, &mut collabs, &action);
        if !handled {
            warn!("'{}' was not handled", action.command());
        }
    }
}

fn run_meta(meta: &str, world: &mut SimWorld) -> bool {
    let mut parts = meta.split_whitespace();
    match parts.next() {
        Some("frame") => {
            let steps = parts
                .next()
                .and_then(|token| token.parse::<u32>().ok())
                .unwrap_or(1);
            for _ in 0..steps {
                world.global.advance_frame();
            }
            info!("frame is now {}", world.global.frame());
        }
        Some("hash") => match world_hash(world) {
            Ok(hash) => info!("world hash {hash:#018x}"),
            Err(err) => warn!("hashing failed: {err}"),
        },
        Some("sweep") => {
            let swept = world.units.sweep();
            info!("swept {} dead units", swept.len());
        }
        Some("quit") => return false,
        other => warn!("unknown meta command {other:?}"),
    }
    true
}

use sim_commands::{
    dispatch, Collaborators, CommandRegistry, DirectSpawner, MemoryScriptEnv, ModConfig,
    NoHooks, NoScriptReloader, SyncedAction,
};
use sim_state::{
    world_hash, AllyTeamId, LocalState, Player, PlayerId, SimWorld, Team, TeamId,
};

/// One simulated lockstep participant: a synced world plus all the
/// participant-local pieces (presentation state, collaborators).
pub struct Participant {
    pub world: SimWorld,
    pub local: LocalState,
    pub registry: CommandRegistry,
    pub spawner: DirectSpawner,
    pub hooks: NoHooks,
    pub rules_env: MemoryScriptEnv,
    pub gaia_env: MemoryScriptEnv,
    pub reloader: NoScriptReloader,
}

impl Participant {
    pub fn new(local_player: Option<PlayerId>, config: &ModConfig) -> Self {
        Self {
            world: standard_world(),
            local: LocalState {
                allow_spectator_draw: true,
                local_player,
            },
            registry: CommandRegistry::with_default_commands(config),
            spawner: DirectSpawner,
            hooks: NoHooks,
            rules_env: MemoryScriptEnv::new("LuaRules"),
            gaia_env: MemoryScriptEnv::new("LuaGaia"),
            reloader: NoScriptReloader,
        }
    }

    pub fn apply(&mut self, action: &SyncedAction) -> bool {
        let mut collabs = Collaborators {
            spawner: &mut self.spawner,
            hooks: &mut self.hooks,
            rules_env: &mut self.rules_env,
            gaia_env: &mut self.gaia_env,
            script_reloader: &mut self.reloader,
        };
        dispatch(
            &mut self.world,
            &mut self.local,
            &self.registry,
            &mut collabs,
            action,
        )
    }

    pub fn apply_line(&mut self, line: &str, player: Option<PlayerId>) -> bool {
        let action = SyncedAction::from_line(line, player).expect("non-blank command line");
        self.apply(&action)
    }

    pub fn hash(&self) -> u64 {
        world_hash(&self.world).expect("synced world hashes")
    }
}

/// Two allied teams (0, 1) against team 2. Player 0 owns team 0, player 1
/// owns team 2, player 2 spectates. Team 1 starts abandoned with a
/// stockpile and a few units.
pub fn standard_world() -> SimWorld {
    let mut world = SimWorld::new(2);
    world.teams.insert(TeamId(0), Team::new(AllyTeamId(0)));
    world.teams.insert(TeamId(1), Team::new(AllyTeamId(0)));
    world.teams.insert(TeamId(2), Team::new(AllyTeamId(1)));
    world
        .teams
        .team_mut(TeamId(1))
        .expect("team 1")
        .add_metal(300);

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
    world.players.insert(
        PlayerId(2),
        Player {
            team: TeamId(0),
            active: true,
            spectator: true,
        },
    );

    // Unit ids 0..=3.
    world.units.spawn(TeamId(0), "tank");
    world.units.spawn(TeamId(1), "tank");
    world.units.spawn(TeamId(1), "scout");
    world.units.spawn(TeamId(2), "tank");
    world
}

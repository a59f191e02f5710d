use serde::{Deserialize, Serialize};

use crate::global::GlobalState;
use crate::los::GlobalLosTable;
use crate::players::{PlayerDirectory, PlayerId};
use crate::skip::SkipState;
use crate::teams::{TeamDirectory, TeamId};
use crate::units::UnitRegistry;

/// The complete synchronized simulation state referenced by command
/// handlers.
///
/// The simulation core owns the single instance; handlers receive it by
/// reference from the single frame-processing thread, so no internal
/// locking exists or is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimWorld {
    pub global: GlobalState,
    pub los: GlobalLosTable,
    pub players: PlayerDirectory,
    pub teams: TeamDirectory,
    pub units: UnitRegistry,
    pub skip: SkipState,
}

impl SimWorld {
    pub fn new(ally_team_count: usize) -> Self {
        Self {
            los: GlobalLosTable::new(ally_team_count),
            ..Self::default()
        }
    }

    /// Hands every unit and stockpiled resource of `from` to `to`, the team
    /// reassignment performed by the `take` command on abandoned teams.
    pub fn give_everything_to(&mut self, from: TeamId, to: TeamId) {
        self.teams.transfer_resources(from, to);
        self.units.transfer_team_units(from, to);
    }
}

/// Participant-local state, outside the lockstep contract.
///
/// Never serialized into the synced hash and never consulted by the
/// execution gate: a divergence here must not be able to diverge the
/// simulation (the deliberate exception being the desync debug command,
/// which exists to manufacture exactly that).
#[derive(Debug, Clone, Default)]
pub struct LocalState {
    pub allow_spectator_draw: bool,
    pub local_player: Option<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::{AllyTeamId, Team};

    #[test]
    fn give_everything_moves_units_and_resources() {
        let mut world = SimWorld::new(1);
        world.teams.insert(TeamId(0), Team::new(AllyTeamId(0)));
        world.teams.insert(TeamId(1), Team::new(AllyTeamId(0)));
        world
            .teams
            .team_mut(TeamId(1))
            .expect("team 1")
            .add_metal(500);
        let unit = world.units.spawn(TeamId(1), "tank");

        world.give_everything_to(TeamId(1), TeamId(0));

        assert_eq!(world.teams.team(TeamId(0)).expect("team 0").metal, 500);
        assert_eq!(world.units.unit_by_id(unit).expect("unit").team, TeamId(0));
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one controllable team.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an alliance of teams sharing vision.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AllyTeamId(pub u32);

impl fmt::Display for AllyTeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One team's resource stockpiles and alliance membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub metal: i64,
    pub energy: i64,
    pub ally_team: AllyTeamId,
}

impl Team {
    pub fn new(ally_team: AllyTeamId) -> Self {
        Self {
            metal: 0,
            energy: 0,
            ally_team,
        }
    }

    pub fn add_metal(&mut self, amount: i64) {
        self.metal = self.metal.saturating_add(amount);
    }

    pub fn add_energy(&mut self, amount: i64) {
        self.energy = self.energy.saturating_add(amount);
    }
}

/// Registry of active teams, keyed by id in deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDirectory {
    teams: BTreeMap<TeamId, Team>,
}

impl TeamDirectory {
    pub fn insert(&mut self, id: TeamId, team: Team) {
        self.teams.insert(id, team);
    }

    pub fn active_team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.teams.contains_key(&id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&id)
    }

    pub fn ids(&self) -> Vec<TeamId> {
        self.teams.keys().copied().collect()
    }

    pub fn allied_with(&self, a: TeamId, b: TeamId) -> bool {
        match (self.teams.get(&a), self.teams.get(&b)) {
            (Some(a), Some(b)) => a.ally_team == b.ally_team,
            _ => false,
        }
    }

    /// Moves every stockpiled resource from one team to another. A self
    /// transfer is a no-op.
    pub fn transfer_resources(&mut self, from: TeamId, to: TeamId) {
        if from == to {
            return;
        }
        let Some(source) = self.teams.get_mut(&from) else {
            return;
        };
        let metal = std::mem::take(&mut source.metal);
        let energy = std::mem::take(&mut source.energy);
        if let Some(target) = self.teams.get_mut(&to) {
            target.add_metal(metal);
            target.add_energy(energy);
        }
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::teams::TeamId;

/// Process-unique unit identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a unit died. Recorded when a kill is requested and consumed by the
/// cleanup sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    pub attacker: Option<UnitId>,
    pub crushed: bool,
    pub explosive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub team: TeamId,
    pub unit_type: String,
    pub x: i32,
    death: Option<DeathEvent>,
}

impl Unit {
    pub fn new(team: TeamId, unit_type: impl Into<String>) -> Self {
        Self {
            team,
            unit_type: unit_type.into(),
            x: 0,
            death: None,
        }
    }

    pub fn is_dying(&self) -> bool {
        self.death.is_some()
    }
}

/// Error returned when a kill request cannot be honored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KillRejected {
    #[error("unit {0} does not exist")]
    Unknown(UnitId),
    #[error("unit {0} is already awaiting cleanup")]
    AlreadyDying(UnitId),
}

/// Registry owning all live units.
///
/// Kill semantics are deferred: a killed unit stays in the registry, marked
/// dying, until [`UnitRegistry::sweep`] runs at frame end. A second kill on
/// the same id is rejected rather than recorded twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRegistry {
    units: BTreeMap<UnitId, Unit>,
    next_id: u32,
}

impl UnitRegistry {
    pub fn spawn(&mut self, team: TeamId, unit_type: impl Into<String>) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.insert(id, Unit::new(team, unit_type));
        id
    }

    pub fn unit_by_id(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_by_id_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Number of units not yet awaiting cleanup.
    pub fn live_count(&self) -> usize {
        self.units.values().filter(|unit| !unit.is_dying()).count()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (UnitId, &Unit)> {
        self.units.iter().map(|(id, unit)| (*id, unit))
    }

    pub fn kill(
        &mut self,
        id: UnitId,
        attacker: Option<UnitId>,
        crushed: bool,
        explosive: bool,
    ) -> Result<(), KillRejected> {
        let unit = self.units.get_mut(&id).ok_or(KillRejected::Unknown(id))?;
        if unit.is_dying() {
            return Err(KillRejected::AlreadyDying(id));
        }
        unit.death = Some(DeathEvent {
            attacker,
            crushed,
            explosive,
        });
        Ok(())
    }

    /// Removes every unit whose kill was requested since the last sweep and
    /// returns their ids in ascending order.
    pub fn sweep(&mut self) -> Vec<UnitId> {
        let dead: Vec<UnitId> = self
            .units
            .iter()
            .filter(|(_, unit)| unit.is_dying())
            .map(|(id, _)| *id)
            .collect();
        for id in &dead {
            self.units.remove(id);
        }
        dead
    }

    /// Reassigns every unit of `from` to `to`. Dying units are left with
    /// their original team so the cleanup sweep attributes them correctly.
    pub fn transfer_team_units(&mut self, from: TeamId, to: TeamId) {
        if from == to {
            return;
        }
        for unit in self.units.values_mut() {
            if unit.team == from && !unit.is_dying() {
                unit.team = to;
            }
        }
    }
}

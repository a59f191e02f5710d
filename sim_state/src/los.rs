use serde::{Deserialize, Serialize};

/// Per-allyteam global line-of-sight bits.
///
/// A set bit makes the whole map permanently visible to that ally team. The
/// table length is fixed at session start to the active ally-team count, so
/// index validation is itself deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalLosTable {
    bits: Vec<bool>,
}

impl Default for GlobalLosTable {
    fn default() -> Self {
        GlobalLosTable::new(0)
    }
}

impl GlobalLosTable {
    pub fn new(ally_team_count: usize) -> Self {
        Self {
            bits: vec![false; ally_team_count],
        }
    }

    pub fn ally_team_count(&self) -> usize {
        self.bits.len()
    }

    pub fn is_enabled(&self, ally_team: usize) -> bool {
        self.bits.get(ally_team).copied().unwrap_or(false)
    }

    /// Inverts one ally team's bit. Returns `false` without mutating when the
    /// index is out of range.
    pub fn invert(&mut self, ally_team: usize) -> bool {
        match self.bits.get_mut(ally_team) {
            Some(bit) => {
                *bit = !*bit;
                true
            }
            None => false,
        }
    }

    pub fn invert_all(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
    }
}

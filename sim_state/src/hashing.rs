use std::hash::Hasher;

use thiserror::Error;

use crate::world::SimWorld;

/// A deterministic FNV-1a 64-bit hasher.
///
/// Used instead of `DefaultHasher` (which is randomized per process) so the
/// same world state hashes to the same value on every participant.
#[derive(Debug, Default)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Error produced when the synced world cannot be put into canonical byte
/// form for hashing.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("world serialization failed: {0}")]
    Serialize(#[from] bincode::Error),
}

/// Digest of the synchronized world state.
///
/// Two participants that processed the same ordered action stream must
/// produce the same value; a mismatch means the lockstep contract was
/// broken somewhere.
pub fn world_hash(world: &SimWorld) -> Result<u64, HashError> {
    let bytes = bincode::serialize(world)?;
    let mut hasher = FnvHasher::new();
    hasher.write(&bytes);
    Ok(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::{AllyTeamId, Team, TeamId};

    #[test]
    fn equal_worlds_hash_equal() {
        let mut a = SimWorld::new(2);
        a.teams.insert(TeamId(0), Team::new(AllyTeamId(0)));
        let b = a.clone();
        assert_eq!(
            world_hash(&a).expect("hash a"),
            world_hash(&b).expect("hash b")
        );
    }

    #[test]
    fn flag_flip_changes_the_hash() {
        let a = SimWorld::new(2);
        let mut b = a.clone();
        b.global.cheat_enabled = true;
        assert_ne!(
            world_hash(&a).expect("hash a"),
            world_hash(&b).expect("hash b")
        );
    }
}

//! Level-to-enemy-count progression.

use scavenger_core::{DomainError, LevelNumber};

/// Number of enemies spawned on the provided level: `floor(log2(level))`.
///
/// Level one spawns none, and every doubling of the level adds one enemy.
pub fn enemy_count(level: i64) -> Result<u32, DomainError> {
    if level < 1 {
        return Err(DomainError::LevelOutOfRange { level });
    }
    Ok(level.ilog2())
}

/// Infallible form of [`enemy_count`] for already validated level numbers.
#[must_use]
pub fn enemy_count_for(level: LevelNumber) -> u32 {
    level.get().ilog2()
}

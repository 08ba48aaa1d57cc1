use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod army;
pub mod battle;
pub mod faces;
pub mod odds;

pub use army::Army;
pub use battle::{Battle, PairResult, Round, Victor};

/// Most dice the offense may throw in one round.
pub const OFFENSE_DICE: u32 = 3;
/// Most dice the defense may throw in one round.
pub const DEFENSE_DICE: u32 = 2;
/// Troops the offense must keep back from every roll.
pub const OFFENSE_RESERVE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// A roll was asked to throw fewer than one die. Always a caller defect.
    #[error("cannot roll {requested} dice with {troops} troops and a reserve of {reserve}")]
    InvalidRollSize {
        requested: u32,
        troops: u32,
        reserve: u32,
    },
}

#[derive(Debug, Clone)]
enum Source {
    Rng(ChaCha8Rng),
    Scripted { values: Vec<u8>, next: usize },
}

#[derive(Debug, Clone)]
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Rng(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Rng(ChaCha8Rng::from_entropy()) }
    }

    /// Replays `values` in order, starting over once they run out.
    pub fn from_scripted(values: Vec<u8>) -> Self {
        Self { source: Source::Scripted { values, next: 0 } }
    }

    pub fn d6(&mut self) -> u8 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(1..=6),
            Source::Scripted { values, next } => {
                let value = values.get(*next % values.len().max(1)).copied().unwrap_or(1);
                *next += 1;
                value
            }
        }
    }
}

/* ---------------- rolls ---------------- */

/// Throw `count` d6 and return them highest first.
pub fn roll_sorted(dice: &mut Dice, count: u32) -> Vec<u8> {
    let mut roll: Vec<u8> = (0..count).map(|_| dice.d6()).collect();
    roll.sort_unstable_by(|a, b| b.cmp(a));
    roll
}

use std::cmp::Ordering;
use std::fmt;

use crate::{roll_sorted, BattleError, Dice};

/// One side of a battle: its troop pool and the dice it threw last.
#[derive(Debug, Clone)]
pub struct Army {
    starting: u32,
    troops: u32,
    roll: Vec<u8>,
}

impl Army {
    pub fn new(troops: u32) -> Self {
        Self {
            starting: troops,
            troops,
            roll: Vec::new(),
        }
    }

    pub fn starting_troops(&self) -> u32 {
        self.starting
    }

    pub fn current_troops(&self) -> u32 {
        self.troops
    }

    /// Dice from the most recent roll, highest first. Empty before the first roll.
    pub fn last_roll(&self) -> &[u8] {
        &self.roll
    }

    /// Throw up to `count` dice, keeping `reserve` troops out of the roll when
    /// the army is too small to throw the full count.
    ///
    /// Fails with [`BattleError::InvalidRollSize`] when that leaves no die to throw;
    /// the previous roll is kept in that case.
    pub fn roll(&mut self, dice: &mut Dice, count: u32, reserve: u32) -> Result<&[u8], BattleError> {
        let actual = if count >= self.troops {
            self.troops.saturating_sub(reserve)
        } else {
            count
        };
        if actual < 1 {
            tracing::warn!(count, reserve, troops = self.troops, "roll with no dice to throw");
            return Err(BattleError::InvalidRollSize {
                requested: count,
                troops: self.troops,
                reserve,
            });
        }
        self.roll = roll_sorted(dice, actual);
        Ok(&self.roll)
    }

    /// Remove `troops` from the army. Saturates at zero.
    pub fn lose(&mut self, troops: u32) -> &mut Self {
        self.troops = self.troops.saturating_sub(troops);
        self
    }

    /// Troops lost since the army was raised.
    pub fn lost(&self) -> u32 {
        self.starting - self.troops
    }

    /// One troop must always stay behind, so attacking takes at least two.
    pub fn can_attack(&self) -> bool {
        self.troops > 1
    }

    pub fn can_defend(&self) -> bool {
        self.troops > 0
    }

    pub fn same_strength(&self, other: &Army) -> bool {
        self.troops == other.troops
    }

    /// Orders two armies by their last rolls, die by die from the highest.
    pub fn compare_rolls(&self, other: &Army) -> Ordering {
        self.roll.cmp(&other.roll)
    }
}

impl fmt::Display for Army {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} troops; {} lost", self.troops, self.lost())
    }
}

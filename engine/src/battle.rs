use std::fmt;

use serde::Serialize;

use crate::{Army, BattleError, Dice, DEFENSE_DICE, OFFENSE_DICE, OFFENSE_RESERVE};

/// Result of one die pair, seen from the offense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairResult {
    Won,
    Lost,
}

impl PairResult {
    /// Defender wins ties.
    pub fn resolve(offense: u8, defense: u8) -> Self {
        if offense > defense {
            PairResult::Won
        } else {
            PairResult::Lost
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PairResult::Won => "Won",
            PairResult::Lost => "Lost",
        }
    }
}

/// Everything one call to [`Battle::attack`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub offense_roll: Vec<u8>,
    pub defense_roll: Vec<u8>,
    pub results: Vec<PairResult>,
}

impl Round {
    /// "Won", "Lost", "Won and Lost", ...
    pub fn describe(&self) -> String {
        self.results
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(" and ")
    }

    pub fn offense_losses(&self) -> u32 {
        self.count(PairResult::Lost)
    }

    pub fn defense_losses(&self) -> u32 {
        self.count(PairResult::Won)
    }

    fn count(&self, wanted: PairResult) -> u32 {
        self.results.iter().filter(|r| **r == wanted).count() as u32
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Victor {
    /// The defense has no troops left.
    Offense,
    /// The offense is down to its last troop.
    Defense,
}

#[derive(Debug, Clone)]
pub struct Battle {
    offense: Army,
    defense: Army,
}

impl Battle {
    pub fn new(offense: Army, defense: Army) -> Self {
        Self { offense, defense }
    }

    pub fn offense(&self) -> &Army {
        &self.offense
    }

    pub fn defense(&self) -> &Army {
        &self.defense
    }

    /// True while another round can be fought. Check before every `attack`.
    pub fn action(&self) -> bool {
        self.offense.can_attack() && self.defense.can_defend()
    }

    pub fn victor(&self) -> Option<Victor> {
        if self.action() {
            None
        } else if !self.defense.can_defend() {
            Some(Victor::Offense)
        } else {
            Some(Victor::Defense)
        }
    }

    /// Roll for both armies and remove the losers' troops.
    ///
    /// The highest dice are compared, then the second highest when both
    /// sides threw at least two. Does not check [`Battle::action`]; on a
    /// resolved battle the roll itself fails.
    pub fn attack(&mut self, dice: &mut Dice) -> Result<Round, BattleError> {
        let offense_roll = self
            .offense
            .roll(dice, OFFENSE_DICE, OFFENSE_RESERVE)?
            .to_vec();
        let defense_roll = self.defense.roll(dice, DEFENSE_DICE, 0)?.to_vec();

        let results: Vec<PairResult> = offense_roll
            .iter()
            .zip(&defense_roll)
            .map(|(o, d)| PairResult::resolve(*o, *d))
            .collect();
        for result in &results {
            match result {
                PairResult::Won => self.defense.lose(1),
                PairResult::Lost => self.offense.lose(1),
            };
        }

        let round = Round {
            offense_roll,
            defense_roll,
            results,
        };
        tracing::debug!(
            offense = ?round.offense_roll,
            defense = ?round.defense_roll,
            outcome = %round,
            "round resolved"
        );
        if let Some(victor) = self.victor() {
            tracing::info!(
                ?victor,
                offense_left = self.offense.current_troops(),
                defense_left = self.defense.current_troops(),
                "battle over"
            );
        }
        Ok(round)
    }

    /// Attack until the battle is resolved and return every round fought.
    pub fn fight(&mut self, dice: &mut Dice) -> Result<Vec<Round>, BattleError> {
        let mut rounds = Vec::new();
        while self.action() {
            rounds.push(self.attack(dice)?);
        }
        Ok(rounds)
    }
}

impl fmt::Display for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offense: {}\nDefense: {}", self.offense, self.defense)
    }
}

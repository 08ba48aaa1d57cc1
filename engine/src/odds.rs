use serde::{Deserialize, Serialize};

use crate::{Army, Battle, BattleError, Dice, Victor};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OddsConfig {
    pub offense: u32,
    pub defense: u32,
    #[serde(default = "default_trials")]
    pub trials: u32,
    #[serde(default)]
    pub seed: u64,
}

fn default_trials() -> u32 {
    1000
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OddsReport {
    pub trials: u32,
    pub offense_wins: u32,
    pub defense_wins: u32,
    pub offense_win_rate: f64,
    pub avg_rounds: f64,
    pub avg_offense_lost: f64,
    pub avg_defense_lost: f64,
}

/// Fight `trials` independent battles to the end; trial `i` uses seed `seed + i`.
pub fn estimate(cfg: &OddsConfig) -> Result<OddsReport, BattleError> {
    let mut report = OddsReport {
        trials: cfg.trials,
        ..OddsReport::default()
    };
    if cfg.trials == 0 {
        return Ok(report);
    }

    let mut rounds = 0u64;
    let mut offense_lost = 0u64;
    let mut defense_lost = 0u64;
    for i in 0..cfg.trials {
        let mut dice = Dice::from_seed(cfg.seed.wrapping_add(u64::from(i)));
        let mut battle = Battle::new(Army::new(cfg.offense), Army::new(cfg.defense));
        rounds += battle.fight(&mut dice)?.len() as u64;
        offense_lost += u64::from(battle.offense().lost());
        defense_lost += u64::from(battle.defense().lost());
        match battle.victor() {
            Some(Victor::Offense) => report.offense_wins += 1,
            Some(Victor::Defense) | None => report.defense_wins += 1,
        }
    }

    let n = f64::from(cfg.trials);
    report.offense_win_rate = f64::from(report.offense_wins) / n;
    report.avg_rounds = rounds as f64 / n;
    report.avg_offense_lost = offense_lost as f64 / n;
    report.avg_defense_lost = defense_lost as f64 / n;
    tracing::debug!(?report, "odds estimated");
    Ok(report)
}

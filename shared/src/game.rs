use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::SpinAction;
use crate::chance_table::ChanceTable;
use crate::constants::*;
use crate::currency::Currency;

/// The two wheel games. Each one fixes a currency, a table and a ceiling.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Mono,
    Lucky2,
}

impl GameKind {
    pub fn currency(&self) -> Currency {
        match self {
            Self::Mono => Currency::Spins,
            Self::Lucky2 => Currency::Stars,
        }
    }

    pub fn maximum_bet(&self) -> u64 {
        match self {
            Self::Mono => MAX_BET_SPINS,
            Self::Lucky2 => MAX_BET_STARS,
        }
    }

    pub fn table(&self) -> ChanceTable {
        match self {
            Self::Mono => ChanceTable::mono(),
            Self::Lucky2 => ChanceTable::lucky2(),
        }
    }

    pub fn action(&self) -> SpinAction {
        match self {
            Self::Mono => SpinAction::MonoSpin,
            Self::Lucky2 => SpinAction::Lucky2Bet,
        }
    }

    pub fn bet_steps(&self) -> &'static [u64] {
        match self {
            Self::Mono => &MONO_BET_STEPS,
            Self::Lucky2 => &LUCKY2_BET_STEPS,
        }
    }

    /// Wheel animation length. Mono adds up to `MONO_SPIN_JITTER_MS` scaled
    /// by `jitter` in `[0,1)`.
    pub fn reveal_duration_ms(&self, jitter: f64) -> u32 {
        match self {
            Self::Mono => {
                MONO_MIN_SPIN_DURATION_MS + (jitter.clamp(0.0, 1.0) * MONO_SPIN_JITTER_MS as f64) as u32
            }
            Self::Lucky2 => LUCKY2_SPIN_DURATION_MS,
        }
    }

    /// Next rung up the bet ladder, or the top rung.
    pub fn step_up(&self, current: u64) -> u64 {
        let steps = self.bet_steps();
        steps
            .iter()
            .copied()
            .find(|&step| step > current)
            .unwrap_or_else(|| steps[steps.len() - 1])
    }

    /// Next rung down the bet ladder, or the bottom rung.
    pub fn step_down(&self, current: u64) -> u64 {
        let steps = self.bet_steps();
        steps
            .iter()
            .rev()
            .copied()
            .find(|&step| step < current)
            .unwrap_or(steps[0])
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mono => "Mono",
            Self::Lucky2 => "Lucky2",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet_ladder_stepping() {
        let game = GameKind::Lucky2;
        assert_eq!(game.step_up(25), 50);
        assert_eq!(game.step_up(60), 100);
        assert_eq!(game.step_up(1000), 1000);
        assert_eq!(game.step_down(25), 25);
        assert_eq!(game.step_down(250), 100);
        assert_eq!(GameKind::Mono.step_up(3), 5);
    }

    #[test]
    fn test_reveal_duration() {
        assert_eq!(GameKind::Lucky2.reveal_duration_ms(0.9), 3000);
        assert_eq!(GameKind::Mono.reveal_duration_ms(0.0), 2000);
        assert_eq!(GameKind::Mono.reveal_duration_ms(0.5), 2500);
    }
}

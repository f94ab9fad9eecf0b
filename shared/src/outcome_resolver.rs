use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::chance_table::{ChanceTable, ChanceTier, Multiplier, TierId, WheelColor, WheelLayout};
use crate::constants::BONUS_ITEM_RATE;
use crate::inventory::{nft_catalog, NftItem, Rarity};

/// Uniform floats in `[0,1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator into a `RandomSource`.
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RngSource<OsRng> {
    pub fn os() -> Self {
        Self(OsRng)
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }

    /// How many draws have been taken so far.
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Maps `u` in `[0,1)` onto `[1,100]` as `ceil(100·u)`. Products that land a
/// hair above an integer (`0.14 * 100`) are pulled back onto it first.
pub fn draw_number(u: f64) -> u8 {
    let scaled = (u * 100.0 - 1e-9).ceil();
    scaled.clamp(1.0, 100.0) as u8
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BonusItem {
    pub id: u32,
    pub name: String,
    pub rarity: Rarity,
}

impl From<&NftItem> for BonusItem {
    fn from(item: &NftItem) -> Self {
        Self { id: item.id, name: item.name.clone(), rarity: item.rarity }
    }
}

/// Result of one resolved spin. `payout` is the gross amount returned on a
/// win (stake included) and zero on a loss.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub won: bool,
    pub drawn_number: u8,
    pub multiplier_applied: Multiplier,
    pub payout: u64,
    pub bonus_item: Option<BonusItem>,
    pub winning_color: Option<WheelColor>,
}

pub struct OutcomeResolver {
    table: ChanceTable,
    bonus_rate: f64,
    catalog: Vec<NftItem>,
}

impl OutcomeResolver {
    pub fn new(table: ChanceTable) -> Self {
        Self { table, bonus_rate: BONUS_ITEM_RATE, catalog: nft_catalog() }
    }

    pub fn with_bonus_rate(mut self, bonus_rate: f64) -> Self {
        self.bonus_rate = bonus_rate;
        self
    }

    pub fn table(&self) -> &ChanceTable {
        &self.table
    }

    /// Draws the spin result for `tier`. On a win a second draw decides the
    /// bonus item, so losses consume exactly one value from `rng`.
    pub fn resolve(&self, tier: &ChanceTier, bet_amount: u64, rng: &mut dyn RandomSource) -> SpinOutcome {
        let u = rng.next_unit();
        let drawn_number = draw_number(u);

        let (won, winning_color) = match self.table.layout() {
            WheelLayout::Percentage => (drawn_number <= tier.win_probability_percent, None),
            WheelLayout::Color => {
                let landed = self.table.sector_for_roll(u * 100.0).map(|sector| sector.id);
                let color = match landed {
                    Some(TierId::Color(color)) => Some(color),
                    _ => None,
                };
                (landed == Some(tier.id), color)
            }
        };

        if !won {
            return SpinOutcome {
                won,
                drawn_number,
                multiplier_applied: Multiplier::ZERO,
                payout: 0,
                bonus_item: None,
                winning_color,
            };
        }

        let bonus_item = if rng.next_unit() < self.bonus_rate {
            self.pick_bonus(rng)
        } else {
            None
        };

        SpinOutcome {
            won,
            drawn_number,
            multiplier_applied: tier.payout_multiplier,
            payout: tier.payout_multiplier.gross(bet_amount),
            bonus_item,
            winning_color,
        }
    }

    /// Rarity by weight, then uniformly among the catalog items of that rarity.
    fn pick_bonus(&self, rng: &mut dyn RandomSource) -> Option<BonusItem> {
        let total: u32 = Rarity::ALL.iter().map(Rarity::weight).sum();
        let roll = rng.next_unit() * total as f64;
        let mut upper = 0.0;
        let mut rarity = Rarity::Common;
        for candidate in Rarity::ALL {
            upper += candidate.weight() as f64;
            if roll < upper {
                rarity = candidate;
                break;
            }
        }

        let pool: Vec<&NftItem> = self.catalog.iter().filter(|item| item.rarity == rarity).collect();
        let pool = if pool.is_empty() { self.catalog.iter().collect() } else { pool };
        if pool.is_empty() {
            return None;
        }
        let index = ((rng.next_unit() * pool.len() as f64) as usize).min(pool.len() - 1);
        Some(BonusItem::from(pool[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono_tier(chance: u8) -> ChanceTier {
        ChanceTable::mono().lookup(TierId::Chance(chance)).unwrap().clone()
    }

    #[test]
    fn test_draw_number_boundaries() {
        assert_eq!(draw_number(0.0), 1);
        assert_eq!(draw_number(0.05), 5);
        assert_eq!(draw_number(0.14), 14);
        assert_eq!(draw_number(0.40), 40);
        assert_eq!(draw_number(0.80), 80);
        assert_eq!(draw_number(0.801), 81);
        assert_eq!(draw_number(0.999_999), 100);
    }

    #[test]
    fn test_win_when_drawn_at_or_below_chance() {
        let resolver = OutcomeResolver::new(ChanceTable::mono()).with_bonus_rate(0.0);
        let tier = mono_tier(10);

        let won = resolver.resolve(&tier, 10, &mut ScriptedSource::new(vec![0.05, 0.9]));
        assert!(won.won);
        assert_eq!(won.drawn_number, 5);
        assert_eq!(won.multiplier_applied, tier.payout_multiplier);
        assert_eq!(won.payout, 100);

        let lost = resolver.resolve(&tier, 10, &mut ScriptedSource::new(vec![0.15]));
        assert!(!lost.won);
        assert_eq!(lost.drawn_number, 15);
        assert_eq!(lost.multiplier_applied, Multiplier::ZERO);
        assert_eq!(lost.payout, 0);
    }

    #[test]
    fn test_bonus_draw_only_on_wins() {
        let resolver = OutcomeResolver::new(ChanceTable::mono()).with_bonus_rate(1.0);
        let tier = mono_tier(10);

        let mut source = ScriptedSource::new(vec![0.5, 0.0, 0.0, 0.0]);
        let lost = resolver.resolve(&tier, 10, &mut source);
        assert!(lost.bonus_item.is_none());
        assert_eq!(source.draws(), 1);

        let mut source = ScriptedSource::new(vec![0.01, 0.0, 0.99, 0.0]);
        let won = resolver.resolve(&tier, 10, &mut source);
        assert_eq!(source.draws(), 4);
        let bonus = won.bonus_item.unwrap();
        assert_eq!(bonus.rarity, Rarity::Legendary);
        assert_eq!(bonus.id, 10);
    }

    #[test]
    fn test_bonus_rate_over_many_wins() {
        let resolver = OutcomeResolver::new(ChanceTable::mono());
        let tier = mono_tier(65);
        let mut source = RngSource::seeded(42);
        let mut wins = 0u32;
        let mut bonuses = 0u32;
        while wins < 100_000 {
            let outcome = resolver.resolve(&tier, 1, &mut source);
            if outcome.won {
                wins += 1;
                if outcome.bonus_item.is_some() {
                    bonuses += 1;
                }
            } else {
                assert!(outcome.bonus_item.is_none());
            }
        }
        let rate = bonuses as f64 / wins as f64;
        assert!((0.003..=0.007).contains(&rate), "bonus rate {}", rate);
    }

    #[test]
    fn test_color_wheel_reports_winning_color() {
        let table = ChanceTable::lucky2();
        let red = table.lookup(TierId::Color(WheelColor::Red)).unwrap().clone();
        let resolver = OutcomeResolver::new(table).with_bonus_rate(0.0);

        let hit = resolver.resolve(&red, 100, &mut ScriptedSource::new(vec![0.62, 0.5]));
        assert!(hit.won);
        assert_eq!(hit.winning_color, Some(WheelColor::Red));
        assert_eq!(hit.payout, 500);

        let miss = resolver.resolve(&red, 100, &mut ScriptedSource::new(vec![0.65]));
        assert!(!miss.won);
        assert_eq!(miss.winning_color, Some(WheelColor::Purple));

        let blue = resolver.resolve(&red, 100, &mut ScriptedSource::new(vec![0.1]));
        assert_eq!(blue.winning_color, Some(WheelColor::Blue));
    }
}

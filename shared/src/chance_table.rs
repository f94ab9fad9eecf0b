use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{LUCKY2_MIN_BET_STARS, MONO_MIN_STARS_PER_CHANCE};
use crate::error::WagerError;

/// Sectors of the Lucky2 wheel, in table order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WheelColor {
    Blue,
    Red,
    Purple,
}

impl WheelColor {
    pub const ALL: [WheelColor; 3] = [WheelColor::Blue, WheelColor::Red, WheelColor::Purple];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Purple => "purple",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Purple => "Purple",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Blue => "🔵",
            Self::Red => "🔴",
            Self::Purple => "🟣",
        }
    }
}

impl fmt::Display for WheelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WheelColor {
    type Err = WagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "red" => Ok(Self::Red),
            "purple" => Ok(Self::Purple),
            _ => Err(WagerError::UnknownTier(s.to_string())),
        }
    }
}

/// Identifies one row of a chance table. On the wire this is the bare chance
/// percent for Mono (`15`) or the color name for Lucky2 (`"red"`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TierId {
    Chance(u8),
    Color(WheelColor),
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chance(percent) => write!(f, "{}%", percent),
            Self::Color(color) => write!(f, "{}", color),
        }
    }
}

/// Payout factor stored in hundredths, so `1.54x` is `Multiplier(154)` and
/// applying it to a bet stays in integer arithmetic.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct Multiplier(u32);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `amount × multiplier`, with any fractional unit dropped.
    pub fn gross(self, amount: u64) -> u64 {
        amount.saturating_mul(self.0 as u64) / 100
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.as_f64())
    }
}

/// One selectable row: odds, payout and the smallest stake accepted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChanceTier {
    pub id: TierId,
    pub win_probability_percent: u8,
    pub payout_multiplier: Multiplier,
    pub minimum_bet_stars: u64,
    pub display_color: String,
    pub label: String,
}

impl ChanceTier {
    pub fn percentage(chance: u8, multiplier_hundredths: u32, minimum_bet_stars: u64, color: &str) -> Self {
        let payout_multiplier = Multiplier::from_hundredths(multiplier_hundredths);
        Self {
            id: TierId::Chance(chance),
            win_probability_percent: chance,
            payout_multiplier,
            minimum_bet_stars,
            display_color: color.to_string(),
            label: format!("{}% - {}", chance, payout_multiplier),
        }
    }

    pub fn color(color: WheelColor, chance: u8, multiplier_hundredths: u32, hex: &str) -> Self {
        let payout_multiplier = Multiplier::from_hundredths(multiplier_hundredths);
        Self {
            id: TierId::Color(color),
            win_probability_percent: chance,
            payout_multiplier,
            minimum_bet_stars: LUCKY2_MIN_BET_STARS,
            display_color: hex.to_string(),
            label: format!("{} {} - {}", color.emoji(), color.display_name(), payout_multiplier),
        }
    }

    /// Degrees of a 360° wheel this tier occupies.
    pub fn sector_degrees(&self) -> f64 {
        self.win_probability_percent as f64 * 3.6
    }
}

/// How a table turns a draw into a result.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WheelLayout {
    /// Win when the drawn number is at most the selected chance.
    Percentage,
    /// The draw lands in one color sector; win when it is the chosen one.
    Color,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChanceTable {
    layout: WheelLayout,
    tiers: Vec<ChanceTier>,
}

impl ChanceTable {
    pub fn new(layout: WheelLayout, tiers: Vec<ChanceTier>) -> Self {
        Self { layout, tiers }
    }

    /// The Mono table. Every chance point costs `MONO_MIN_STARS_PER_CHANCE`
    /// stars of minimum bet, so 1% starts at 4 stars and 65% at 260.
    pub fn mono() -> Self {
        let tier = |chance: u8, multiplier_hundredths: u32, color: &str| {
            ChanceTier::percentage(
                chance,
                multiplier_hundredths,
                chance as u64 * MONO_MIN_STARS_PER_CHANCE,
                color,
            )
        };
        Self::new(
            WheelLayout::Percentage,
            vec![
                tier(1, 10000, "#FF0000"),
                tier(3, 3300, "#FF4500"),
                tier(5, 2000, "#FF8C00"),
                tier(7, 1430, "#FFD700"),
                tier(10, 1000, "#ADFF2F"),
                tier(15, 667, "#32CD32"),
                tier(20, 500, "#00FA9A"),
                tier(25, 400, "#00CED1"),
                tier(30, 333, "#1E90FF"),
                tier(40, 250, "#4169E1"),
                tier(50, 200, "#8A2BE2"),
                tier(65, 154, "#DA70D6"),
            ],
        )
    }

    /// The Lucky2 table: blue `[0,60)`, red `[60,65)`, purple `[65,100)`.
    pub fn lucky2() -> Self {
        Self::new(
            WheelLayout::Color,
            vec![
                ChanceTier::color(WheelColor::Blue, 60, 200, "#1E90FF"),
                ChanceTier::color(WheelColor::Red, 5, 500, "#DC143C"),
                ChanceTier::color(WheelColor::Purple, 35, 200, "#8A2BE2"),
            ],
        )
    }

    pub fn layout(&self) -> WheelLayout {
        self.layout
    }

    pub fn tiers(&self) -> &[ChanceTier] {
        &self.tiers
    }

    pub fn lookup(&self, id: TierId) -> Result<&ChanceTier, WagerError> {
        self.tiers
            .iter()
            .find(|tier| tier.id == id)
            .ok_or_else(|| WagerError::UnknownTier(id.to_string()))
    }

    /// The tier whose chance is closest to `requested_percent`. Ties go to
    /// the first-listed tier, so a slider always snaps the same way.
    pub fn nearest(&self, requested_percent: u8) -> Result<&ChanceTier, WagerError> {
        let mut best: Option<(&ChanceTier, u8)> = None;
        for tier in &self.tiers {
            let distance = tier.win_probability_percent.abs_diff(requested_percent);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((tier, distance)),
            }
        }
        best.map(|(tier, _)| tier)
            .ok_or_else(|| WagerError::UnknownTier(TierId::Chance(requested_percent).to_string()))
    }

    pub fn total_probability(&self) -> u32 {
        self.tiers.iter().map(|tier| tier.win_probability_percent as u32).sum()
    }

    /// Maps a roll in `[0,100)` onto the cumulative sectors in table order.
    /// Rolls past the last boundary fall into the last sector.
    pub fn sector_for_roll(&self, roll: f64) -> Option<&ChanceTier> {
        let mut upper = 0.0;
        for tier in &self.tiers {
            upper += tier.win_probability_percent as f64;
            if roll < upper {
                return Some(tier);
            }
        }
        self.tiers.last()
    }

    /// Start and end angle (degrees) of a sector, for drawing and for
    /// choosing where the pointer stops.
    pub fn sector_bounds(&self, id: TierId) -> Option<(f64, f64)> {
        let mut start = 0.0;
        for tier in &self.tiers {
            let end = start + tier.sector_degrees();
            if tier.id == id {
                return Some((start, end));
            }
            start = end;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_probabilities_sum_to_100() {
        assert_eq!(ChanceTable::lucky2().total_probability(), 100);
    }

    #[test]
    fn test_mono_multiplier_matches_inverse_chance() {
        for tier in ChanceTable::mono().tiers() {
            let product = tier.win_probability_percent as f64 * tier.payout_multiplier.as_f64();
            assert!((product - 100.0).abs() <= 1.5, "{} gives {}", tier.label, product);
            assert!((1..=65).contains(&tier.win_probability_percent));
        }
    }

    #[test]
    fn test_lookup_unknown_tier() {
        let table = ChanceTable::mono();
        assert_eq!(table.lookup(TierId::Chance(15)).unwrap().payout_multiplier.hundredths(), 667);
        assert!(matches!(table.lookup(TierId::Chance(16)), Err(WagerError::UnknownTier(_))));
        assert!(table.lookup(TierId::Color(WheelColor::Red)).is_err());
    }

    #[test]
    fn test_nearest_prefers_first_listed_on_tie() {
        let table = ChanceTable::mono();
        // 2 is one away from both 1 and 3.
        assert_eq!(table.nearest(2).unwrap().win_probability_percent, 1);
        // 45 is five away from both 40 and 50.
        assert_eq!(table.nearest(45).unwrap().win_probability_percent, 40);
        assert_eq!(table.nearest(100).unwrap().win_probability_percent, 65);
        assert_eq!(table.nearest(0).unwrap().win_probability_percent, 1);
    }

    #[test]
    fn test_nearest_is_idempotent() {
        let table = ChanceTable::mono();
        for requested in 0..=100u8 {
            let snapped = table.nearest(requested).unwrap();
            let again = table.nearest(snapped.win_probability_percent).unwrap();
            assert_eq!(snapped, again);
        }
    }

    #[test]
    fn test_nearest_on_empty_table() {
        let table = ChanceTable::new(WheelLayout::Percentage, Vec::new());
        assert!(table.nearest(10).is_err());
    }

    #[test]
    fn test_sector_partition() {
        let table = ChanceTable::lucky2();
        assert_eq!(table.sector_for_roll(0.0).unwrap().id, TierId::Color(WheelColor::Blue));
        assert_eq!(table.sector_for_roll(59.99).unwrap().id, TierId::Color(WheelColor::Blue));
        assert_eq!(table.sector_for_roll(60.0).unwrap().id, TierId::Color(WheelColor::Red));
        assert_eq!(table.sector_for_roll(64.5).unwrap().id, TierId::Color(WheelColor::Red));
        assert_eq!(table.sector_for_roll(65.0).unwrap().id, TierId::Color(WheelColor::Purple));
        assert_eq!(table.sector_for_roll(99.99).unwrap().id, TierId::Color(WheelColor::Purple));
        assert_eq!(table.sector_bounds(TierId::Color(WheelColor::Red)), Some((216.0, 234.0)));
    }

    #[test]
    fn test_multiplier_floors_fractional_payouts() {
        let multiplier = Multiplier::from_hundredths(154);
        assert_eq!(multiplier.gross(1), 1);
        assert_eq!(multiplier.gross(100), 154);
        assert_eq!(multiplier.to_string(), "1.54x");
    }
}

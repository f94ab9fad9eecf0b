use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::chance_table::{TierId, WheelColor};
use crate::currency::{AccountBalance, SpinPack};
use crate::inventory::{BoosterEffect, Inventory};
use crate::outcome_resolver::SpinOutcome;
use crate::payout::Settlement;
use crate::validation::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpinAction {
    MonoSpin,
    Lucky2Bet,
}

/// Sent after every spin, through the platform bridge and to the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct SpinReport {
    pub action: SpinAction,
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    pub tier_selector: TierId,
    #[validate(range(min = 1))]
    pub bet_amount: u64,
    pub won: bool,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_number: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_color: Option<WheelColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_item_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinAck {
    pub success: bool,
    #[serde(default)]
    pub balance: Option<AccountBalance>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BalanceResponse {
    pub success: bool,
    pub balance: AccountBalance,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct MonoSpinRequest {
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    #[validate(range(min = 1, max = 65))]
    pub chance: u8,
    #[validate(range(min = 1))]
    pub bet_amount: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct Lucky2BetRequest {
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    #[validate(custom = "validate_color")]
    pub color: String,
    #[validate(range(min = 1))]
    pub amount: u64,
}

/// Result of a spin the server drew itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerSpinResponse {
    pub success: bool,
    pub outcome: SpinOutcome,
    pub settlement: Settlement,
    pub balance: AccountBalance,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InventoryResponse {
    pub success: bool,
    pub inventory: Inventory,
    pub total_value: u64,
    pub total_items: usize,
    pub level: u8,
}

impl InventoryResponse {
    pub fn from_inventory(inventory: Inventory) -> Self {
        Self {
            success: true,
            total_value: inventory.total_value(),
            total_items: inventory.total_items(),
            level: inventory.level(),
            inventory,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct SellItemRequest {
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    pub item_id: u32,
    #[serde(default = "default_item_type")]
    pub item_type: String,
}

fn default_item_type() -> String {
    "nft".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SellItemResponse {
    pub success: bool,
    pub credited: u64,
    pub balance: AccountBalance,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct UseBoosterRequest {
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    pub booster_id: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UseBoosterResponse {
    pub success: bool,
    pub effect: BoosterEffect,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct BuySpinsRequest {
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    #[validate(range(min = 1))]
    pub spins: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BuySpinsResponse {
    pub success: bool,
    pub pack: SpinPack,
    pub balance: AccountBalance,
}

/// Running totals for one game. Amounts are in that game's currency.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub total_games: u64,
    pub wins: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    pub max_win: u64,
    pub bonus_items: u64,
}

impl GameStats {
    pub fn record(&mut self, bet_amount: u64, won: bool, net_payout: u64, bonus: bool) {
        self.total_games += 1;
        self.total_wagered = self.total_wagered.saturating_add(bet_amount);
        if won {
            self.wins += 1;
            self.total_won = self.total_won.saturating_add(net_payout);
            self.max_win = self.max_win.max(net_payout);
        }
        if bonus {
            self.bonus_items += 1;
        }
    }

    pub fn losses(&self) -> u64 {
        self.total_games - self.wins
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total_games as f64 * 100.0
    }

    pub fn net_profit(&self) -> i64 {
        self.total_won as i64 - self.total_wagered as i64
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatsResponse {
    pub success: bool,
    pub mono: GameStats,
    pub lucky2: GameStats,
}

/// Body of every failed API call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_wire_format() {
        let report = SpinReport {
            action: SpinAction::Lucky2Bet,
            user_id: "42".to_string(),
            tier_selector: TierId::Color(WheelColor::Red),
            bet_amount: 100,
            won: true,
            timestamp: 1_700_000_000_000,
            drawn_number: None,
            winning_color: Some(WheelColor::Red),
            bonus_item_id: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["action"], "lucky2_bet");
        assert_eq!(json["tier_selector"], "red");
        assert_eq!(json["winning_color"], "red");
        assert!(json.get("drawn_number").is_none());

        let mono: SpinReport = serde_json::from_str(
            r#"{"action":"mono_spin","user_id":"demo","tier_selector":15,"bet_amount":2,"won":false,"timestamp":1}"#,
        )
        .unwrap();
        assert_eq!(mono.tier_selector, TierId::Chance(15));
        assert!(mono.validate().is_ok());
    }

    #[test]
    fn test_request_validation() {
        let bad = Lucky2BetRequest { user_id: "demo".to_string(), color: "green".to_string(), amount: 25 };
        assert!(bad.validate().is_err());
        let bad = MonoSpinRequest { user_id: "demo".to_string(), chance: 70, bet_amount: 1 };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_stats_record() {
        let mut stats = GameStats::default();
        stats.record(10, true, 25, false);
        stats.record(10, false, 0, false);
        assert_eq!(stats.losses(), 1);
        assert_eq!(stats.max_win, 25);
        assert_eq!(stats.net_profit(), 5);
        assert!((stats.win_rate() - 50.0).abs() < 1e-9);
    }
}

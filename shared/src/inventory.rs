use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::SELL_PRICE_PERCENT;
use crate::currency::AccountBalance;
use crate::error::InventoryError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Relative odds when a bonus item's rarity is drawn.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Common => 50,
            Self::Rare => 30,
            Self::Epic => 15,
            Self::Legendary => 5,
        }
    }

    /// Sort position, rarest first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Legendary => 0,
            Self::Epic => 1,
            Self::Rare => 2,
            Self::Common => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Legendary => "👑",
            Self::Epic => "💎",
            Self::Rare => "🥇",
            Self::Common => "🔹",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Legendary => "#FFD700",
            Self::Epic => "#8A2BE2",
            Self::Rare => "#1E90FF",
            Self::Common => "#9E9E9E",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gift item. `id` is the catalog id, so duplicates share it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NftItem {
    pub id: u32,
    pub name: String,
    pub rarity: Rarity,
    pub value: u64,
    pub emoji: String,
    pub color: String,
    pub feature: String,
}

impl NftItem {
    fn catalog_entry(id: u32, name: &str, rarity: Rarity, value: u64, color: &str, emoji: &str, feature: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            rarity,
            value,
            emoji: emoji.to_string(),
            color: color.to_string(),
            feature: feature.to_string(),
        }
    }
}

/// Every item a bonus draw can hand out.
pub fn nft_catalog() -> Vec<NftItem> {
    use Rarity::*;
    vec![
        NftItem::catalog_entry(1, "Bronze Token", Common, 10, "#CD7F32", "🥉", "Basic reward"),
        NftItem::catalog_entry(2, "Silver Coin", Common, 25, "#C0C0C0", "🪙", "+5% luck"),
        NftItem::catalog_entry(3, "Gold Bar", Common, 50, "#FFD700", "🪙", "+10% winnings"),
        NftItem::catalog_entry(4, "Ruby of Fortune", Rare, 100, "#DC143C", "🔴", "Double chance in Mono"),
        NftItem::catalog_entry(5, "Sapphire of Luck", Rare, 150, "#1E90FF", "🔵", "+1 spin in Roulette"),
        NftItem::catalog_entry(6, "Emerald of Wealth", Rare, 200, "#00FF7F", "💚", "50 stars bonus"),
        NftItem::catalog_entry(7, "Platinum Key", Epic, 500, "#E5E4E2", "🔑", "Opens a prize chest"),
        NftItem::catalog_entry(8, "Diamond Card", Epic, 750, "#B9F2FF", "💎", "7 days of VIP access"),
        NftItem::catalog_entry(9, "Mythic Artifact", Epic, 1000, "#8A2BE2", "🔮", "All multipliers +0.5x"),
        NftItem::catalog_entry(10, "Casino Crown", Legendary, 5000, "#FFD700", "👑", "Lifetime VIP status"),
        NftItem::catalog_entry(11, "Cup of Plenty", Legendary, 10000, "#FF4500", "🏆", "Daily 100 stars bonus"),
        NftItem::catalog_entry(12, "Scroll of Luck", Legendary, 25000, "#32CD32", "📜", "Guaranteed jackpot"),
    ]
}

pub fn catalog_item(id: u32) -> Option<NftItem> {
    nft_catalog().into_iter().find(|item| item.id == id)
}

/// Stars credited when an item is sold back.
pub fn sell_price(value: u64) -> u64 {
    value.saturating_mul(SELL_PRICE_PERCENT) / 100
}

pub fn can_sell(item: &NftItem) -> bool {
    item.value > 0 && item.rarity != Rarity::Legendary
}

pub fn can_trade(item: &NftItem) -> bool {
    item.rarity != Rarity::Common
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BoosterKind {
    LuckBoost,
    WinBoost,
    SpinBoost,
}

impl BoosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LuckBoost => "luck_boost",
            Self::WinBoost => "win_boost",
            Self::SpinBoost => "spin_boost",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LuckBoost => "Luck Boost",
            Self::WinBoost => "Win Boost",
            Self::SpinBoost => "Free Spins",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::LuckBoost => "🍀",
            Self::WinBoost => "💰",
            Self::SpinBoost => "🎰",
        }
    }

    pub fn effect(&self, value: u32) -> BoosterEffect {
        match self {
            Self::LuckBoost => BoosterEffect {
                description: format!("Luck +{}%", value),
                duration_secs: 3600,
            },
            Self::WinBoost => BoosterEffect {
                description: format!("Win +{}%", value),
                duration_secs: 1800,
            },
            Self::SpinBoost => BoosterEffect {
                description: format!("Free spins: {}", value),
                duration_secs: 0,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BoosterEffect {
    pub description: String,
    pub duration_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Booster {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: BoosterKind,
    pub name: String,
    pub value: u32,
    pub emoji: String,
    pub expires: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Booster {
    pub fn new(id: u32, kind: BoosterKind, value: u32, expires: Option<&str>) -> Self {
        Self {
            id,
            kind,
            name: kind.display_name().to_string(),
            value,
            emoji: kind.emoji().to_string(),
            expires: expires.map(str::to_string),
            active: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Collectible {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub emoji: String,
    pub rarity: Rarity,
}

/// One player's holdings. `currency` is the account balance itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    pub nfts: Vec<NftItem>,
    pub boosters: Vec<Booster>,
    pub collectibles: Vec<Collectible>,
    pub currency: AccountBalance,
}

impl Inventory {
    pub fn new(currency: AccountBalance) -> Self {
        Self { currency, ..Default::default() }
    }

    /// Sample holdings shown to the `demo` user.
    pub fn demo() -> Self {
        let catalog = nft_catalog();
        let nfts = [1, 2, 3, 4, 5, 10]
            .iter()
            .filter_map(|id| catalog.iter().find(|item| item.id == *id).cloned())
            .collect();
        Self {
            nfts,
            boosters: vec![
                Booster::new(1, BoosterKind::LuckBoost, 10, Some("2024-12-31")),
                Booster::new(2, BoosterKind::WinBoost, 15, Some("2024-12-31")),
            ],
            collectibles: vec![Collectible {
                id: 1,
                name: "Rookie Trophy".to_string(),
                kind: "trophy".to_string(),
                emoji: "🏆".to_string(),
                rarity: Rarity::Common,
            }],
            currency: AccountBalance::new(1250, 15),
        }
    }

    /// Item values plus loose stars. Spins are not counted.
    pub fn total_value(&self) -> u64 {
        self.nfts
            .iter()
            .fold(self.currency.stars, |total, item| total.saturating_add(item.value))
    }

    pub fn total_items(&self) -> usize {
        self.nfts.len() + self.boosters.len() + self.collectibles.len()
    }

    /// NFT counts in `Rarity::ALL` order.
    pub fn rarity_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for item in &self.nfts {
            if let Some(slot) = Rarity::ALL.iter().position(|rarity| *rarity == item.rarity) {
                counts[slot] += 1;
            }
        }
        counts
    }

    pub fn level(&self) -> u8 {
        inventory_level(self.nfts.len(), self.total_value())
    }

    pub fn add_nft(&mut self, item: NftItem) {
        self.nfts.push(item);
    }

    /// Removes one copy of the item and credits its sell price in stars.
    pub fn sell_nft(&mut self, item_id: u32) -> Result<u64, InventoryError> {
        let position = self
            .nfts
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))?;
        if !can_sell(&self.nfts[position]) {
            return Err(InventoryError::NotSellable(self.nfts[position].name.clone()));
        }
        let item = self.nfts.remove(position);
        let credited = sell_price(item.value);
        self.currency.stars = self.currency.stars.saturating_add(credited);
        Ok(credited)
    }

    pub fn activate_booster(&mut self, booster_id: u32) -> Result<BoosterEffect, InventoryError> {
        let booster = self
            .boosters
            .iter_mut()
            .find(|booster| booster.id == booster_id)
            .ok_or(InventoryError::BoosterNotFound(booster_id))?;
        if booster.active {
            return Err(InventoryError::BoosterAlreadyActive(booster.name.clone()));
        }
        booster.active = true;
        Ok(booster.kind.effect(booster.value))
    }

    /// Items in one category, as display entries.
    pub fn entries(&self, category: Category) -> Vec<InventoryEntry> {
        let nfts = self.nfts.iter().cloned().map(InventoryEntry::Nft);
        let boosters = self.boosters.iter().cloned().map(InventoryEntry::Booster);
        let collectibles = self.collectibles.iter().cloned().map(InventoryEntry::Collectible);
        match category {
            Category::All => nfts.chain(boosters).chain(collectibles).collect(),
            Category::Nfts => nfts.collect(),
            Category::Boosters => boosters.collect(),
            Category::Collectibles => collectibles.collect(),
            Category::Currency => Vec::new(),
        }
    }

    /// Case-insensitive match on NFT name, feature and rarity, and on booster
    /// name and type. Collectibles are not searched.
    pub fn search(&self, category: Category, query: &str) -> Vec<InventoryEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries(category);
        }
        self.entries(category)
            .into_iter()
            .filter(|entry| match entry {
                InventoryEntry::Nft(item) => {
                    item.name.to_lowercase().contains(&needle)
                        || item.feature.to_lowercase().contains(&needle)
                        || item.rarity.as_str().contains(&needle)
                }
                InventoryEntry::Booster(booster) => {
                    booster.name.to_lowercase().contains(&needle)
                        || booster.kind.as_str().contains(&needle)
                }
                InventoryEntry::Collectible(_) => false,
            })
            .collect()
    }
}

pub fn inventory_level(nft_count: usize, total_value: u64) -> u8 {
    match (nft_count, total_value) {
        (n, v) if n >= 50 && v >= 50_000 => 5,
        (n, v) if n >= 25 && v >= 25_000 => 4,
        (n, v) if n >= 10 && v >= 10_000 => 3,
        (n, v) if n >= 5 && v >= 5_000 => 2,
        (n, _) if n >= 1 => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Nfts,
    Boosters,
    Currency,
    Collectibles,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Nfts => "NFT",
            Self::Boosters => "Boosters",
            Self::Currency => "Currency",
            Self::Collectibles => "Collections",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::All => "📦",
            Self::Nfts => "🎁",
            Self::Boosters => "⚡",
            Self::Currency => "💰",
            Self::Collectibles => "🏆",
        }
    }

    pub fn all_options() -> Vec<Self> {
        vec![Self::All, Self::Nfts, Self::Boosters, Self::Currency, Self::Collectibles]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEntry {
    Nft(NftItem),
    Booster(Booster),
    Collectible(Collectible),
}

impl InventoryEntry {
    pub fn id(&self) -> u32 {
        match self {
            Self::Nft(item) => item.id,
            Self::Booster(booster) => booster.id,
            Self::Collectible(collectible) => collectible.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Nft(item) => &item.name,
            Self::Booster(booster) => &booster.name,
            Self::Collectible(collectible) => &collectible.name,
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Self::Nft(item) => &item.emoji,
            Self::Booster(booster) => &booster.emoji,
            Self::Collectible(collectible) => &collectible.emoji,
        }
    }

    pub fn rarity(&self) -> Option<Rarity> {
        match self {
            Self::Nft(item) => Some(item.rarity),
            Self::Booster(_) => None,
            Self::Collectible(collectible) => Some(collectible.rarity),
        }
    }

    /// Star value; only NFTs carry one.
    pub fn value(&self) -> u64 {
        match self {
            Self::Nft(item) => item.value,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rarity,
    Value,
    Name,
    Newest,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rarity => "Rarity",
            Self::Value => "Value",
            Self::Name => "Name",
            Self::Newest => "Newest",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Self::Rarity => "rarity",
            Self::Value => "value",
            Self::Name => "name",
            Self::Newest => "newest",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "value" => Self::Value,
            "name" => Self::Name,
            "newest" => Self::Newest,
            _ => Self::Rarity,
        }
    }

    pub fn all_options() -> Vec<Self> {
        vec![Self::Rarity, Self::Value, Self::Name, Self::Newest]
    }
}

fn rarity_rank(entry: &InventoryEntry) -> u8 {
    entry.rarity().map(|rarity| rarity.rank()).unwrap_or(4)
}

/// Stable sort: rarest first, most valuable first, by name, or highest id first.
pub fn sort_entries(entries: &mut [InventoryEntry], key: SortKey) {
    entries.sort_by(|a, b| match key {
        SortKey::Rarity => rarity_rank(a).cmp(&rarity_rank(b)),
        SortKey::Value => b.value().cmp(&a.value()),
        SortKey::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortKey::Newest => b.id().cmp(&a.id()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = nft_catalog();
        assert_eq!(catalog.len(), 12);
        for rarity in Rarity::ALL {
            assert_eq!(catalog.iter().filter(|item| item.rarity == rarity).count(), 3);
        }
        assert_eq!(Rarity::ALL.iter().map(Rarity::weight).sum::<u32>(), 100);
    }

    #[test]
    fn test_demo_total_value() {
        let inventory = Inventory::demo();
        // 10 + 25 + 50 + 100 + 150 + 5000 in items, 1250 stars.
        assert_eq!(inventory.total_value(), 6585);
        assert_eq!(inventory.total_items(), 9);
        assert_eq!(inventory.rarity_counts(), [3, 2, 0, 1]);
        assert_eq!(inventory.level(), 2);
    }

    #[test]
    fn test_sell_credits_seventy_percent_floored() {
        let mut inventory = Inventory::new(AccountBalance::new(0, 0));
        inventory.add_nft(catalog_item(2).unwrap());
        assert_eq!(inventory.sell_nft(2), Ok(17));
        assert_eq!(inventory.currency.stars, 17);
        assert!(inventory.nfts.is_empty());
        assert_eq!(inventory.sell_nft(2), Err(InventoryError::ItemNotFound(2)));
    }

    #[test]
    fn test_legendary_cannot_be_sold() {
        let mut inventory = Inventory::demo();
        let before = inventory.clone();
        assert!(matches!(inventory.sell_nft(10), Err(InventoryError::NotSellable(_))));
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_trade_rules() {
        assert!(!can_trade(&catalog_item(1).unwrap()));
        assert!(can_trade(&catalog_item(4).unwrap()));
        assert!(can_trade(&catalog_item(12).unwrap()));
    }

    #[test]
    fn test_booster_activates_once() {
        let mut inventory = Inventory::demo();
        let effect = inventory.activate_booster(1).unwrap();
        assert_eq!(effect.description, "Luck +10%");
        assert_eq!(effect.duration_secs, 3600);
        assert!(matches!(inventory.activate_booster(1), Err(InventoryError::BoosterAlreadyActive(_))));
        assert_eq!(inventory.activate_booster(9), Err(InventoryError::BoosterNotFound(9)));
    }

    #[test]
    fn test_sort_by_rarity_puts_legendary_first() {
        let inventory = Inventory::demo();
        let mut entries = inventory.entries(Category::All);
        sort_entries(&mut entries, SortKey::Rarity);
        assert_eq!(entries[0].name(), "Casino Crown");
        // Boosters have no rarity and sink to the bottom.
        assert!(matches!(entries.last(), Some(InventoryEntry::Booster(_))));
    }

    #[test]
    fn test_sort_by_value_and_newest() {
        let inventory = Inventory::demo();
        let mut entries = inventory.entries(Category::Nfts);
        sort_entries(&mut entries, SortKey::Value);
        assert_eq!(entries.iter().map(InventoryEntry::value).collect::<Vec<_>>(), vec![5000, 150, 100, 50, 25, 10]);
        sort_entries(&mut entries, SortKey::Newest);
        assert_eq!(entries[0].id(), 10);
    }

    #[test]
    fn test_search_matches_feature_and_booster_type() {
        let inventory = Inventory::demo();
        let found = inventory.search(Category::All, "LUCK");
        let names: Vec<&str> = found.iter().map(InventoryEntry::name).collect();
        assert!(names.contains(&"Silver Coin"));
        assert!(names.contains(&"Luck Boost"));
        assert!(inventory.search(Category::Boosters, "legendary").is_empty());
        assert_eq!(inventory.search(Category::Nfts, "  ").len(), 6);
    }

    #[test]
    fn test_inventory_levels() {
        assert_eq!(inventory_level(0, 100_000), 0);
        assert_eq!(inventory_level(1, 0), 1);
        assert_eq!(inventory_level(10, 9_999), 2);
        assert_eq!(inventory_level(50, 50_000), 5);
    }
}

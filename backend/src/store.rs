use std::collections::HashMap;
use std::sync::Arc;

use shared::api::GameStats;
use shared::inventory::Inventory;
use shared::{AccountBalance, GameKind};
use tokio::sync::RwLock;

/// Everything the server keeps for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub inventory: Inventory,
    pub mono: GameStats,
    pub lucky2: GameStats,
}

impl Account {
    /// New players start with the demo balance and nothing else.
    pub fn new() -> Self {
        Self {
            inventory: Inventory::new(AccountBalance::demo()),
            mono: GameStats::default(),
            lucky2: GameStats::default(),
        }
    }

    pub fn balance(&self) -> AccountBalance {
        self.inventory.currency
    }

    pub fn stats_mut(&mut self, game: GameKind) -> &mut GameStats {
        match game {
            GameKind::Mono => &mut self.mono,
            GameKind::Lucky2 => &mut self.lucky2,
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory accounts keyed by user id. Writers hold the lock for a whole
/// spin, so two spins for the same player never interleave.
#[derive(Clone, Default)]
pub struct AccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the account, or a fresh one if the player is unknown. Reading
    /// does not create the account.
    pub async fn snapshot(&self, user_id: &str) -> Account {
        self.accounts
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Runs `f` against the account under the write lock, creating the
    /// account on first touch.
    pub async fn update<R>(&self, user_id: &str, f: impl FnOnce(&mut Account) -> R) -> R {
        let mut accounts = self.accounts.write().await;
        let account = accounts.entry(user_id.to_string()).or_default();
        f(account)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_gets_demo_balance() {
        let store = AccountStore::new();
        assert_eq!(store.snapshot("123").await.balance(), AccountBalance::new(1000, 10));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_creates_and_persists() {
        let store = AccountStore::new();
        store
            .update("123", |account| account.inventory.currency.stars -= 100)
            .await;
        assert_eq!(store.snapshot("123").await.balance().stars, 900);
        assert_eq!(store.len().await, 1);
    }
}

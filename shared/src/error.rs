use thiserror::Error;

use crate::currency::Currency;

/// Everything a spin can fail with. The `Display` text is what the player
/// sees in the notification banner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WagerError {
    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("Not enough {currency}: need {required}, have {available}")]
    InsufficientBalance {
        currency: Currency,
        required: u64,
        available: u64,
    },

    #[error("Minimum bet is {minimum} {currency}")]
    BelowMinimumBet { currency: Currency, minimum: u64 },

    #[error("Maximum bet is {maximum} {currency}")]
    AboveMaximumBet { currency: Currency, maximum: u64 },

    #[error("No pack of {0} spins for sale")]
    UnknownSpinPack(u64),

    #[error("A spin is already in progress")]
    SpinInProgress,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl WagerError {
    /// Validation failures are recovered by the player changing the bet.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownTier(_)
                | Self::InsufficientBalance { .. }
                | Self::BelowMinimumBet { .. }
                | Self::AboveMaximumBet { .. }
                | Self::UnknownSpinPack(_)
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Platform bridge not available")]
    Unavailable,

    #[error("Platform rejected payload: {0}")]
    Rejected(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Item {0} not found")]
    ItemNotFound(u32),

    #[error("{0} cannot be sold")]
    NotSellable(String),

    #[error("Booster {0} not found")]
    BoosterNotFound(u32),

    #[error("Booster {0} is already active")]
    BoosterAlreadyActive(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_player_facing() {
        let err = WagerError::BelowMinimumBet { currency: Currency::Spins, minimum: 2 };
        assert_eq!(err.to_string(), "Minimum bet is 2 spins");
        assert!(err.is_validation());
        assert!(!WagerError::SpinInProgress.is_validation());
    }
}

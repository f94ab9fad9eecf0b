pub mod api;
pub mod bet_validator;
pub mod chance_table;
pub mod constants;
pub mod currency;
pub mod error;
pub mod game;
pub mod inventory;
pub mod outcome_resolver;
pub mod payout;
pub mod validation;
pub mod wager_session;

pub use bet_validator::BetValidator;
pub use chance_table::{ChanceTable, ChanceTier, Multiplier, TierId, WheelColor, WheelLayout};
pub use currency::{AccountBalance, Currency, ExchangeRate, SpinPack};
pub use error::{InventoryError, PlatformError, WagerError};
pub use game::GameKind;
pub use outcome_resolver::{OutcomeResolver, RandomSource, RngSource, SpinOutcome};
pub use payout::{PayoutCalculator, Settlement};
pub use wager_session::{BackendClient, BetSelection, PlatformBridge, ReportStatus, SpinResult, SpinState, WagerSession};

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

use crate::api::{
    InventoryResponse, SellItemRequest, SellItemResponse, SpinAck, SpinReport, UseBoosterRequest,
    UseBoosterResponse,
};
use crate::bet_validator::BetValidator;
use crate::chance_table::{ChanceTable, ChanceTier, TierId};
use crate::constants::DEMO_USER_ID;
use crate::currency::AccountBalance;
use crate::error::{PlatformError, WagerError};
use crate::game::GameKind;
use crate::outcome_resolver::{OutcomeResolver, RandomSource, SpinOutcome};
use crate::payout::{PayoutCalculator, Settlement};

/// The HTTP side of the casino, as seen from a session.
#[allow(async_fn_in_trait)]
pub trait BackendClient {
    async fn report_spin(&self, report: &SpinReport) -> Result<SpinAck, WagerError>;
    async fn fetch_balance(&self, user_id: &str) -> Result<AccountBalance, WagerError>;
    async fn fetch_inventory(&self, user_id: &str) -> Result<InventoryResponse, WagerError>;
    async fn sell_item(&self, request: &SellItemRequest) -> Result<SellItemResponse, WagerError>;
    async fn use_booster(&self, request: &UseBoosterRequest) -> Result<UseBoosterResponse, WagerError>;
}

/// One-way channel to the hosting app (the Telegram WebApp).
pub trait PlatformBridge {
    fn send(&self, payload: &str) -> Result<(), PlatformError>;
}

/// Backend used when nothing is reachable. Every call fails softly.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

impl BackendClient for OfflineBackend {
    async fn report_spin(&self, _report: &SpinReport) -> Result<SpinAck, WagerError> {
        Err(WagerError::BackendUnavailable("offline".to_string()))
    }

    async fn fetch_balance(&self, _user_id: &str) -> Result<AccountBalance, WagerError> {
        Err(WagerError::BackendUnavailable("offline".to_string()))
    }

    async fn fetch_inventory(&self, _user_id: &str) -> Result<InventoryResponse, WagerError> {
        Err(WagerError::BackendUnavailable("offline".to_string()))
    }

    async fn sell_item(&self, _request: &SellItemRequest) -> Result<SellItemResponse, WagerError> {
        Err(WagerError::BackendUnavailable("offline".to_string()))
    }

    async fn use_booster(&self, _request: &UseBoosterRequest) -> Result<UseBoosterResponse, WagerError> {
        Err(WagerError::BackendUnavailable("offline".to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlatform;

impl PlatformBridge for NoPlatform {
    fn send(&self, _payload: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Validating,
    Resolving,
    SettlingPayout,
    Reporting,
}

/// Holds the session's in-flight flag. Dropping it puts the session back to
/// `Idle`, whichever way the spin ended.
pub struct SpinGuard<'a> {
    state: &'a Cell<SpinState>,
}

impl<'a> SpinGuard<'a> {
    pub fn acquire(state: &'a Cell<SpinState>) -> Result<Self, WagerError> {
        if state.get() != SpinState::Idle {
            return Err(WagerError::SpinInProgress);
        }
        state.set(SpinState::Validating);
        Ok(Self { state })
    }

    pub fn advance(&self, next: SpinState) {
        log::debug!("spin state {:?} -> {:?}", self.state.get(), next);
        self.state.set(next);
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.state.set(SpinState::Idle);
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BetSelection {
    pub tier: TierId,
    pub bet_amount: u64,
}

impl BetSelection {
    pub fn new(tier: TierId, bet_amount: u64) -> Self {
        Self { tier, bet_amount }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// Not sent yet.
    Skipped,
    /// The `demo` user's spins stay on the device.
    Demo,
    Acknowledged,
    Failed(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpinResult {
    pub game: GameKind,
    pub selection: BetSelection,
    pub outcome: SpinOutcome,
    pub settlement: Settlement,
    /// Balance after the spin, including any backend correction.
    pub balance: AccountBalance,
    pub report: ReportStatus,
}

/// Milliseconds since the epoch, for report timestamps. The host supplies
/// it since `std::time` is not available in the browser.
type Clock = Box<dyn Fn() -> u64>;

/// Runs spins for one player in one game: validate, resolve, settle, then
/// report. At most one spin is in flight.
pub struct WagerSession<B, P> {
    game: GameKind,
    user_id: String,
    validator: BetValidator,
    resolver: OutcomeResolver,
    payout: PayoutCalculator,
    rng: RefCell<Box<dyn RandomSource>>,
    backend: B,
    platform: P,
    balance: Cell<AccountBalance>,
    state: Cell<SpinState>,
    clock: Clock,
}

impl<B: BackendClient, P: PlatformBridge> WagerSession<B, P> {
    pub fn new(
        game: GameKind,
        rng: Box<dyn RandomSource>,
        backend: B,
        platform: P,
        clock: impl Fn() -> u64 + 'static,
        user_id: impl Into<String>,
        balance: AccountBalance,
    ) -> Self {
        Self {
            game,
            user_id: user_id.into(),
            validator: BetValidator::for_game(game),
            resolver: OutcomeResolver::new(game.table()),
            payout: PayoutCalculator::default(),
            rng: RefCell::new(rng),
            backend,
            platform,
            balance: Cell::new(balance),
            state: Cell::new(SpinState::Idle),
            clock: Box::new(clock),
        }
    }

    pub fn with_bonus_rate(mut self, bonus_rate: f64) -> Self {
        self.resolver = self.resolver.with_bonus_rate(bonus_rate);
        self
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_demo(&self) -> bool {
        self.user_id == DEMO_USER_ID
    }

    pub fn table(&self) -> &ChanceTable {
        self.resolver.table()
    }

    pub fn balance(&self) -> AccountBalance {
        self.balance.get()
    }

    /// Replaces the local balance after a change made outside a spin, such
    /// as a purchase.
    pub fn set_balance(&self, balance: AccountBalance) {
        self.balance.set(balance);
    }

    pub fn state(&self) -> SpinState {
        self.state.get()
    }

    pub fn is_spinning(&self) -> bool {
        self.state.get() != SpinState::Idle
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn minimum_bet(&self, tier: &ChanceTier) -> u64 {
        self.validator.minimum_bet(tier)
    }

    /// Mean net result of `bet_amount` on `tier` under this session's payout.
    pub fn expected_value(&self, tier: &ChanceTier, bet_amount: u64) -> f64 {
        self.payout.expected_value(tier, bet_amount)
    }

    /// Snaps a slider position to the closest tier.
    pub fn snap_chance(&self, requested_percent: u8) -> Result<ChanceTier, WagerError> {
        self.table().nearest(requested_percent).cloned()
    }

    /// Validates, resolves and settles without reporting. The balance is
    /// final when this returns.
    pub fn compute_outcome(&self, selection: BetSelection) -> Result<SpinResult, WagerError> {
        let guard = SpinGuard::acquire(&self.state)?;
        self.run_spin(&guard, selection)
    }

    /// Runs a full spin, then reports it. A failed report is recorded on the
    /// result and never rolls the spin back.
    pub async fn place_bet(&self, selection: BetSelection) -> Result<SpinResult, WagerError> {
        let guard = SpinGuard::acquire(&self.state)?;
        let mut result = self.run_spin(&guard, selection)?;

        guard.advance(SpinState::Reporting);
        result.report = self.report(&result).await;
        result.balance = self.balance.get();
        Ok(result)
    }

    /// Pulls the server balance. On failure the local balance is kept.
    pub async fn refresh_balance(&self) -> Result<AccountBalance, WagerError> {
        match self.backend.fetch_balance(&self.user_id).await {
            Ok(balance) => {
                self.balance.set(balance);
                Ok(balance)
            }
            Err(err) => {
                log::warn!("balance refresh failed for {}: {}", self.user_id, err);
                Err(match err {
                    WagerError::BackendUnavailable(_) => err,
                    other => WagerError::BackendUnavailable(other.to_string()),
                })
            }
        }
    }

    fn run_spin(&self, guard: &SpinGuard<'_>, selection: BetSelection) -> Result<SpinResult, WagerError> {
        let tier = self.table().lookup(selection.tier)?;
        let balance = self.balance.get();
        self.validator.validate(tier, selection.bet_amount, &balance)?;

        guard.advance(SpinState::Resolving);
        let outcome = {
            let mut rng = self.rng.borrow_mut();
            self.resolver.resolve(tier, selection.bet_amount, rng.as_mut())
        };

        guard.advance(SpinState::SettlingPayout);
        let currency = self.validator.currency;
        let settlement = self
            .payout
            .settle(&outcome, selection.bet_amount, balance.available(currency));
        let balance = balance.with_amount(currency, settlement.balance);
        self.balance.set(balance);

        log::debug!(
            "{} {} bet {} on {}: drawn {}, delta {}",
            self.game,
            if outcome.won { "won" } else { "lost" },
            selection.bet_amount,
            selection.tier,
            outcome.drawn_number,
            settlement.delta
        );

        Ok(SpinResult {
            game: self.game,
            selection,
            outcome,
            settlement,
            balance,
            report: ReportStatus::Skipped,
        })
    }

    fn build_report(&self, result: &SpinResult) -> SpinReport {
        SpinReport {
            action: self.game.action(),
            user_id: self.user_id.clone(),
            tier_selector: result.selection.tier,
            bet_amount: result.selection.bet_amount,
            won: result.outcome.won,
            timestamp: (self.clock)(),
            drawn_number: Some(result.outcome.drawn_number),
            winning_color: result.outcome.winning_color,
            bonus_item_id: result.outcome.bonus_item.as_ref().map(|item| item.id),
        }
    }

    async fn report(&self, result: &SpinResult) -> ReportStatus {
        let report = self.build_report(result);

        match serde_json::to_string(&report) {
            Ok(payload) => {
                if let Err(err) = self.platform.send(&payload) {
                    log::debug!("platform bridge skipped: {}", err);
                }
            }
            Err(err) => log::warn!("could not encode spin report: {}", err),
        }

        if self.is_demo() {
            return ReportStatus::Demo;
        }

        match self.backend.report_spin(&report).await {
            Ok(ack) if ack.success => {
                if let Some(balance) = ack.balance {
                    self.balance.set(balance);
                }
                ReportStatus::Acknowledged
            }
            Ok(ack) => {
                let reason = ack.error.unwrap_or_else(|| "rejected".to_string());
                log::warn!("spin report rejected for {}: {}", self.user_id, reason);
                ReportStatus::Failed(reason)
            }
            Err(err) => {
                log::warn!("spin report failed for {}: {}", self.user_id, err);
                ReportStatus::Failed(err.to_string())
            }
        }
    }
}

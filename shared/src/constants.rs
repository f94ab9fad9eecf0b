pub const HEALTH_ENDPOINT: &str = "/health";
pub const BALANCE_ENDPOINT: &str = "/user/balance";
pub const STATS_ENDPOINT: &str = "/user/stats";
pub const SPIN_REPORT_ENDPOINT: &str = "/spin/report";
pub const MONO_SPIN_ENDPOINT: &str = "/mono/spin";
pub const LUCKY2_BET_ENDPOINT: &str = "/lucky2/bet";
pub const INVENTORY_ENDPOINT: &str = "/inventory";
pub const INVENTORY_SELL_ENDPOINT: &str = "/inventory/sell";
pub const BOOSTER_USE_ENDPOINT: &str = "/booster/use";
pub const SPINS_BUY_ENDPOINT: &str = "/spins/buy";

pub const DEMO_USER_ID: &str = "demo";
pub const DEMO_STARS: u64 = 1000;
pub const DEMO_SPINS: u64 = 10;

pub const STARS_PER_SPIN: u64 = 50;  // 1 spin = 50 stars
pub const MAX_BET_STARS: u64 = 1000;
pub const MAX_BET_SPINS: u64 = 100;
pub const LUCKY2_MIN_BET_STARS: u64 = 25;
pub const MONO_MIN_STARS_PER_CHANCE: u64 = 4;

pub const LUCKY2_BET_STEPS: [u64; 7] = [25, 50, 100, 250, 500, 750, 1000];
pub const MONO_BET_STEPS: [u64; 7] = [1, 2, 5, 10, 25, 50, 100];

// (spins, price in stars)
pub const SPIN_PACKS: [(u64, u64); 4] = [(1, 50), (5, 225), (10, 400), (25, 900)];

pub const BONUS_ITEM_RATE: f64 = 0.005;  // 0.5% of wins
pub const SELL_PRICE_PERCENT: u64 = 70;
pub const LUCKY2_HOUSE_EDGE_BPS: u32 = 100;  // 1% commission on server-side Lucky2 wins

// Constants for frontend animation
pub const LUCKY2_SPIN_DURATION_MS: u32 = 3000;
pub const MONO_MIN_SPIN_DURATION_MS: u32 = 2000;
pub const MONO_SPIN_JITTER_MS: u32 = 1000;
pub const RESULT_DISPLAY_MS: u32 = 3000;
pub const FULL_ROTATIONS: f64 = 5.0;

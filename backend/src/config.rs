use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use shared::constants::LUCKY2_HOUSE_EDGE_BPS;
use tracing::warn;

/// Server settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Commission on reported spins and on server Mono spins.
    pub house_edge_bps: u32,
    /// Commission on server-side Lucky2 bets (1% by default).
    pub lucky2_house_edge_bps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("frontend/dist"),
            house_edge_bps: 0,
            lucky2_house_edge_bps: LUCKY2_HOUSE_EDGE_BPS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            house_edge_bps: env_or("HOUSE_EDGE_BPS", defaults.house_edge_bps),
            lucky2_house_edge_bps: env_or("LUCKY2_HOUSE_EDGE_BPS", defaults.lucky2_house_edge_bps),
        }
    }
}

fn env_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

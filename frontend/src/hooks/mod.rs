pub mod use_balance;

pub use use_balance::*;

pub mod games;
pub mod home;
pub mod inventory;

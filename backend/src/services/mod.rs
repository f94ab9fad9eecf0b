use serde::Deserialize;
use validator::Validate;

use shared::validation::validate_user_id;

pub mod inventory_service;
pub mod shop_service;
pub mod user_service;

/// `?user_id=` on the read endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct UserQuery {
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
}

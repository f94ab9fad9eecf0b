use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::chance_table::WheelColor;

static USER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("user id pattern is valid"));

/// Telegram numeric ids, `demo`, or any short slug.
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if !USER_ID_PATTERN.is_match(user_id) {
        return Err(ValidationError::new("invalid_user_id"));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    color
        .parse::<WheelColor>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_color"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ids() {
        assert!(validate_user_id("demo").is_ok());
        assert!(validate_user_id("123456789").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("a b").is_err());
        assert!(validate_user_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_colors() {
        assert!(validate_color("Red").is_ok());
        assert!(validate_color("green").is_err());
    }
}

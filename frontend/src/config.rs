use shared::constants::DEMO_USER_ID;
use shared::validation::validate_user_id;
use web_sys::{window, UrlSearchParams};

const USER_ID_KEY: &str = "casino_user_id";

pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(location) = window.location().host() {
            // Same origin as the page, so the app works behind any host or port
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, location);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}

pub fn api_url(path: &str) -> String {
    format!("{}/api{}", get_api_base_url(), path)
}

fn query_user_id() -> Option<String> {
    let search = window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get("user_id")
}

/// Player id from `?user_id=`, then the last id this browser used, then `demo`.
/// Whatever is picked is remembered for the next visit.
pub fn get_user_id() -> String {
    let storage = window().and_then(|w| w.local_storage().ok().flatten());

    let user_id = query_user_id()
        .or_else(|| storage.as_ref().and_then(|s| s.get_item(USER_ID_KEY).ok().flatten()))
        .filter(|id| validate_user_id(id).is_ok())
        .unwrap_or_else(|| DEMO_USER_ID.to_string());

    if let Some(storage) = storage {
        let _ = storage.set_item(USER_ID_KEY, &user_id);
    }
    user_id
}

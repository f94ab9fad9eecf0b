use js_sys::{Function, Reflect};
use shared::{PlatformBridge, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

/// `window.Telegram.WebApp`, when the page runs inside Telegram.
fn web_app() -> Option<JsValue> {
    let window = window()?;
    let telegram = Reflect::get(&window, &JsValue::from_str("Telegram")).ok()?;
    if telegram.is_undefined() || telegram.is_null() {
        return None;
    }
    let web_app = Reflect::get(&telegram, &JsValue::from_str("WebApp")).ok()?;
    if web_app.is_undefined() || web_app.is_null() {
        return None;
    }
    Some(web_app)
}

fn call_method(target: &JsValue, name: &str, arg: Option<&JsValue>) -> Result<JsValue, PlatformError> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(PlatformError::Unavailable)?;
    let result = match arg {
        Some(arg) => method.call1(target, arg),
        None => method.call0(target),
    };
    result.map_err(|err| PlatformError::Rejected(format!("{:?}", err)))
}

/// Sends spin reports to the bot through `Telegram.WebApp.sendData`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelegramBridge;

impl TelegramBridge {
    /// Tells Telegram the app has loaded and asks for the full-height view.
    pub fn ready() {
        if let Some(web_app) = web_app() {
            let _ = call_method(&web_app, "ready", None);
            let _ = call_method(&web_app, "expand", None);
        }
    }
}

impl PlatformBridge for TelegramBridge {
    fn send(&self, payload: &str) -> Result<(), PlatformError> {
        let web_app = web_app().ok_or(PlatformError::Unavailable)?;
        call_method(&web_app, "sendData", Some(&JsValue::from_str(payload)))?;
        Ok(())
    }
}

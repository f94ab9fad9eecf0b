use gloo::events::EventListener;
use shared::AccountBalance;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CustomEvent, CustomEventInit};
use yew::prelude::*;

pub const BALANCE_UPDATE_EVENT: &str = "balanceUpdate";
const BALANCE_KEY: &str = "casino_balance";

fn stored_balance() -> Option<AccountBalance> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(BALANCE_KEY).ok().flatten())
        .and_then(|v| serde_json::from_str(&v).ok())
}

/// Publishes a new balance to every mounted `use_balance` and remembers it
/// for the next page load.
pub fn broadcast_balance(balance: AccountBalance) {
    let Ok(encoded) = serde_json::to_string(&balance) else {
        return;
    };
    let Some(window) = window() else {
        return;
    };
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(BALANCE_KEY, &encoded);
    }

    let event_init = CustomEventInit::new();
    event_init.set_detail(&JsValue::from_str(&encoded));
    if let Ok(event) = CustomEvent::new_with_event_init_dict(BALANCE_UPDATE_EVENT, &event_init) {
        let _ = window.dispatch_event(&event);
    }
}

/// The last known balance, kept in sync across pages.
#[hook]
pub fn use_balance() -> UseStateHandle<AccountBalance> {
    let balance = use_state(|| stored_balance().unwrap_or_else(AccountBalance::demo));

    {
        let balance = balance.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, BALANCE_UPDATE_EVENT, move |event| {
                    let update = event
                        .dyn_ref::<CustomEvent>()
                        .and_then(|e| e.detail().as_string())
                        .and_then(|detail| serde_json::from_str::<AccountBalance>(&detail).ok());
                    if let Some(update) = update {
                        balance.set(update);
                    }
                })
            });
            move || drop(listener)
        });
    }

    balance
}

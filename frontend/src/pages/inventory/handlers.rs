use std::rc::Rc;

use shared::api::{SellItemRequest, UseBoosterRequest};
use shared::inventory::{BoosterEffect, Inventory};
use shared::{AccountBalance, BackendClient, WagerError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::backend_client::HttpBackendClient;
use crate::base::{notify, NoticeKind};
use crate::hooks::broadcast_balance;

fn effect_message(effect: &BoosterEffect) -> String {
    if effect.duration_secs == 0 {
        format!("⚡ {}", effect.description)
    } else {
        format!("⚡ {} for {} min", effect.description, effect.duration_secs / 60)
    }
}

fn sample_inventory(balance: AccountBalance) -> Inventory {
    Inventory { currency: balance, ..Inventory::demo() }
}

async fn load_inventory(user_id: &str) -> Result<Inventory, WagerError> {
    Ok(HttpBackendClient::new().fetch_inventory(user_id).await?.inventory)
}

/// Replaces the local copy with the server's after a change the server
/// made. On failure the current view stays.
async fn reload_inventory(user_id: &str, inventory: &UseStateHandle<Option<Inventory>>) {
    match load_inventory(user_id).await {
        Ok(fresh) => inventory.set(Some(fresh)),
        Err(err) => log::warn!("inventory reload failed for {}: {}", user_id, err),
    }
}

/// Loads the player's inventory. The demo user, and anyone the server
/// cannot answer for, gets the sample items next to their current balance.
pub fn fetch_inventory(
    user_id: Rc<String>,
    is_demo: bool,
    balance: AccountBalance,
    inventory: UseStateHandle<Option<Inventory>>,
) {
    if is_demo {
        inventory.set(Some(sample_inventory(balance)));
        return;
    }
    spawn_local(async move {
        match load_inventory(&user_id).await {
            Ok(fresh) => {
                broadcast_balance(fresh.currency);
                inventory.set(Some(fresh));
            }
            Err(err) => {
                log::warn!("inventory fetch failed for {}: {}", user_id, err);
                notify(NoticeKind::Error, "Could not load your inventory. Showing sample items.");
                inventory.set(Some(sample_inventory(balance)));
            }
        }
    });
}

pub fn handle_sell(user_id: Rc<String>, is_demo: bool, inventory: UseStateHandle<Option<Inventory>>) -> Callback<u32> {
    Callback::from(move |item_id: u32| {
        if is_demo {
            let Some(mut next) = (*inventory).clone() else {
                return;
            };
            match next.sell_nft(item_id) {
                Ok(credited) => {
                    broadcast_balance(next.currency);
                    inventory.set(Some(next));
                    notify(NoticeKind::Success, format!("Sold for {} ⭐", credited));
                }
                Err(err) => notify(NoticeKind::Error, err.to_string()),
            }
            return;
        }

        let request = SellItemRequest {
            user_id: user_id.to_string(),
            item_id,
            item_type: "nft".to_string(),
        };
        let user_id = user_id.clone();
        let inventory = inventory.clone();
        spawn_local(async move {
            match HttpBackendClient::new().sell_item(&request).await {
                Ok(response) => {
                    broadcast_balance(response.balance);
                    notify(NoticeKind::Success, format!("Sold for {} ⭐", response.credited));
                    reload_inventory(&user_id, &inventory).await;
                }
                Err(err) => notify(NoticeKind::Error, err.to_string()),
            }
        });
    })
}

pub fn handle_use_booster(
    user_id: Rc<String>,
    is_demo: bool,
    inventory: UseStateHandle<Option<Inventory>>,
) -> Callback<u32> {
    Callback::from(move |booster_id: u32| {
        if is_demo {
            let Some(mut next) = (*inventory).clone() else {
                return;
            };
            match next.activate_booster(booster_id) {
                Ok(effect) => {
                    inventory.set(Some(next));
                    notify(NoticeKind::Success, effect_message(&effect));
                }
                Err(err) => notify(NoticeKind::Error, err.to_string()),
            }
            return;
        }

        let request = UseBoosterRequest { user_id: user_id.to_string(), booster_id };
        let user_id = user_id.clone();
        let inventory = inventory.clone();
        spawn_local(async move {
            match HttpBackendClient::new().use_booster(&request).await {
                Ok(response) => {
                    notify(NoticeKind::Success, effect_message(&response.effect));
                    reload_inventory(&user_id, &inventory).await;
                }
                Err(err) => notify(NoticeKind::Error, err.to_string()),
            }
        });
    })
}

mod lucky2;
mod mono;
mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use shared::api::BuySpinsRequest;
use shared::{AccountBalance, BetSelection, GameKind, ReportStatus, RngSource, SpinPack, SpinResult, WagerSession};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::backend_client::HttpBackendClient;
use crate::base::{notify, NoticeKind};
use crate::config::get_user_id;
use crate::hooks::{broadcast_balance, use_balance};
use crate::reveal::{schedule_reveal, RevealHandle};
use crate::telegram::TelegramBridge;
use wheel_utils::{landing_angle, target_rotation};

pub use lucky2::Lucky2Game;
pub use mono::MonoGame;

pub type GameSession = WagerSession<HttpBackendClient, TelegramBridge>;

fn new_session(game: GameKind, balance: AccountBalance) -> GameSession {
    let rng = RngSource(SmallRng::from_entropy());
    WagerSession::new(
        game,
        Box::new(rng),
        HttpBackendClient::new(),
        TelegramBridge,
        || js_sys::Date::now() as u64,
        get_user_id(),
        balance,
    )
}

/// A game page's session plus the state its wheel animates from.
#[derive(Clone)]
pub struct WheelHandle {
    pub session: Rc<GameSession>,
    pub rotation: UseStateHandle<f64>,
    pub spinning: UseStateHandle<bool>,
    pub duration_ms: UseStateHandle<u32>,
    pub last_result: UseStateHandle<Option<SpinResult>>,
    reveal: Rc<RefCell<Option<RevealHandle>>>,
}

impl WheelHandle {
    /// Settles the bet, then turns the wheel and shows the result once it
    /// stops. The balance in the nav bar only moves at the reveal.
    pub fn spin(&self, selection: BetSelection) {
        if *self.spinning {
            return;
        }
        self.spinning.set(true);
        self.last_result.set(None);

        let handle = self.clone();
        spawn_local(async move {
            match handle.session.place_bet(selection).await {
                Ok(result) => handle.animate(result),
                Err(err) => {
                    notify(NoticeKind::Error, err.to_string());
                    handle.spinning.set(false);
                }
            }
        });
    }

    /// Trades stars for a spin pack. The demo user's purchase stays local.
    pub fn buy_spins(&self, pack: SpinPack) {
        if *self.spinning {
            return;
        }
        let session = self.session.clone();
        if session.is_demo() {
            match session.balance().buy_spins(pack) {
                Ok(balance) => apply_purchase(&session, pack, balance),
                Err(err) => notify(NoticeKind::Error, err.to_string()),
            }
            return;
        }

        let request = BuySpinsRequest { user_id: session.user_id().to_string(), spins: pack.spins };
        spawn_local(async move {
            match session.backend().buy_spins(&request).await {
                Ok(response) => apply_purchase(&session, response.pack, response.balance),
                Err(err) => notify(NoticeKind::Error, err.to_string()),
            }
        });
    }

    fn animate(&self, result: SpinResult) {
        let game = self.session.game();
        let duration = game.reveal_duration_ms(rand::thread_rng().gen::<f64>());
        let landing = landing_angle(self.session.table(), &result);

        self.duration_ms.set(duration);
        self.rotation.set(target_rotation(*self.rotation, landing));

        let spinning = self.spinning.clone();
        let last_result = self.last_result.clone();
        let handle = schedule_reveal(result, duration, move |result| {
            broadcast_balance(result.balance);
            if let Some(item) = &result.outcome.bonus_item {
                notify(NoticeKind::Success, format!("🎁 Bonus item: {}!", item.name));
            }
            if let ReportStatus::Failed(reason) = &result.report {
                log::warn!("{} spin not recorded: {}", game, reason);
            }
            last_result.set(Some(result));
            spinning.set(false);
        });
        *self.reveal.borrow_mut() = Some(handle);
    }
}

fn apply_purchase(session: &GameSession, pack: SpinPack, balance: AccountBalance) {
    session.set_balance(balance);
    broadcast_balance(balance);
    notify(
        NoticeKind::Success,
        format!("🎰 +{} spins for {} ⭐", pack.spins, pack.price_stars),
    );
}

#[hook]
pub fn use_wheel(game: GameKind) -> WheelHandle {
    let balance = use_balance();
    let opening = *balance;
    let session = use_memo(game, move |game| new_session(*game, opening));
    let rotation = use_state(|| 0.0);
    let spinning = use_state(|| false);
    let duration_ms = use_state(|| 0u32);
    let last_result = use_state(|| None::<SpinResult>);
    let reveal = use_mut_ref(|| None::<RevealHandle>);

    {
        let session = session.clone();
        use_effect_with(game, move |_| {
            TelegramBridge::ready();
            if !session.is_demo() {
                spawn_local(async move {
                    match session.refresh_balance().await {
                        Ok(balance) => broadcast_balance(balance),
                        Err(err) => log::info!("keeping local balance: {}", err),
                    }
                });
            }
            || ()
        });
    }

    WheelHandle { session, rotation, spinning, duration_ms, last_result, reveal }
}

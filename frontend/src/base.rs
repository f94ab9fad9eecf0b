use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use shared::constants::RESULT_DISPLAY_MS;
use shared::Currency;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CustomEvent, CustomEventInit};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_balance;
use crate::{styles, Route};

const NOTIFICATION_EVENT: &str = "notification";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            Self::Info => styles::ALERT_INFO,
            Self::Success => styles::ALERT_SUCCESS,
            Self::Error => styles::ALERT_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Notice {
    kind: NoticeKind,
    text: String,
}

/// Shows a banner under the nav bar for a few seconds.
pub fn notify(kind: NoticeKind, text: impl Into<String>) {
    let notice = Notice { kind, text: text.into() };
    let (Some(window), Ok(detail)) = (window(), serde_json::to_string(&notice)) else {
        return;
    };
    let event_init = CustomEventInit::new();
    event_init.set_detail(&JsValue::from_str(&detail));
    if let Ok(event) = CustomEvent::new_with_event_init_dict(NOTIFICATION_EVENT, &event_init) {
        let _ = window.dispatch_event(&event);
    }
}

#[derive(Properties, PartialEq)]
pub struct BaseProps {
    pub children: Html,
}

#[function_component(Base)]
pub fn base(props: &BaseProps) -> Html {
    let balance = use_balance();
    let notice = use_state(|| None::<Notice>);
    let hide_timer = use_mut_ref(|| None::<Timeout>);

    {
        let notice = notice.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, NOTIFICATION_EVENT, move |event| {
                    let incoming = event
                        .dyn_ref::<CustomEvent>()
                        .and_then(|e| e.detail().as_string())
                        .and_then(|detail| serde_json::from_str::<Notice>(&detail).ok());
                    if let Some(incoming) = incoming {
                        notice.set(Some(incoming));
                        let notice = notice.clone();
                        // Replacing the timer drops, and so cancels, the previous one
                        *hide_timer.borrow_mut() = Some(Timeout::new(RESULT_DISPLAY_MS, move || notice.set(None)));
                    }
                })
            });
            move || drop(listener)
        });
    }

    html! {
        <div class="min-h-screen bg-gray-900 text-white">
            <nav class={styles::NAV}>
                <div class="h-14 px-4 flex items-center justify-between">
                    <Link<Route> to={Route::Home} classes={styles::NAV_BRAND}>{"🎡 Wheels"}</Link<Route>>
                    <div class={styles::NAV_ITEMS}>
                        <Link<Route> to={Route::Mono} classes={styles::NAV_LINK}>{"Mono"}</Link<Route>>
                        <Link<Route> to={Route::Lucky2} classes={styles::NAV_LINK}>{"Lucky2"}</Link<Route>>
                        <Link<Route> to={Route::Inventory} classes={styles::NAV_LINK}>{"🎒"}</Link<Route>>
                        <div class={styles::BALANCE_PILL}>
                            <span>{format!("{} {}", Currency::Stars.emoji(), balance.stars)}</span>
                            <span>{format!("{} {}", Currency::Spins.emoji(), balance.spins)}</span>
                        </div>
                    </div>
                </div>
            </nav>
            if let Some(notice) = &*notice {
                <div class="fixed top-16 left-0 right-0 z-40 flex justify-center px-4">
                    <div class={classes!(notice.kind.class(), "shadow-lg", "max-w-md", "w-full")}>
                        {&notice.text}
                    </div>
                </div>
            }
            <main class={styles::CONTAINER}>
                {props.children.clone()}
            </main>
        </div>
    }
}

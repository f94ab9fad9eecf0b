use shared::api::{GameStats, StatsResponse};
use shared::constants::{DEMO_USER_ID, STARS_PER_SPIN};
use shared::GameKind;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::backend_client::HttpBackendClient;
use crate::base::Base;
use crate::config::get_user_id;
use crate::hooks::use_balance;
use crate::{styles, Route};

struct MenuEntry {
    route: Route,
    emoji: &'static str,
    title: &'static str,
    blurb: String,
}

fn menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry {
            route: Route::Mono,
            emoji: "🎯",
            title: "Mono",
            blurb: format!("Choose 1% to 65%, up to 100x. Bets in {}.", GameKind::Mono.currency()),
        },
        MenuEntry {
            route: Route::Lucky2,
            emoji: "🎨",
            title: "Lucky2",
            blurb: format!("Blue, red or purple. Bets in {}.", GameKind::Lucky2.currency()),
        },
        MenuEntry {
            route: Route::Inventory,
            emoji: "🎒",
            title: "Inventory",
            blurb: "Your gifts, boosters and collections.".to_string(),
        },
    ]
}

fn stats_row(game: GameKind, stats: &GameStats) -> Html {
    let currency = game.currency();
    html! {
        <div class="flex justify-between text-sm">
            <span class="font-semibold">{game.display_name()}</span>
            <span>{format!("{} games · {:.1}% won", stats.total_games, stats.win_rate())}</span>
            <span class={if stats.net_profit() >= 0 { "text-green-400" } else { "text-red-400" }}>
                {format!("{:+} {}", stats.net_profit(), currency.emoji())}
            </span>
        </div>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let balance = use_balance();
    let user_id = use_memo((), |_| get_user_id());
    let stats = use_state(|| None::<StatsResponse>);

    {
        let user_id = user_id.clone();
        let stats = stats.clone();
        use_effect_with((), move |_| {
            if user_id.as_str() != DEMO_USER_ID {
                spawn_local(async move {
                    match HttpBackendClient::new().fetch_stats(&user_id).await {
                        Ok(response) => stats.set(Some(response)),
                        Err(err) => log::info!("no stats for {}: {}", user_id, err),
                    }
                });
            }
            || ()
        });
    }

    html! {
        <Base>
            <div class="space-y-4">
                <div class={styles::CARD}>
                    <h1 class={styles::TEXT_H2}>{"🎡 Wheel Casino"}</h1>
                    <p class={styles::TEXT_BODY}>
                        {format!("⭐ {} stars · 🎰 {} spins", balance.stars, balance.spins)}
                    </p>
                    <p class={styles::TEXT_SMALL}>{format!("1 spin = {} stars", STARS_PER_SPIN)}</p>
                    if user_id.as_str() == DEMO_USER_ID {
                        <p class={classes!(styles::ALERT_INFO, "mt-3")}>
                            {"Demo mode: results stay on this device."}
                        </p>
                    }
                </div>
                if let Some(stats) = &*stats {
                    <div class={classes!(styles::CARD, "space-y-1")}>
                        {stats_row(GameKind::Mono, &stats.mono)}
                        {stats_row(GameKind::Lucky2, &stats.lucky2)}
                    </div>
                }
                {for menu().into_iter().map(|entry| html! {
                    <Link<Route> to={entry.route} classes={classes!(styles::CARD_HOVER, "block")}>
                        <div class="flex items-center space-x-4">
                            <span class="text-4xl">{entry.emoji}</span>
                            <div>
                                <div class="text-lg font-bold">{entry.title}</div>
                                <div class={styles::TEXT_SMALL}>{entry.blurb}</div>
                            </div>
                        </div>
                    </Link<Route>>
                })}
            </div>
        </Base>
    }
}

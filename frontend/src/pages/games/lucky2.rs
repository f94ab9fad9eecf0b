use shared::constants::LUCKY2_MIN_BET_STARS;
use shared::{BetSelection, GameKind, TierId, WheelColor};
use yew::prelude::*;

use super::use_wheel;
use super::wheel_canvas::WheelCanvas;
use super::wheel_utils::{color_segments, BetControls, ResultDisplay};
use crate::base::Base;
use crate::hooks::use_balance;
use crate::styles;

const GAME: GameKind = GameKind::Lucky2;

#[function_component(Lucky2Game)]
pub fn lucky2_game() -> Html {
    let wheel = use_wheel(GAME);
    let balance = use_balance();
    let selected = use_state(|| None::<WheelColor>);
    let bet = use_state(|| LUCKY2_MIN_BET_STARS);

    let session = wheel.session.clone();
    let spinning = *wheel.spinning;
    let segments = color_segments(session.table());

    let selected_tier = (*selected).and_then(|color| session.table().lookup(TierId::Color(color)).ok().cloned());
    let minimum = selected_tier
        .as_ref()
        .map(|tier| session.minimum_bet(tier))
        .unwrap_or(LUCKY2_MIN_BET_STARS);

    let on_down = {
        let bet = bet.clone();
        Callback::from(move |_| bet.set(GAME.step_down(*bet).max(minimum)))
    };
    let on_up = {
        let bet = bet.clone();
        Callback::from(move |_| bet.set(GAME.step_up(*bet).max(minimum)))
    };

    let on_spin = {
        let wheel = wheel.clone();
        let selected = selected.clone();
        let bet = bet.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(color) = *selected {
                wheel.spin(BetSelection::new(TierId::Color(color), *bet));
            }
        })
    };

    let color_buttons = session.table().tiers().iter().filter_map(|tier| {
        let TierId::Color(color) = tier.id else {
            return None;
        };
        let is_selected = *selected == Some(color);
        let onclick = {
            let selected = selected.clone();
            Callback::from(move |_: MouseEvent| selected.set(Some(color)))
        };
        Some(html! {
            <button
                key={color.as_str()}
                {onclick}
                disabled={spinning}
                class={classes!(
                    "flex-1", "rounded-xl", "p-3", "text-white", "font-semibold", "border-2", "transition-all",
                    if is_selected { "border-yellow-300 scale-105" } else { "border-transparent opacity-80" }
                )}
                style={format!("background-color: {}", tier.display_color)}
            >
                <div class="text-2xl">{color.emoji()}</div>
                <div>{color.display_name()}</div>
                <div class="text-xs">{format!("{}% · {}", tier.win_probability_percent, tier.payout_multiplier)}</div>
            </button>
        })
    });

    let status = match &selected_tier {
        Some(tier) => format!(
            "Potential win: {} stars · You have {} stars",
            tier.payout_multiplier.gross(*bet),
            balance.stars
        ),
        None => "Pick a color to place your bet".to_string(),
    };

    html! {
        <Base>
            <div class={styles::CARD}>
                <h2 class={styles::TEXT_H2}>{"🎨 Lucky2"}</h2>
                <p class={styles::TEXT_SMALL}>{"Bet on the color the wheel stops at."}</p>

                <WheelCanvas
                    {segments}
                    rotation={*wheel.rotation}
                    is_spinning={spinning}
                    duration_ms={*wheel.duration_ms}
                />

                <div class="flex space-x-2 my-3">
                    {for color_buttons}
                </div>

                <BetControls
                    amount={*bet}
                    currency={GAME.currency()}
                    minimum={minimum}
                    disabled={spinning}
                    on_down={on_down}
                    on_up={on_up}
                />
                <p class={classes!(styles::TEXT_SMALL, "text-center", "mb-3")}>{status}</p>

                <button
                    class={styles::BUTTON_PRIMARY}
                    disabled={spinning || selected.is_none()}
                    onclick={on_spin}
                >
                    {if spinning { "Spinning..." } else { "Place bet" }}
                </button>

                <ResultDisplay result={(*wheel.last_result).clone()} currency={GAME.currency()} />
            </div>
        </Base>
    }
}

use shared::{BetSelection, GameKind, SpinPack, TierId};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::use_wheel;
use super::wheel_canvas::WheelCanvas;
use super::wheel_utils::{percentage_segments, BetControls, ResultDisplay};
use crate::base::Base;
use crate::hooks::use_balance;
use crate::styles;

const GAME: GameKind = GameKind::Mono;
const DEFAULT_CHANCE: u8 = 50;

#[function_component(MonoGame)]
pub fn mono_game() -> Html {
    let wheel = use_wheel(GAME);
    let balance = use_balance();
    let session = wheel.session.clone();

    let tier = use_state(|| {
        session
            .snap_chance(DEFAULT_CHANCE)
            .ok()
            .or_else(|| session.table().tiers().first().cloned())
    });
    let bet = use_state(|| (*tier).as_ref().map(|t| session.minimum_bet(t)).unwrap_or(1));

    let Some(current) = (*tier).clone() else {
        return html! { <Base><div class={styles::ALERT_ERROR}>{"No chances configured"}</div></Base> };
    };
    let minimum = session.minimum_bet(&current);
    let spinning = *wheel.spinning;

    let on_chance = {
        let session = session.clone();
        let tier = tier.clone();
        let bet = bet.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Ok(requested) = input.value().parse::<u8>() else {
                return;
            };
            if let Ok(snapped) = session.snap_chance(requested) {
                let minimum = session.minimum_bet(&snapped);
                if *bet < minimum {
                    bet.set(minimum);
                }
                tier.set(Some(snapped));
            }
        })
    };

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
        let bet = bet.clone();
        let chance = current.win_probability_percent;
        Callback::from(move |_: MouseEvent| {
            wheel.spin(BetSelection::new(TierId::Chance(chance), *bet));
        })
    };

    let potential = current.payout_multiplier.gross(*bet);
    let expected = session.expected_value(&current, *bet);

    let packs = SpinPack::all().into_iter().map(|pack| {
        let wheel = wheel.clone();
        let onclick = Callback::from(move |_: MouseEvent| wheel.buy_spins(pack));
        let discount = pack.discount_percent();
        html! {
            <button
                key={pack.spins}
                class={styles::BUTTON_SMALL}
                disabled={spinning || balance.stars < pack.price_stars}
                {onclick}
            >
                {format!("+{} 🎰 · {} ⭐", pack.spins, pack.price_stars)}
                if discount > 0 {
                    <span class="text-green-300">{format!(" -{}%", discount)}</span>
                }
            </button>
        }
    });

    html! {
        <Base>
            <div class={styles::CARD}>
                <h2 class={styles::TEXT_H2}>{"🎯 Mono"}</h2>
                <p class={styles::TEXT_SMALL}>{"Pick your chance. Lower odds pay more."}</p>

                <WheelCanvas
                    segments={percentage_segments(current.win_probability_percent, &current.display_color, &format!("{}%", current.win_probability_percent))}
                    rotation={*wheel.rotation}
                    is_spinning={spinning}
                    duration_ms={*wheel.duration_ms}
                />

                <div class="flex justify-between items-baseline">
                    <span class="text-3xl font-bold" style={format!("color: {}", current.display_color)}>
                        {format!("{}%", current.win_probability_percent)}
                    </span>
                    <span class="text-xl font-semibold text-yellow-300">{current.payout_multiplier.to_string()}</span>
                </div>
                <input
                    type="range"
                    min="1"
                    max="65"
                    value={current.win_probability_percent.to_string()}
                    disabled={spinning}
                    oninput={on_chance}
                    class="w-full my-3 accent-yellow-400"
                />

                <BetControls
                    amount={*bet}
                    currency={GAME.currency()}
                    minimum={minimum}
                    disabled={spinning}
                    on_down={on_down}
                    on_up={on_up}
                />
                <p class={classes!(styles::TEXT_SMALL, "text-center", "mb-3")}>
                    {format!("Potential win: {} spins · You have {} spins", potential, balance.spins)}
                </p>
                <p class={classes!(styles::TEXT_SMALL, "text-center", "mb-3")}>
                    {format!("Expected result per spin: {:+.2} spins", expected)}
                </p>

                <button class={styles::BUTTON_PRIMARY} disabled={spinning} onclick={on_spin}>
                    {if spinning { "Spinning..." } else { "Spin" }}
                </button>

                <ResultDisplay result={(*wheel.last_result).clone()} currency={GAME.currency()} />

                <div class="mt-4">
                    <div class={styles::TEXT_SMALL}>{"Buy spins with stars"}</div>
                    <div class="grid grid-cols-2 gap-2 mt-2">
                        {for packs}
                    </div>
                </div>
            </div>
        </Base>
    }
}

mod filters;
mod handlers;

use std::rc::Rc;

use shared::constants::DEMO_USER_ID;
use shared::inventory::{can_sell, can_trade, sell_price, Category, Inventory as Holdings, InventoryEntry, Rarity, SortKey, sort_entries};
use shared::{Currency, ExchangeRate};
use yew::prelude::*;

use crate::base::Base;
use crate::config::get_user_id;
use crate::hooks::use_balance;
use crate::styles;
use filters::FilterBar;
use handlers::{fetch_inventory, handle_sell, handle_use_booster};

#[derive(Properties, PartialEq)]
struct ItemCardProps {
    entry: InventoryEntry,
    on_sell: Callback<u32>,
    on_activate: Callback<u32>,
}

#[function_component(ItemCard)]
fn item_card(props: &ItemCardProps) -> Html {
    let entry = &props.entry;
    let id = entry.id();

    let badge = entry.rarity().map(|rarity| html! {
        <span class="text-xs font-semibold px-2 py-0.5 rounded-full" style={format!("background-color: {}", rarity.color())}>
            {format!("{} {}", rarity.icon(), rarity.display_name())}
        </span>
    });

    let actions = match entry {
        InventoryEntry::Nft(item) => {
            let on_sell = props.on_sell.clone();
            html! {
                <div class="flex items-center justify-between mt-2">
                    <span class={styles::TEXT_SMALL}>
                        {format!("{} ⭐{}", item.value, if can_trade(item) { " · tradable" } else { "" })}
                    </span>
                    if can_sell(item) {
                        <button class={styles::BUTTON_SMALL} onclick={Callback::from(move |_| on_sell.emit(id))}>
                            {format!("Sell {} ⭐", sell_price(item.value))}
                        </button>
                    }
                </div>
            }
        }
        InventoryEntry::Booster(booster) => {
            let on_activate = props.on_activate.clone();
            html! {
                <div class="flex items-center justify-between mt-2">
                    <span class={styles::TEXT_SMALL}>
                        {booster.expires.clone().map(|expires| format!("Expires {}", expires)).unwrap_or_default()}
                    </span>
                    if booster.active {
                        <span class="text-xs font-semibold text-green-400">{"Active"}</span>
                    } else {
                        <button class={styles::BUTTON_SMALL} onclick={Callback::from(move |_| on_activate.emit(id))}>
                            {"Activate"}
                        </button>
                    }
                </div>
            }
        }
        InventoryEntry::Collectible(collectible) => html! {
            <div class={classes!(styles::TEXT_SMALL, "mt-2")}>{collectible.kind.clone()}</div>
        },
    };

    html! {
        <div class={styles::CARD}>
            <div class="flex items-center space-x-3">
                <span class="text-4xl">{entry.emoji()}</span>
                <div class="flex-1">
                    <div class="font-bold">{entry.name()}</div>
                    {badge.unwrap_or_default()}
                </div>
            </div>
            {actions}
        </div>
    }
}

fn currency_section(holdings: &Holdings) -> Html {
    let balance = holdings.currency;
    html! {
        <div class="grid grid-cols-2 gap-3">
            {for [Currency::Stars, Currency::Spins].into_iter().map(|currency| html! {
                <div class={styles::CARD}>
                    <div class="text-3xl">{currency.emoji()}</div>
                    <div class="text-2xl font-bold">{balance.available(currency)}</div>
                    <div class={styles::TEXT_SMALL}>{currency.as_str()}</div>
                </div>
            })}
            <div class={classes!(styles::CARD, "col-span-2")}>
                <div class={styles::TEXT_SMALL}>{"Worth in stars"}</div>
                <div class="text-xl font-bold">{balance.total_in_stars(ExchangeRate::STANDARD)}</div>
            </div>
        </div>
    }
}

fn summary(holdings: &Holdings) -> Html {
    let counts = holdings.rarity_counts();
    html! {
        <div class={styles::CARD}>
            <div class="flex justify-between">
                <div>
                    <div class={styles::TEXT_SMALL}>{"Items"}</div>
                    <div class="text-xl font-bold">{holdings.total_items()}</div>
                </div>
                <div>
                    <div class={styles::TEXT_SMALL}>{"Value"}</div>
                    <div class="text-xl font-bold">{format!("{} ⭐", holdings.total_value())}</div>
                </div>
                <div>
                    <div class={styles::TEXT_SMALL}>{"Level"}</div>
                    <div class="text-xl font-bold">{holdings.level()}</div>
                </div>
            </div>
            <div class="flex justify-between mt-3 text-sm">
                {for Rarity::ALL.iter().zip(counts).map(|(rarity, count)| html! {
                    <span style={format!("color: {}", rarity.color())}>{format!("{} {}", rarity.icon(), count)}</span>
                })}
            </div>
        </div>
    }
}

#[function_component(Inventory)]
pub fn inventory() -> Html {
    let balance = use_balance();
    let user_id: Rc<String> = use_memo((), |_| get_user_id());
    let holdings = use_state(|| None::<Holdings>);
    let category = use_state(|| Category::All);
    let sort_key = use_state(|| SortKey::Rarity);
    let query = use_state(String::new);

    let is_demo = user_id.as_str() == DEMO_USER_ID;

    {
        let user_id = user_id.clone();
        let holdings = holdings.clone();
        let opening = *balance;
        use_effect_with((), move |_| {
            fetch_inventory(user_id, is_demo, opening, holdings);
            || ()
        });
    }

    let on_sell = handle_sell(user_id.clone(), is_demo, holdings.clone());
    let on_activate = handle_use_booster(user_id, is_demo, holdings.clone());

    let on_category_change = {
        let category = category.clone();
        Callback::from(move |next: Category| category.set(next))
    };
    let on_sort_change = {
        let sort_key = sort_key.clone();
        Callback::from(move |next: SortKey| sort_key.set(next))
    };
    let on_query_change = {
        let query = query.clone();
        Callback::from(move |next: String| query.set(next))
    };

    let body = match &*holdings {
        None => html! { <div class={classes!(styles::TEXT_SMALL, "text-center", "py-8")}>{"Loading..."}</div> },
        Some(holdings) if *category == Category::Currency => currency_section(holdings),
        Some(holdings) => {
            let mut entries = holdings.search(*category, &query);
            sort_entries(&mut entries, *sort_key);
            if entries.is_empty() {
                html! { <div class={classes!(styles::TEXT_SMALL, "text-center", "py-8")}>{"Nothing here yet"}</div> }
            } else {
                html! {
                    <div class="grid grid-cols-1 gap-3">
                        {for entries.into_iter().enumerate().map(|(index, entry)| html! {
                            <ItemCard
                                key={format!("{}-{}", index, entry.id())}
                                entry={entry}
                                on_sell={on_sell.clone()}
                                on_activate={on_activate.clone()}
                            />
                        })}
                    </div>
                }
            }
        }
    };

    html! {
        <Base>
            <div class="space-y-4">
                <h2 class={styles::TEXT_H2}>{"🎒 Inventory"}</h2>
                if let Some(holdings) = &*holdings {
                    {summary(holdings)}
                }
                <FilterBar
                    category={*category}
                    sort_key={*sort_key}
                    query={(*query).clone()}
                    {on_category_change}
                    {on_sort_change}
                    {on_query_change}
                />
                {body}
            </div>
        </Base>
    }
}

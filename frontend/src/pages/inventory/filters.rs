use shared::inventory::{Category, SortKey};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::styles;

fn category_value(category: Category) -> &'static str {
    match category {
        Category::All => "all",
        Category::Nfts => "nft",
        Category::Boosters => "boosters",
        Category::Currency => "currency",
        Category::Collectibles => "collections",
    }
}

fn category_from_value(value: &str) -> Category {
    Category::all_options()
        .into_iter()
        .find(|category| category_value(*category) == value)
        .unwrap_or(Category::All)
}

#[derive(Clone, PartialEq, Properties)]
pub struct FilterBarProps {
    pub category: Category,
    pub sort_key: SortKey,
    pub query: String,
    pub on_category_change: Callback<Category>,
    pub on_sort_change: Callback<SortKey>,
    pub on_query_change: Callback<String>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let category_onchange = {
        let on_category_change = props.on_category_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                on_category_change.emit(category_from_value(&select.value()));
            }
        })
    };

    let sort_onchange = {
        let on_sort_change = props.on_sort_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                on_sort_change.emit(SortKey::from_value(&select.value()));
            }
        })
    };

    let query_oninput = {
        let on_query_change = props.on_query_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_query_change.emit(input.value());
        })
    };

    html! {
        <div class="space-y-2">
            <input
                type="search"
                class={styles::INPUT}
                placeholder="Search by name, feature or rarity"
                value={props.query.clone()}
                oninput={query_oninput}
            />
            <div class="flex space-x-2 items-center">
                <select class={styles::SELECT} onchange={category_onchange}>
                    {for Category::all_options().into_iter().map(|category| html! {
                        <option value={category_value(category)} selected={props.category == category}>
                            {format!("{} {}", category.emoji(), category.label())}
                        </option>
                    })}
                </select>
                <select class={styles::SELECT} onchange={sort_onchange}>
                    {for SortKey::all_options().into_iter().map(|key| html! {
                        <option value={key.value()} selected={props.sort_key == key}>
                            {key.label()}
                        </option>
                    })}
                </select>
            </div>
        </div>
    }
}

pub mod backend_client;
pub mod base;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod reveal;
pub mod styles;
pub mod telegram;

use yew::prelude::*;
use yew_router::prelude::*;
use crate::pages::{
    games::{Lucky2Game, MonoGame},
    home::Home,
    inventory::Inventory,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/mono")] Mono,
    #[at("/lucky2")] Lucky2,
    #[at("/inventory")] Inventory,
    #[not_found]
    #[at("/404")] NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::NotFound => html! { <Home /> },
        Route::Mono => html! { <MonoGame /> },
        Route::Lucky2 => html! { <Lucky2Game /> },
        Route::Inventory => html! { <Inventory /> },
    }
}

//! Browser client of the overseas knowledge board (Yew, client-side
//! rendered).

mod api;
mod components;
mod config;
mod i18n;
mod pages;
mod router;
mod state;
mod storage;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <>
            <router::AppRouter />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

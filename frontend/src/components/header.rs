use overseas_board_shared::AuthSession;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    i18n::current::{common as common_text, header as t},
    router::Route,
    storage::LocalStorage,
};

#[function_component(Header)]
pub fn header() -> Html {
    // Re-rendered on every navigation, which is when the session can change.
    let route = use_route::<Route>();
    let signed_in = AuthSession::new(LocalStorage).session().is_authenticated();

    let nav_link = |target: Route, label: &'static str| {
        let active = route.as_ref() == Some(&target);
        html! {
            <Link<Route> to={target} classes={classes!(
                "nav-link",
                "px-3",
                "py-2",
                "rounded-lg",
                "text-sm",
                "font-semibold",
                active.then_some("bg-[var(--surface-alt)]")
            )}>
                { label }
            </Link<Route>>
        }
    };

    // The settings page is reachable only with a session.
    let account = if signed_in {
        nav_link(Route::Settings, t::SETTINGS)
    } else {
        nav_link(Route::Login, t::LOGIN)
    };

    html! {
        <header class={classes!(
            "fixed",
            "top-0",
            "inset-x-0",
            "z-30",
            "h-[var(--header-height-desktop)]",
            "flex",
            "items-center",
            "justify-between",
            "px-4",
            "bg-[var(--surface)]",
            "border-b",
            "border-[var(--border)]"
        )}>
            <Link<Route> to={Route::Home} classes="brand-logo text-lg font-bold">
                { common_text::APP_TITLE }
            </Link<Route>>
            <nav class={classes!("flex", "items-center", "gap-2")}>
                { nav_link(Route::Home, t::HOME) }
                { nav_link(Route::Filters, t::FILTERS) }
                { account }
            </nav>
        </header>
    }
}

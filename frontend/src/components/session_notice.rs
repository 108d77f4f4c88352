use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    i18n::current::{header, home as t},
    router::Route,
};

/// Re-login prompt shown after the backend rejected the stored token.
#[function_component(SessionExpiredNotice)]
pub fn session_expired_notice() -> Html {
    html! {
        <p class="session-expired" role="alert">
            { t::SESSION_EXPIRED }
            <Link<Route> to={Route::Login}>{ header::LOGIN }</Link<Route>>
        </p>
    }
}

pub mod filters;
pub mod home;
pub mod login;
pub mod not_found;
pub mod settings;
pub mod user;

use overseas_board_shared::BoardError;
use web_sys::console;
use yew::prelude::*;
use yew_router::prelude::Navigator;

use crate::router::Route;

/// Surface a failed action: log it, show a message, and send the user to
/// the login page when the session is gone.
pub(crate) fn report_failure(
    err: &BoardError,
    fallback: &str,
    error: &UseStateHandle<Option<String>>,
    navigator: Option<&Navigator>,
) {
    console::error_1(&format!("{fallback} {err}").into());
    error.set(Some(err.user_message(fallback)));
    if err.is_auth() {
        if let Some(nav) = navigator {
            nav.push(&Route::Login);
        }
    }
}

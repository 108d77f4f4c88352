use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

use crate::{config::ERROR_BANNER_TIMEOUT_MS, i18n::current::error_banner as t};

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    /// Clears the message in the owning page; also fired by the auto-dismiss
    /// timer.
    pub on_close: Callback<()>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let timer = {
        let on_close = props.on_close.clone();
        use_timeout(move || on_close.emit(()), ERROR_BANNER_TIMEOUT_MS)
    };

    // A new message restarts the countdown.
    {
        let timer = timer.clone();
        use_effect_with(props.message.clone(), move |_| {
            timer.reset();
        });
    }

    if props.message.trim().is_empty() {
        return Html::default();
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            class={classes!("error-banner", "flex", "items-start", "gap-3", "rounded-2xl", "px-5", "py-4", "text-sm")}
            role="alert"
            aria-live="assertive"
        >
            <div class="flex-1">
                <p class="font-semibold">{ t::TITLE }</p>
                <p>{ props.message.clone() }</p>
            </div>
            <button type="button" class="btn btn-reset btn-sm" aria-label={t::CLOSE_ARIA} onclick={close}>
                {"×"}
            </button>
        </div>
    }
}

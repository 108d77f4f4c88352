use yew::prelude::*;

use crate::i18n::current::{common, loading_spinner as t};

/// Shown in place of the post list until the list and its like states have
/// both arrived.
#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    html! {
        <div
            class={classes!("loading", "flex", "items-center", "justify-center", "gap-3", "p-6")}
            role="status"
            aria-live="polite"
            aria-busy="true"
            aria-label={t::ARIA_LABEL}
        >
            <div
                class={classes!(
                    "w-10",
                    "h-10",
                    "rounded-full",
                    "border-[3px]",
                    "border-[var(--border)]",
                    "border-t-[var(--primary)]",
                    "animate-spin"
                )}
            />
            <span class="text-sm">{ common::LOADING }</span>
        </div>
    }
}

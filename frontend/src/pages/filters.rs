use overseas_board_shared::{Dimension, FilterSelection, FilterSummary};
use web_sys::console;
use yew::prelude::*;

use crate::{api, components::chip_group::ChipGroup, i18n::current::filters as t};

fn persist(selection: &FilterSelection) -> bool {
    match api::client().legacy_filters().save(selection) {
        Ok(()) => true,
        Err(err) => {
            console::warn_1(&format!("Failed to save filters: {err}").into());
            false
        },
    }
}

/// Standalone filter page. Its selection lives in its own document and is
/// independent of the settings page.
#[function_component(FiltersPage)]
pub fn filters_page() -> Html {
    let selection = use_state(|| api::client().legacy_filters().load());
    let notice = use_state(|| None::<&'static str>);

    let on_toggle = {
        let selection = selection.clone();
        let notice = notice.clone();
        Callback::from(move |(dimension, code): (Dimension, String)| {
            let mut next = (*selection).clone();
            next.toggle(dimension, &code);
            persist(&next);
            notice.set(None);
            selection.set(next);
        })
    };

    let on_reset = {
        let selection = selection.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            api::client().legacy_filters().reset();
            selection.set(FilterSelection::default());
            notice.set(Some(t::RESET_DONE));
        })
    };

    let on_save = {
        let selection = selection.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            if persist(&selection) {
                notice.set(Some(t::SAVED));
            }
        })
    };

    let summary = FilterSummary::of(&selection);
    let groups = Dimension::ALL.into_iter().map(|dimension| {
        html! {
            <ChipGroup
                dimension={dimension}
                selected={selection.codes(dimension).to_vec()}
                on_toggle={on_toggle.clone()}
            />
        }
    });

    html! {
        <main class="container filters-page">
            <h2>{ t::TITLE }</h2>
            <p class="filter-message">{ summary.message() }</p>
            { for groups }
            <div class="filter-actions">
                <button type="button" class="btn btn-reset" onclick={on_reset}>{ t::RESET }</button>
                <button type="button" class="btn btn-primary" onclick={on_save}>{ t::SAVE }</button>
            </div>
            if let Some(text) = *notice {
                <p class="save-notice">{ text }</p>
            }
        </main>
    }
}

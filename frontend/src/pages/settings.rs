use overseas_board_shared::{
    board::{reduce, BoardEvent, BoardState},
    labels, Dimension,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::{use_navigator, Redirect};

use crate::{
    api,
    components::{chip_group::ChipGroup, error_banner::ErrorBanner},
    i18n::current::{common, settings as t},
    pages::report_failure,
    router::Route,
    state::BoardStore,
};

/// Apply `event`, persist the resulting document and show the saved notice.
fn apply(board: &UseReducerHandle<BoardStore>, notice: &UseStateHandle<Option<String>>, event: BoardEvent) {
    let next = reduce(board.0.clone(), event.clone());
    match api::client()
        .preferences()
        .save(&next.selection, &next.post_defaults)
    {
        Ok(()) => notice.set(Some(t::SAVED.to_string())),
        Err(err) => console::warn_1(&format!("Failed to save preferences: {err}").into()),
    }
    board.dispatch(event);
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let navigator = use_navigator();
    let restored = use_state(|| {
        let client = api::client();
        let preferences = client.preferences().load();
        let nickname = preferences.nickname.clone().unwrap_or_default();
        (BoardState::restore(preferences, client.session()), nickname)
    });
    let board = {
        let restored = restored.clone();
        use_reducer(move || BoardStore(restored.0.clone()))
    };
    let nickname = {
        let restored = restored.clone();
        use_state(move || restored.1.clone())
    };
    let notice = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    // Prefer the server's nickname once the profile arrives, and seed unset
    // post defaults from the profile's country and job.
    {
        let board = board.clone();
        let notice = notice.clone();
        let nickname = nickname.clone();
        let error = error.clone();
        let navigator = navigator.clone();
        let signed_in = board.0.session.is_authenticated();
        use_effect_with(signed_in, move |signed_in| {
            if *signed_in {
                spawn_local(async move {
                    match api::client().current_user().await {
                        Ok(profile) => {
                            let mut defaults = board.0.post_defaults.clone();
                            if defaults.fill_from_profile(&profile) {
                                let events: Vec<BoardEvent> = Dimension::ALL
                                    .into_iter()
                                    .filter(|dimension| defaults.get(*dimension) != board.0.post_defaults.get(*dimension))
                                    .map(|dimension| BoardEvent::SetPostDefault {
                                        dimension,
                                        code: defaults.get(dimension).to_string(),
                                    })
                                    .collect();
                                let next = events.iter().cloned().fold(board.0.clone(), reduce);
                                match api::client()
                                    .preferences()
                                    .save(&next.selection, &next.post_defaults)
                                {
                                    Ok(()) => notice.set(Some(t::DEFAULTS_FROM_PROFILE.to_string())),
                                    Err(err) => console::warn_1(&format!("Failed to save preferences: {err}").into()),
                                }
                                for event in events {
                                    board.dispatch(event);
                                }
                            }
                            if let Some(name) = profile.nickname.filter(|name| !name.is_empty()) {
                                nickname.set(name);
                            }
                        },
                        Err(err) if err.is_auth() => {
                            report_failure(&err, t::PROFILE_FAILED, &error, navigator.as_ref());
                        },
                        Err(err) => console::warn_1(&format!("Failed to load profile: {err}").into()),
                    }
                });
            }
            || ()
        });
    }

    if !board.0.session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    let on_toggle = {
        let board = board.clone();
        let notice = notice.clone();
        Callback::from(move |(dimension, code): (Dimension, String)| {
            apply(
                &board,
                &notice,
                BoardEvent::ToggleFilter {
                    dimension,
                    code,
                },
            )
        })
    };

    let reset_filters = {
        let board = board.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| apply(&board, &notice, BoardEvent::ResetFilters))
    };

    let reset_defaults = {
        let board = board.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| apply(&board, &notice, BoardEvent::ResetPostDefaults))
    };

    let default_select = |dimension: Dimension| {
        let current = board.0.post_defaults.get(dimension).to_string();
        let onchange = {
            let board = board.clone();
            let notice = notice.clone();
            Callback::from(move |event: Event| {
                if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                    apply(
                        &board,
                        &notice,
                        BoardEvent::SetPostDefault {
                            dimension,
                            code: target.value(),
                        },
                    );
                }
            })
        };
        let options = labels::codes(dimension).map(|code| {
            html! {
                <option value={code} selected={current == code}>
                    { labels::chip_label(dimension, code) }
                </option>
            }
        });
        html! {
            <label class="default-select">
                { dimension.title() }
                <select {onchange}>
                    <option value="" selected={current.is_empty()}>{ t::NOT_SET }</option>
                    { for options }
                </select>
            </label>
        }
    };

    let on_nickname = {
        let nickname = nickname.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                nickname.set(target.value());
            }
        })
    };

    let save_profile = {
        let board = board.clone();
        let nickname = nickname.clone();
        let notice = notice.clone();
        let error = error.clone();
        let saving = saving.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let defaults = board.0.post_defaults.clone();
            let nickname = (*nickname).clone();
            let notice = notice.clone();
            let error = error.clone();
            let saving = saving.clone();
            let navigator = navigator.clone();
            saving.set(true);
            spawn_local(async move {
                let name = Some(nickname.trim()).filter(|name| !name.is_empty());
                match api::client().update_profile(name, &defaults).await {
                    Ok(_) => notice.set(Some(t::PROFILE_SAVED.to_string())),
                    Err(err) => report_failure(&err, t::PROFILE_FAILED, &error, navigator.as_ref()),
                }
                saving.set(false);
            });
        })
    };

    let logout = {
        let board = board.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            api::client().logout();
            board.dispatch(BoardEvent::SignedOut);
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Home);
            }
        })
    };

    let clear_error = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let chip_groups = Dimension::ALL.into_iter().map(|dimension| {
        html! {
            <ChipGroup
                dimension={dimension}
                selected={board.0.selection.codes(dimension).to_vec()}
                on_toggle={on_toggle.clone()}
            />
        }
    });

    html! {
        <main class="container settings-page">
            <h2>{ t::TITLE }</h2>
            if let Some(message) = (*error).clone() {
                <ErrorBanner message={message} on_close={clear_error} />
            }
            if let Some(message) = (*notice).clone() {
                <p class="save-notice">{ message }</p>
            }
            <section class="settings-section">
                <h3>{ t::VIEW_FILTERS }</h3>
                { for chip_groups }
                <button type="button" class="btn btn-reset btn-sm" onclick={reset_filters}>
                    { common::RESET }
                </button>
            </section>
            <section class="settings-section">
                <h3>
                    { t::POST_DEFAULTS }
                    <span class="defaults-status">{ board.0.post_defaults.status().label() }</span>
                </h3>
                { for Dimension::ALL.into_iter().map(default_select) }
                <button type="button" class="btn btn-reset btn-sm" onclick={reset_defaults}>
                    { common::RESET }
                </button>
            </section>
            <section class="settings-section">
                <label>
                    { t::NICKNAME }
                    <input type="text" value={(*nickname).clone()} oninput={on_nickname} />
                </label>
                <button type="button" class="btn btn-primary" disabled={*saving} onclick={save_profile}>
                    { t::SAVE_PROFILE }
                </button>
            </section>
            <button type="button" class="btn btn-reset logout-button" onclick={logout}>{ t::LOGOUT }</button>
        </main>
    }
}

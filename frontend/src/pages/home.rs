use overseas_board_shared::{
    board::{compose_view, reduce, BoardEvent, BoardState},
    BoardError, Dimension, FilterSummary, LikeStateCache, Post, PostDraft, SortMode, TypeMatching,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::{
    api,
    components::{
        error_banner::ErrorBanner,
        loading_spinner::LoadingSpinner,
        post_card::PostCard,
        post_form::PostForm,
        session_notice::SessionExpiredNotice,
    },
    i18n::current::{home as t, post_form as form_text},
    pages::report_failure,
    state::{BoardStore, LikeAction, LikeStore},
};

/// Persist the view filters after applying `event`, then dispatch it.
fn dispatch_and_save(board: &UseReducerHandle<BoardStore>, event: BoardEvent) {
    let next = reduce(board.0.clone(), event.clone());
    if let Err(err) = api::client()
        .preferences()
        .save(&next.selection, &next.post_defaults)
    {
        console::warn_1(&format!("Failed to save preferences: {err}").into());
    }
    board.dispatch(event);
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let navigator = use_navigator();
    let board = use_reducer(|| {
        let client = api::client();
        BoardStore(BoardState::restore(client.preferences().load(), client.session()))
    });
    let posts = use_state(Vec::<Post>::new);
    let likes = use_reducer(LikeStore::default);
    let viewer_id = use_state(|| None::<i64>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);
    let show_form = use_state(|| false);
    let submitting = use_state(|| false);

    // Posts are shown only after the like refresh has settled.
    {
        let board = board.clone();
        let posts = posts.clone();
        let likes = likes.clone();
        let viewer_id = viewer_id.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            spawn_local(async move {
                let client = api::client();
                let was_signed_in = client.session().is_authenticated();
                let mut cache = LikeStateCache::new();
                match client.load_posts(&mut cache).await {
                    Ok(list) => {
                        posts.set(list);
                        likes.dispatch(LikeAction::Loaded(cache));
                    },
                    Err(err) => {
                        console::error_1(&format!("Failed to load posts: {err}").into());
                        error.set(Some(err.user_message(t::LOAD_FAILED)));
                    },
                }
                if was_signed_in {
                    viewer_id.set(client.current_user().await.ok().map(|profile| profile.id));
                    if !client.session().is_authenticated() {
                        board.dispatch(BoardEvent::SessionExpired);
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_like = {
        let likes = likes.clone();
        let error = error.clone();
        let board = board.clone();
        let navigator = navigator.clone();
        Callback::from(move |post_id: i64| {
            let likes = likes.clone();
            let error = error.clone();
            let board = board.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let mut cache = likes.0.clone();
                match api::client().toggle_like(&mut cache, post_id).await {
                    Ok(status) => likes.dispatch(LikeAction::Confirmed {
                        post_id,
                        status,
                    }),
                    Err(err) => {
                        if err.is_auth() {
                            board.dispatch(BoardEvent::SessionExpired);
                        }
                        report_failure(&err, t::LIKE_FAILED, &error, navigator.as_ref());
                    },
                }
            });
        })
    };

    let on_delete = {
        let reload = reload.clone();
        let error = error.clone();
        let navigator = navigator.clone();
        Callback::from(move |post_id: i64| {
            let reload = reload.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match api::client().delete_post(post_id).await {
                    Ok(()) => reload.set(*reload + 1),
                    Err(err) => report_failure(&err, t::DELETE_FAILED, &error, navigator.as_ref()),
                }
            });
        })
    };

    let on_submit = {
        let reload = reload.clone();
        let error = error.clone();
        let show_form = show_form.clone();
        let submitting = submitting.clone();
        let navigator = navigator.clone();
        Callback::from(move |draft: PostDraft| {
            let reload = reload.clone();
            let error = error.clone();
            let show_form = show_form.clone();
            let submitting = submitting.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            spawn_local(async move {
                match api::client().submit_post(&draft).await {
                    Ok(post) => {
                        console::log_1(&format!("created post #{}", post.id).into());
                        show_form.set(false);
                        reload.set(*reload + 1);
                    },
                    Err(err @ BoardError::Validation(_)) => error.set(Some(err.to_string())),
                    Err(err) => report_failure(&err, form_text::SUBMIT_FAILED, &error, navigator.as_ref()),
                }
                submitting.set(false);
            });
        })
    };

    let open_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| show_form.set(true))
    };
    let close_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: ()| show_form.set(false))
    };

    let on_sort = {
        let board = board.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(mode) = target.value().parse::<SortMode>() {
                    board.dispatch(BoardEvent::SetSort(mode));
                }
            }
        })
    };

    let clear_filters = {
        let board = board.clone();
        Callback::from(move |_: MouseEvent| dispatch_and_save(&board, BoardEvent::ResetFilters))
    };

    let clear_error = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let state = &board.0;
    let summary = FilterSummary::of(&state.selection);
    let chips = summary.chips.iter().map(|(dimension, code, label)| {
        let onclick = {
            let board = board.clone();
            let event = BoardEvent::ToggleFilter {
                dimension: *dimension,
                code: code.clone(),
            };
            Callback::from(move |_: MouseEvent| dispatch_and_save(&board, event.clone()))
        };
        let class = match dimension {
            Dimension::Country => "active-tag tag-country",
            Dimension::Type => "active-tag tag-type",
            Dimension::Industry => "active-tag tag-industry",
        };
        html! {
            <button type="button" {class} {onclick}>{ format!("{label} ×") }</button>
        }
    });

    let sort_options = SortMode::ALL.iter().map(|mode| {
        html! {
            <option value={mode.as_str()} selected={*mode == state.sort}>{ mode.label() }</option>
        }
    });

    let views = compose_view(&posts, state, &likes.0, *viewer_id, TypeMatching::default());
    let list = if *loading {
        html! { <LoadingSpinner /> }
    } else if views.is_empty() {
        html! { <p class="no-posts">{ t::EMPTY }</p> }
    } else {
        html! {
            { for views.into_iter().map(|view| {
                let key = view.post.id;
                html! {
                    <PostCard
                        key={key}
                        view={view}
                        on_like={on_like.clone()}
                        on_delete={Some(on_delete.clone())}
                    />
                }
            }) }
        }
    };

    html! {
        <main class={classes!("container", "mt-[var(--header-height-desktop)]", "pb-20")}>
            if let Some(message) = (*error).clone() {
                <ErrorBanner message={message} on_close={clear_error} />
            }
            if state.needs_login() {
                <SessionExpiredNotice />
            }
            <section class="filter-status">
                <p class="filter-message">{ summary.message() }</p>
                <div class="active-filter-tags">
                    { for chips }
                </div>
                if summary.total > 0 {
                    <button type="button" class="btn btn-reset btn-sm" onclick={clear_filters}>
                        { t::CLEAR_FILTERS }
                    </button>
                }
            </section>
            <div class="list-toolbar">
                <label>
                    { t::SORT_LABEL }
                    <select onchange={on_sort}>
                        { for sort_options }
                    </select>
                </label>
                <button type="button" class="btn btn-primary" onclick={open_form}>{ t::NEW_POST }</button>
            </div>
            <div class="posts">
                { list }
            </div>
            if *show_form {
                <PostForm
                    default_type={state.post_defaults.knowledge_type.clone()}
                    on_submit={on_submit}
                    on_close={close_form}
                    busy={*submitting}
                />
            }
        </main>
    }
}

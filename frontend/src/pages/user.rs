use overseas_board_shared::{
    board::{compose_view, BoardState},
    LikeStateCache, Post, TypeMatching,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::console;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::{
    api,
    components::{
        error_banner::ErrorBanner,
        loading_spinner::LoadingSpinner,
        post_card::PostCard,
        session_notice::SessionExpiredNotice,
    },
    i18n::{
        current::{home as home_text, user as t},
        fill_one,
    },
    pages::report_failure,
    state::{LikeAction, LikeStore},
};

#[derive(Properties, Clone, PartialEq)]
pub struct UserPageProps {
    pub id: i64,
}

/// Posts of one author, newest first, unfiltered.
#[function_component(UserPage)]
pub fn user_page(props: &UserPageProps) -> Html {
    let author_id = props.id;
    let navigator = use_navigator();
    let posts = use_state(Vec::<Post>::new);
    let likes = use_reducer(LikeStore::default);
    let viewer_id = use_state(|| None::<i64>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);
    let session_expired = use_state(|| false);

    {
        let posts = posts.clone();
        let likes = likes.clone();
        let viewer_id = viewer_id.clone();
        let loading = loading.clone();
        let error = error.clone();
        let session_expired = session_expired.clone();
        use_effect_with((author_id, *reload), move |(author_id, _)| {
            let author_id = *author_id;
            loading.set(true);
            spawn_local(async move {
                let client = api::client();
                let was_signed_in = client.session().is_authenticated();
                let mut cache = LikeStateCache::new();
                match client.user_posts(author_id, &mut cache).await {
                    Ok(list) => {
                        posts.set(list);
                        likes.dispatch(LikeAction::Loaded(cache));
                    },
                    Err(err) => {
                        console::error_1(&format!("Failed to load posts of user {author_id}: {err}").into());
                        error.set(Some(err.user_message(home_text::LOAD_FAILED)));
                    },
                }
                if was_signed_in {
                    viewer_id.set(client.current_user().await.ok().map(|profile| profile.id));
                    // The like refresh or the profile call may have dropped the token.
                    if !client.session().is_authenticated() {
                        session_expired.set(true);
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
        let session_expired = session_expired.clone();
        let navigator = navigator.clone();
        Callback::from(move |post_id: i64| {
            let likes = likes.clone();
            let error = error.clone();
            let session_expired = session_expired.clone();
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
                            session_expired.set(true);
                        }
                        report_failure(&err, home_text::LIKE_FAILED, &error, navigator.as_ref());
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
                    Err(err) => report_failure(&err, home_text::DELETE_FAILED, &error, navigator.as_ref()),
                }
            });
        })
    };

    let clear_error = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let name = posts
        .first()
        .map(|post| post.display_author().to_string())
        .unwrap_or_else(|| t::FALLBACK_NAME.to_string());

    // Default state: no filters, latest first.
    let views = compose_view(&posts, &BoardState::default(), &likes.0, *viewer_id, TypeMatching::default());
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
        <main class="container user-page">
            if let Some(message) = (*error).clone() {
                <ErrorBanner message={message} on_close={clear_error} />
            }
            if *session_expired {
                <SessionExpiredNotice />
            }
            <h2>{ fill_one(t::TITLE_TEMPLATE, name) }</h2>
            <div class="posts">
                { list }
            </div>
        </main>
    }
}

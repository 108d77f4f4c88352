use overseas_board_shared::PostView;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{i18n::current::post_card as t, router::Route};

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub view: PostView,
    pub on_like: Callback<i64>,
    /// Only wired for the viewer's own posts.
    #[prop_or_default]
    pub on_delete: Option<Callback<i64>>,
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let view = &props.view;
    let post_id = view.post.id;

    let on_like = {
        let on_like = props.on_like.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_like.emit(post_id);
        })
    };

    let delete_button = match (&props.on_delete, view.is_own) {
        (Some(on_delete), true) => {
            let on_delete = on_delete.clone();
            let onclick = Callback::from(move |event: MouseEvent| {
                event.prevent_default();
                let confirmed = web_sys::window()
                    .and_then(|win| win.confirm_with_message(t::DELETE_CONFIRM).ok())
                    .unwrap_or(false);
                if confirmed {
                    on_delete.emit(post_id);
                }
            });
            html! {
                <button type="button" class="btn btn-reset btn-sm post-delete" {onclick}>
                    { t::DELETE }
                </button>
            }
        },
        _ => Html::default(),
    };

    let date = view.date_label();

    html! {
        <article class={classes!("post-card", view.is_own.then_some("post-card-own"))}>
            <div class="post-header-row">
                <div class="post-author-line">
                    <Link<Route> to={Route::User { id: view.post.author_id }} classes="post-author">
                        { view.author().to_string() }
                    </Link<Route>>
                    if view.is_own {
                        <span class="post-own-badge">{ t::OWN_BADGE }</span>
                    }
                    if !date.is_empty() {
                        <span class="post-date">{ date.clone() }</span>
                    }
                </div>
                { delete_button }
            </div>
            <h3 class="post-title">{ view.post.title.clone() }</h3>
            <p class="post-content">{ view.post.content.clone() }</p>
            <div class="post-meta">
                <span class="meta-tag meta-country">{ format!("🌏 {}", view.post.country_region) }</span>
                <span class="meta-tag meta-industry">{ format!("💼 {}", view.post.industry_job) }</span>
                <span class="meta-tag meta-type">{ format!("📋 {}", view.post.knowledge_type) }</span>
            </div>
            <div class="post-footer">
                <button
                    type="button"
                    class={classes!("btn", "btn-reset", "btn-sm", "like-button", view.liked.then_some("liked"))}
                    aria-label={t::LIKE_ARIA}
                    aria-pressed={view.liked.to_string()}
                    onclick={on_like}
                >
                    { format!("❤️ {}", view.likes_count) }
                </button>
            </div>
        </article>
    }
}

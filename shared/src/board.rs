//! Board state and its reducer. UI adapters translate input into
//! [`BoardEvent`]s and render whatever [`compose_view`] returns.

use crate::{
    filter::{filter_posts, FilterSelection, TypeMatching},
    labels::Dimension,
    like_state::LikeStateCache,
    models::{Post, PostView},
    preferences::{PostDefaults, Preferences},
    session::Session,
    sort::{sort_posts, SortMode},
};

/// Everything the list view depends on besides the posts themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    /// Active view filters.
    pub selection: FilterSelection,
    /// Preselections for the new-post form and the profile.
    pub post_defaults: PostDefaults,
    /// Current list order; not persisted.
    pub sort: SortMode,
    /// Identity the view was built for.
    pub session: Session,
    /// The backend rejected our token; prompt for a new login.
    pub session_expired: bool,
}

impl BoardState {
    /// Initial state from restored preferences and the stored session.
    pub fn restore(preferences: Preferences, session: Session) -> Self {
        Self {
            selection: preferences.selection,
            post_defaults: preferences.defaults,
            session,
            ..Self::default()
        }
    }

    /// Show the re-login prompt.
    pub fn needs_login(&self) -> bool {
        self.session_expired && !self.session.is_authenticated()
    }
}

/// User input and session changes the list view reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs, reason = "variant fields are named after what they carry")]
pub enum BoardEvent {
    /// Flip one filter chip.
    ToggleFilter { dimension: Dimension, code: String },
    /// Drop every view filter.
    ResetFilters,
    /// Choose a posting default; an empty code clears it.
    SetPostDefault { dimension: Dimension, code: String },
    /// Clear all posting defaults.
    ResetPostDefaults,
    /// Change the list order.
    SetSort(SortMode),
    /// A login or registration succeeded.
    SignedIn { token: String },
    /// The user logged out.
    SignedOut,
    /// The backend rejected the token.
    SessionExpired,
}

/// Apply one event. Pure: persistence is the caller's job.
pub fn reduce(mut state: BoardState, event: BoardEvent) -> BoardState {
    match event {
        BoardEvent::ToggleFilter {
            dimension,
            code,
        } => {
            state.selection.toggle(dimension, &code);
        },
        BoardEvent::ResetFilters => state.selection.clear(),
        BoardEvent::SetPostDefault {
            dimension,
            code,
        } => state.post_defaults.set(dimension, &code),
        BoardEvent::ResetPostDefaults => state.post_defaults = PostDefaults::default(),
        BoardEvent::SetSort(mode) => state.sort = mode,
        BoardEvent::SignedIn {
            token,
        } => {
            state.session = Session::Authenticated {
                token,
            };
            state.session_expired = false;
        },
        BoardEvent::SignedOut => {
            state.session = Session::Anonymous;
            state.session_expired = false;
        },
        BoardEvent::SessionExpired => {
            state.session = Session::Anonymous;
            state.session_expired = true;
        },
    }
    state
}

/// Filter, sort and annotate `posts` for rendering. Counts from the like
/// cache override the posts' own counts before sorting so that `popular`
/// agrees with what is displayed.
pub fn compose_view(
    posts: &[Post],
    state: &BoardState,
    likes: &LikeStateCache,
    viewer_id: Option<i64>,
    type_matching: TypeMatching,
) -> Vec<PostView> {
    let mut posts = posts.to_vec();
    likes.apply_counts(&mut posts);
    let filtered = filter_posts(&posts, &state.selection, type_matching);
    sort_posts(&filtered, state.sort)
        .into_iter()
        .map(|post| PostView {
            liked: likes.is_liked(post.id),
            likes_count: post.likes_count,
            is_own: viewer_id == Some(post.author_id),
            post,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::LikeStatus,
        test_support::{post, FakeApi, VALID_TOKEN},
    };

    fn toggle(dimension: Dimension, code: &str) -> BoardEvent {
        BoardEvent::ToggleFilter {
            dimension,
            code: code.to_string(),
        }
    }

    #[test]
    fn filter_events_toggle_and_reset() {
        let state = [toggle(Dimension::Country, "usa"), toggle(Dimension::Industry, "it")]
            .into_iter()
            .fold(BoardState::default(), reduce);
        assert_eq!(state.selection.total(), 2);

        let state = reduce(state, toggle(Dimension::Country, "usa"));
        assert!(!state.selection.contains(Dimension::Country, "usa"));

        let state = reduce(state, BoardEvent::ResetFilters);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn defaults_and_sort_events() {
        let state = reduce(
            BoardState::default(),
            BoardEvent::SetPostDefault {
                dimension: Dimension::Type,
                code: "visa".to_string(),
            },
        );
        assert_eq!(state.post_defaults.knowledge_type, "visa");
        let state = reduce(state, BoardEvent::SetSort(SortMode::Popular));
        assert_eq!(state.sort, SortMode::Popular);
        let state = reduce(state, BoardEvent::ResetPostDefaults);
        assert_eq!(state.post_defaults, PostDefaults::default());
    }

    #[test]
    fn expiry_prompts_for_login_until_signed_in() {
        let state = reduce(
            BoardState::default(),
            BoardEvent::SignedIn {
                token: "t".to_string(),
            },
        );
        assert!(state.session.is_authenticated());
        assert!(!state.needs_login());

        let state = reduce(state, BoardEvent::SessionExpired);
        assert!(state.needs_login());
        assert_eq!(state.session, Session::Anonymous);

        let state = reduce(state, BoardEvent::SignedOut);
        assert!(!state.needs_login());
    }

    #[tokio::test]
    async fn composed_view_uses_cached_likes_and_marks_own_posts() {
        let posts = vec![post(1, 7, 1), post(2, 8, 3), post(3, 7, 2)];
        let api = FakeApi::with_posts(posts.clone());
        api.likes.borrow_mut().insert(
            1,
            LikeStatus {
                liked: true,
                likes_count: 1,
            },
        );
        api.posts.borrow_mut()[0].likes_count = 10;

        let mut likes = LikeStateCache::new();
        likes.refresh(&api, VALID_TOKEN, &posts, 4).await;

        let state = BoardState {
            sort: SortMode::Popular,
            ..BoardState::default()
        };
        let view = compose_view(&posts, &state, &likes, Some(7), TypeMatching::RawCode);
        let summary: Vec<(i64, bool, u64, bool)> = view
            .iter()
            .map(|item| (item.post.id, item.liked, item.likes_count, item.is_own))
            .collect();
        assert_eq!(summary, vec![(1, true, 10, true), (2, false, 3, false), (3, false, 2, true)]);
        assert_eq!(view[0].author(), "匿名");
    }

    #[test]
    fn composed_view_applies_filters() {
        let mut posts = vec![post(1, 7, 0), post(2, 7, 0)];
        posts[1].country_region = "アメリカ合衆国".to_string();
        let state = reduce(BoardState::default(), toggle(Dimension::Country, "usa"));
        let view = compose_view(&posts, &state, &LikeStateCache::new(), None, TypeMatching::RawCode);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].post.id, 2);
        assert!(!view[0].is_own);
    }
}

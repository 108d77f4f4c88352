//! The board client both front ends drive: one backend, one key-value store,
//! and the session, preference and like-state logic wired between them.

use crate::{
    api::BoardApi,
    error::BoardResult,
    like_state::{LikeStateCache, DEFAULT_REFRESH_CONCURRENCY},
    models::{LikeStatus, Post, PostDraft, Profile, ProfileUpdate},
    preferences::{KeyValueStore, LegacyFilterStore, PostDefaults, PreferenceStore},
    session::{AuthSession, Session},
};

/// Facade over one backend and one key-value store. Cheap to build; all
/// durable state lives in the store.
pub struct BoardClient<A, S> {
    api: A,
    auth: AuthSession<S>,
    preferences: PreferenceStore<S>,
    legacy_filters: LegacyFilterStore<S>,
    like_concurrency: usize,
}

impl<A, S> BoardClient<A, S>
where
    A: BoardApi,
    S: KeyValueStore + Clone,
{
    /// Client with the default like fan-out.
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            auth: AuthSession::new(store.clone()),
            preferences: PreferenceStore::new(store.clone()),
            legacy_filters: LegacyFilterStore::new(store),
            like_concurrency: DEFAULT_REFRESH_CONCURRENCY,
        }
    }

    /// Cap on like-status queries in flight during a refresh.
    pub fn with_like_concurrency(mut self, limit: usize) -> Self {
        self.like_concurrency = limit.max(1);
        self
    }

    /// The backend adapter.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Session handling over the shared store.
    pub fn auth(&self) -> &AuthSession<S> {
        &self.auth
    }

    /// Current session, re-read from the store.
    pub fn session(&self) -> Session {
        self.auth.session()
    }

    /// Settings document (view filters, posting defaults, nickname).
    pub fn preferences(&self) -> &PreferenceStore<S> {
        &self.preferences
    }

    /// Document of the standalone filter page.
    pub fn legacy_filters(&self) -> &LegacyFilterStore<S> {
        &self.legacy_filters
    }

    /// Sign in and store the token.
    pub async fn login(&self, email: &str, password: &str) -> BoardResult<Session> {
        self.auth.login(&self.api, email, password).await
    }

    /// Create an account and sign in with it.
    pub async fn register(&self, email: &str, password: &str) -> BoardResult<Session> {
        self.auth.register(&self.api, email, password).await
    }

    /// Drop the stored token.
    pub fn logout(&self) {
        self.auth.logout();
    }

    /// Profile of the signed-in user; a rejected token ends the session.
    pub async fn current_user(&self) -> BoardResult<Profile> {
        self.auth.current_user(&self.api).await
    }

    /// Fetch every post and, when signed in, refresh `likes` for them. The
    /// refresh settles completely before this returns.
    pub async fn load_posts(&self, likes: &mut LikeStateCache) -> BoardResult<Vec<Post>> {
        let posts = self.api.list_posts().await?;
        self.refresh_likes(likes, &posts).await;
        Ok(posts)
    }

    /// Posts written by `author_id`, with their like state.
    pub async fn user_posts(&self, author_id: i64, likes: &mut LikeStateCache) -> BoardResult<Vec<Post>> {
        let posts: Vec<Post> = self
            .api
            .list_posts()
            .await?
            .into_iter()
            .filter(|post| post.author_id == author_id)
            .collect();
        self.refresh_likes(likes, &posts).await;
        Ok(posts)
    }

    async fn refresh_likes(&self, likes: &mut LikeStateCache, posts: &[Post]) {
        likes.clear();
        let Session::Authenticated {
            token,
        } = self.auth.session()
        else {
            return;
        };
        let report = likes
            .refresh(&self.api, &token, posts, self.like_concurrency)
            .await;
        tracing::debug!(
            updated = report.updated,
            failed = report.failed,
            "like state refreshed"
        );
        if report.unauthorized {
            self.auth.expire();
        }
    }

    /// Validate the draft, then create the post.
    pub async fn submit_post(&self, draft: &PostDraft) -> BoardResult<Post> {
        let new_post = draft.validate()?;
        let token = self.auth.require_token()?;
        self.auth
            .guard(self.api.create_post(&token, &new_post).await)
    }

    /// Delete one of the viewer's posts.
    pub async fn delete_post(&self, post_id: i64) -> BoardResult<()> {
        let token = self.auth.require_token()?;
        self.auth.guard(self.api.delete_post(&token, post_id).await)
    }

    /// Ask the backend for one post's like status and cache it.
    pub async fn like_status(&self, likes: &mut LikeStateCache, post_id: i64) -> BoardResult<LikeStatus> {
        let token = self.auth.require_token()?;
        let status = self
            .auth
            .guard(self.api.like_status(&token, post_id).await)?;
        likes.record(post_id, status);
        Ok(status)
    }

    /// Like or unlike one post according to `likes`, storing the server's
    /// answer there.
    pub async fn toggle_like(&self, likes: &mut LikeStateCache, post_id: i64) -> BoardResult<LikeStatus> {
        let token = self.auth.require_token()?;
        self.auth
            .guard(likes.toggle(&self.api, &token, post_id).await)
    }

    /// Send the posting defaults as the profile's country and industry. A
    /// nickname that was sent is remembered locally.
    pub async fn update_profile(&self, nickname: Option<&str>, defaults: &PostDefaults) -> BoardResult<Profile> {
        let update = ProfileUpdate::from_defaults(nickname, defaults)?;
        let token = self.auth.require_token()?;
        let profile = self
            .auth
            .guard(self.api.update_profile(&token, &update).await)?;
        if let Some(nickname) = &update.nickname {
            self.preferences.remember_nickname(nickname)?;
        }
        Ok(profile)
    }
}

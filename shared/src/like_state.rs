//! Like-State Cache: this user's like flag per post, plus the authoritative
//! count the backend returned with it. Never persisted.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};

use crate::{
    api::BoardApi,
    error::{BoardError, BoardResult},
    models::{LikeStatus, Post},
};

/// Default number of like-status queries in flight during a refresh.
pub const DEFAULT_REFRESH_CONCURRENCY: usize = 8;

/// Outcome of a bulk refresh. Failed posts are left absent from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Posts whose status arrived.
    pub updated: usize,
    /// Posts whose query failed; their entries were dropped.
    pub failed: usize,
    /// At least one query was rejected for the token; the caller should end
    /// the session.
    pub unauthorized: bool,
}

/// Like status per post id, as last reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeStateCache {
    entries: HashMap<i64, LikeStatus>,
}

impl LikeStateCache {
    /// Empty cache: every post reads as not liked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Query the like status of every post, at most `concurrency` at a time.
    ///
    /// Every query settles before this returns. One post failing never
    /// aborts the others; its entry is dropped so the renderer falls back to
    /// "not liked" and the post's own count.
    pub async fn refresh<A>(&mut self, api: &A, token: &str, posts: &[Post], concurrency: usize) -> RefreshReport
    where
        A: BoardApi + ?Sized,
    {
        let results: Vec<(i64, BoardResult<LikeStatus>)> = stream::iter(posts.iter().map(|post| post.id))
            .map(|post_id| async move { (post_id, api.like_status(token, post_id).await) })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut report = RefreshReport::default();
        for (post_id, result) in results {
            match result {
                Ok(status) => {
                    self.entries.insert(post_id, status);
                    report.updated += 1;
                },
                Err(err) => {
                    tracing::debug!(post_id, "like status query failed: {err}");
                    self.entries.remove(&post_id);
                    report.failed += 1;
                    report.unauthorized |= matches!(err, BoardError::Unauthorized);
                },
            }
        }
        report
    }

    /// Like or unlike depending on the current belief, then store the
    /// server's answer. On failure the cache is left untouched.
    pub async fn toggle<A>(&mut self, api: &A, token: &str, post_id: i64) -> BoardResult<LikeStatus>
    where
        A: BoardApi + ?Sized,
    {
        let status = if self.is_liked(post_id) {
            api.unlike(token, post_id).await?
        } else {
            api.like(token, post_id).await?
        };
        self.entries.insert(post_id, status);
        Ok(status)
    }

    /// Store one status confirmed by the backend, leaving every other entry
    /// as it is. Used to merge the outcome of a toggle that ran against an
    /// older copy of the cache.
    pub fn record(&mut self, post_id: i64, status: LikeStatus) {
        self.entries.insert(post_id, status);
    }

    /// Cached status of one post.
    pub fn get(&self, post_id: i64) -> Option<LikeStatus> {
        self.entries.get(&post_id).copied()
    }

    /// Absent entries read as "not liked".
    pub fn is_liked(&self, post_id: i64) -> bool {
        self.entries.get(&post_id).is_some_and(|status| status.liked)
    }

    /// Cached count, or `fallback` (the post's own count) when unknown.
    pub fn likes_count(&self, post_id: i64, fallback: u64) -> u64 {
        self.entries
            .get(&post_id)
            .map_or(fallback, |status| status.likes_count)
    }

    /// Overwrite each post's count with the cached authoritative one.
    pub fn apply_counts(&self, posts: &mut [Post]) {
        for post in posts {
            post.likes_count = self.likes_count(post.id, post.likes_count);
        }
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of posts with a known status.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No post has a known status.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, FakeApi, VALID_TOKEN};

    #[tokio::test]
    async fn toggle_on_unliked_post_creates_like_with_server_count() {
        let api = FakeApi::with_posts(vec![post(1, 2, 41)]);
        let mut cache = LikeStateCache::new();

        let status = cache.toggle(&api, VALID_TOKEN, 1).await.expect("like");
        assert_eq!(api.calls(), vec!["like 1".to_string()]);
        assert!(status.liked);
        assert!(cache.is_liked(1));
        assert_eq!(cache.likes_count(1, 0), 42);

        // Another user liked it in the meantime: the count follows the server.
        api.posts.borrow_mut()[0].likes_count = 50;
        let status = cache.toggle(&api, VALID_TOKEN, 1).await.expect("unlike");
        assert!(!status.liked);
        assert_eq!(cache.likes_count(1, 0), 49);
        assert_eq!(api.calls_starting_with("unlike"), 1);
    }

    #[tokio::test]
    async fn failed_toggle_leaves_cache_unchanged() {
        let api = FakeApi::with_posts(vec![post(1, 2, 3)]);
        let mut cache = LikeStateCache::new();
        let before = cache.clone();
        let err = cache.toggle(&api, VALID_TOKEN, 99).await.expect_err("missing post");
        assert!(matches!(err, BoardError::Server { status: 404, .. }));
        assert_eq!(cache, before);
    }

    #[tokio::test]
    async fn refresh_isolates_per_post_failures() {
        let api = FakeApi::with_posts(vec![post(1, 2, 3), post(2, 2, 7), post(3, 2, 0)]);
        api.likes.borrow_mut().insert(
            2,
            LikeStatus {
                liked: true,
                likes_count: 7,
            },
        );
        api.failing.borrow_mut().insert(3);

        let mut cache = LikeStateCache::new();
        let posts = api.posts.borrow().clone();
        let report = cache.refresh(&api, VALID_TOKEN, &posts, 2).await;

        assert_eq!(
            report,
            RefreshReport {
                updated: 2,
                failed: 1,
                unauthorized: false,
            }
        );
        assert!(cache.is_liked(2));
        assert!(!cache.is_liked(1));
        assert_eq!(cache.get(3), None);
        assert_eq!(cache.likes_count(3, 11), 11);
        assert_eq!(api.calls_starting_with("like_status"), 3);
    }

    #[tokio::test]
    async fn refresh_with_rejected_token_reports_unauthorized() {
        let api = FakeApi::with_posts(vec![post(1, 2, 3)]);
        api.token_valid.set(false);
        let mut cache = LikeStateCache::new();
        let posts = api.posts.borrow().clone();
        let report = cache.refresh(&api, VALID_TOKEN, &posts, 0).await;
        assert!(report.unauthorized);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn overlapping_toggles_on_different_posts_both_stick() {
        let api = FakeApi::with_posts(vec![post(1, 2, 0), post(2, 2, 5)]);
        let shared = LikeStateCache::new();

        // Two clicks start from the same rendered cache.
        let mut first = shared.clone();
        let mut second = shared.clone();
        let liked_one = first.toggle(&api, VALID_TOKEN, 1).await.expect("like 1");
        let liked_two = second.toggle(&api, VALID_TOKEN, 2).await.expect("like 2");

        let mut merged = shared;
        merged.record(1, liked_one);
        merged.record(2, liked_two);
        assert!(merged.is_liked(1));
        assert!(merged.is_liked(2));
        assert_eq!(merged.likes_count(2, 0), 6);

        // The next click on post 1 removes the like instead of adding another.
        merged.toggle(&api, VALID_TOKEN, 1).await.expect("unlike 1");
        assert_eq!(api.calls_starting_with("unlike"), 1);
        assert!(!merged.is_liked(1));
    }

    #[test]
    fn apply_counts_prefers_cached_values() {
        let mut cache = LikeStateCache::new();
        cache.entries.insert(
            1,
            LikeStatus {
                liked: false,
                likes_count: 9,
            },
        );
        let mut posts = vec![post(1, 2, 3), post(2, 2, 4)];
        cache.apply_counts(&mut posts);
        assert_eq!(posts.iter().map(|post| post.likes_count).collect::<Vec<_>>(), vec![9, 4]);
    }
}

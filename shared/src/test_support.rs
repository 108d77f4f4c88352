//! In-memory backend used by the engine tests.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
};

use async_trait::async_trait;

use crate::{
    api::{error_from_response, BoardApi},
    error::{BoardError, BoardResult},
    models::{Credentials, LikeStatus, NewPost, Post, Profile, ProfileUpdate, TokenResponse},
};

pub(crate) const VALID_TOKEN: &str = "token-1";

pub(crate) fn post(id: i64, author_id: i64, likes_count: u64) -> Post {
    Post {
        id,
        title: format!("post {id}"),
        content: "body".to_string(),
        country_region: "カナダ".to_string(),
        industry_job: "金融".to_string(),
        knowledge_type: "ビザ".to_string(),
        author_id,
        author_nickname: None,
        created_at: Some(format!("2024-01-{:02}T00:00:00Z", id.clamp(1, 28))),
        likes_count,
    }
}

/// Records every call; rejects any token other than [`VALID_TOKEN`].
pub(crate) struct FakeApi {
    pub posts: RefCell<Vec<Post>>,
    pub likes: RefCell<HashMap<i64, LikeStatus>>,
    pub failing: RefCell<HashSet<i64>>,
    pub users: RefCell<HashMap<String, String>>,
    pub profile: RefCell<Profile>,
    pub calls: RefCell<Vec<String>>,
    pub token_valid: Cell<bool>,
    next_id: Cell<i64>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            posts: RefCell::default(),
            likes: RefCell::default(),
            failing: RefCell::default(),
            users: RefCell::new(HashMap::from([("a@b.c".to_string(), "pw".to_string())])),
            profile: RefCell::new(Profile {
                id: 1,
                email: "a@b.c".to_string(),
                nickname: None,
                country_region: None,
                industry_job: None,
            }),
            calls: RefCell::default(),
            token_valid: Cell::new(true),
            next_id: Cell::new(100),
        }
    }
}

impl FakeApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let api = Self::default();
        *api.posts.borrow_mut() = posts;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn authorize(&self, token: &str) -> BoardResult<()> {
        if token == VALID_TOKEN && self.token_valid.get() {
            Ok(())
        } else {
            Err(error_from_response(401, r#"{"detail":"Invalid token"}"#))
        }
    }

    fn set_like(&self, post_id: i64, liked: bool) -> BoardResult<LikeStatus> {
        let mut posts = self.posts.borrow_mut();
        let post = posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| error_from_response(404, r#"{"detail":"Post not found"}"#))?;
        let mut likes = self.likes.borrow_mut();
        let was_liked = likes.get(&post_id).is_some_and(|status| status.liked);
        if liked && !was_liked {
            post.likes_count += 1;
        } else if !liked && was_liked {
            post.likes_count = post.likes_count.saturating_sub(1);
        }
        let status = LikeStatus {
            liked,
            likes_count: post.likes_count,
        };
        likes.insert(post_id, status);
        Ok(status)
    }
}

#[async_trait(?Send)]
impl BoardApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> BoardResult<TokenResponse> {
        self.record(format!("login {}", credentials.email));
        match self.users.borrow().get(&credentials.email) {
            Some(password) if *password == credentials.password => Ok(TokenResponse {
                access_token: VALID_TOKEN.to_string(),
                token_type: Some("bearer".to_string()),
            }),
            _ => Err(error_from_response(401, r#"{"detail":"Invalid credentials"}"#)),
        }
    }

    async fn register(&self, credentials: &Credentials) -> BoardResult<TokenResponse> {
        self.record(format!("register {}", credentials.email));
        if self.users.borrow().contains_key(&credentials.email) {
            return Err(error_from_response(400, r#"{"detail":"Email already registered"}"#));
        }
        if !credentials.email.contains('@') {
            return Err(error_from_response(
                422,
                r#"{"detail":[{"msg":"value is not a valid email address"}]}"#,
            ));
        }
        self.users
            .borrow_mut()
            .insert(credentials.email.clone(), credentials.password.clone());
        Ok(TokenResponse {
            access_token: VALID_TOKEN.to_string(),
            token_type: None,
        })
    }

    async fn current_user(&self, token: &str) -> BoardResult<Profile> {
        self.record(format!("me {token}"));
        self.authorize(token)?;
        Ok(self.profile.borrow().clone())
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> BoardResult<Profile> {
        self.record(format!("update_profile {token}"));
        self.authorize(token)?;
        let mut profile = self.profile.borrow_mut();
        if update.nickname.is_some() {
            profile.nickname = update.nickname.clone();
        }
        profile.country_region = Some(update.country_region.clone());
        profile.industry_job = Some(update.industry_job.clone());
        Ok(profile.clone())
    }

    async fn list_posts(&self) -> BoardResult<Vec<Post>> {
        self.record("list_posts".to_string());
        Ok(self.posts.borrow().clone())
    }

    async fn create_post(&self, token: &str, post: &NewPost) -> BoardResult<Post> {
        self.record(format!("create_post {token}"));
        self.authorize(token)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = Post {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            knowledge_type: post.knowledge_type.clone(),
            ..crate::test_support::post(id, self.profile.borrow().id, 0)
        };
        self.posts.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn delete_post(&self, token: &str, post_id: i64) -> BoardResult<()> {
        self.record(format!("delete_post {post_id}"));
        self.authorize(token)?;
        let mut posts = self.posts.borrow_mut();
        let before = posts.len();
        posts.retain(|post| post.id != post_id);
        if posts.len() == before {
            return Err(error_from_response(404, r#"{"detail":"Post not found"}"#));
        }
        Ok(())
    }

    async fn like_status(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        self.record(format!("like_status {post_id}"));
        self.authorize(token)?;
        if self.failing.borrow().contains(&post_id) {
            return Err(BoardError::Network("connection reset".to_string()));
        }
        let likes_count = self
            .posts
            .borrow()
            .iter()
            .find(|post| post.id == post_id)
            .map(|post| post.likes_count)
            .unwrap_or_default();
        let liked = self
            .likes
            .borrow()
            .get(&post_id)
            .is_some_and(|status| status.liked);
        Ok(LikeStatus {
            liked,
            likes_count,
        })
    }

    async fn like(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        self.record(format!("like {post_id}"));
        self.authorize(token)?;
        self.set_like(post_id, true)
    }

    async fn unlike(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        self.record(format!("unlike {post_id}"));
        self.authorize(token)?;
        self.set_like(post_id, false)
    }
}

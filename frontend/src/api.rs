use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use overseas_board_shared::{
    api::{bearer, endpoints, parse_ack, parse_response, BoardApi},
    models::{Credentials, LikeStatus, NewPost, Post, Profile, ProfileUpdate, TokenResponse},
    BoardClient, BoardError, BoardResult,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::{API_BASE, LIKE_REFRESH_CONCURRENCY},
    storage::LocalStorage,
};

/// [`BoardApi`] over `fetch` (gloo-net).
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBoardApi;

fn url(path: &str) -> String {
    endpoints::url(API_BASE, path)
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &bearer(token))
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> BoardResult<Request> {
    builder
        .json(body)
        .map_err(|e| BoardError::Parse(format!("{:?}", e)))
}

async fn exchange(request: Request) -> BoardResult<(u16, String)> {
    let response = request
        .send()
        .await
        .map_err(|e| BoardError::Network(format!("{:?}", e)))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BoardError::Network(format!("{:?}", e)))?;
    Ok((status, body))
}

async fn fetch<T: DeserializeOwned>(request: Request) -> BoardResult<T> {
    let (status, body) = exchange(request).await?;
    parse_response(status, &body)
}

fn build(builder: RequestBuilder) -> BoardResult<Request> {
    builder
        .build()
        .map_err(|e| BoardError::Network(format!("{:?}", e)))
}

#[async_trait(?Send)]
impl BoardApi for HttpBoardApi {
    async fn login(&self, credentials: &Credentials) -> BoardResult<TokenResponse> {
        fetch(with_json(Request::post(&url(endpoints::LOGIN)), credentials)?).await
    }

    async fn register(&self, credentials: &Credentials) -> BoardResult<TokenResponse> {
        fetch(with_json(Request::post(&url(endpoints::REGISTER)), credentials)?).await
    }

    async fn current_user(&self, token: &str) -> BoardResult<Profile> {
        fetch(build(authorized(Request::get(&url(endpoints::ME)), token))?).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> BoardResult<Profile> {
        fetch(with_json(authorized(Request::patch(&url(endpoints::ME)), token), update)?).await
    }

    async fn list_posts(&self) -> BoardResult<Vec<Post>> {
        fetch(build(
            Request::get(&url(endpoints::POSTS))
                .header("Cache-Control", "no-cache, no-store, max-age=0")
                .header("Pragma", "no-cache"),
        )?)
        .await
    }

    async fn create_post(&self, token: &str, post: &NewPost) -> BoardResult<Post> {
        fetch(with_json(authorized(Request::post(&url(endpoints::POSTS)), token), post)?).await
    }

    async fn delete_post(&self, token: &str, post_id: i64) -> BoardResult<()> {
        let request = build(authorized(Request::delete(&url(&endpoints::post(post_id))), token))?;
        let (status, body) = exchange(request).await?;
        parse_ack(status, &body)
    }

    async fn like_status(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        fetch(build(authorized(Request::get(&url(&endpoints::post_like(post_id))), token))?).await
    }

    async fn like(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        fetch(build(authorized(Request::post(&url(&endpoints::post_like(post_id))), token))?).await
    }

    async fn unlike(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        fetch(build(authorized(Request::delete(&url(&endpoints::post_like(post_id))), token))?).await
    }
}

pub type Client = BoardClient<HttpBoardApi, LocalStorage>;

/// Fresh client over `fetch` and `localStorage`; cheap enough to build per
/// action.
pub fn client() -> Client {
    BoardClient::new(HttpBoardApi, LocalStorage).with_like_concurrency(LIKE_REFRESH_CONCURRENCY)
}

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use overseas_board_shared::{
    api::{bearer, endpoints, parse_ack, parse_response, BoardApi},
    models::{Credentials, LikeStatus, NewPost, Post, Profile, ProfileUpdate, TokenResponse},
    BoardError, BoardResult,
};
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// [`BoardApi`] over reqwest.
pub struct HttpBoardApi {
    client: Client,
    base: String,
}

impl HttpBoardApi {
    pub fn new(base: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        endpoints::url(&self.base, path)
    }

    async fn exchange(&self, request: RequestBuilder) -> BoardResult<(u16, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| BoardError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BoardError::Network(e.to_string()))?;
        tracing::debug!(status, "backend responded");
        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> BoardResult<T> {
        let (status, body) = self.exchange(request).await?;
        parse_response(status, &body)
    }
}

#[async_trait(?Send)]
impl BoardApi for HttpBoardApi {
    async fn login(&self, credentials: &Credentials) -> BoardResult<TokenResponse> {
        self.fetch(self.client.post(self.url(endpoints::LOGIN)).json(credentials))
            .await
    }

    async fn register(&self, credentials: &Credentials) -> BoardResult<TokenResponse> {
        self.fetch(self.client.post(self.url(endpoints::REGISTER)).json(credentials))
            .await
    }

    async fn current_user(&self, token: &str) -> BoardResult<Profile> {
        self.fetch(
            self.client
                .get(self.url(endpoints::ME))
                .header(AUTHORIZATION, bearer(token)),
        )
        .await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> BoardResult<Profile> {
        self.fetch(
            self.client
                .patch(self.url(endpoints::ME))
                .header(AUTHORIZATION, bearer(token))
                .json(update),
        )
        .await
    }

    async fn list_posts(&self) -> BoardResult<Vec<Post>> {
        self.fetch(self.client.get(self.url(endpoints::POSTS))).await
    }

    async fn create_post(&self, token: &str, post: &NewPost) -> BoardResult<Post> {
        self.fetch(
            self.client
                .post(self.url(endpoints::POSTS))
                .header(AUTHORIZATION, bearer(token))
                .json(post),
        )
        .await
    }

    async fn delete_post(&self, token: &str, post_id: i64) -> BoardResult<()> {
        let (status, body) = self
            .exchange(
                self.client
                    .delete(self.url(&endpoints::post(post_id)))
                    .header(AUTHORIZATION, bearer(token)),
            )
            .await?;
        parse_ack(status, &body)
    }

    async fn like_status(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        self.fetch(
            self.client
                .get(self.url(&endpoints::post_like(post_id)))
                .header(AUTHORIZATION, bearer(token)),
        )
        .await
    }

    async fn like(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        self.fetch(
            self.client
                .post(self.url(&endpoints::post_like(post_id)))
                .header(AUTHORIZATION, bearer(token)),
        )
        .await
    }

    async fn unlike(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus> {
        self.fetch(
            self.client
                .delete(self.url(&endpoints::post_like(post_id)))
                .header(AUTHORIZATION, bearer(token)),
        )
        .await
    }
}

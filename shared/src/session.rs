//! Auth Session: the bearer token kept in the key-value store.
//!
//! ```text
//! Anonymous --login/register--> Authenticated(token)
//! Authenticated --logout | Unauthorized--> Anonymous
//! ```

use crate::{
    api::BoardApi,
    error::{BoardError, BoardResult},
    models::{Credentials, Profile},
    preferences::KeyValueStore,
};

/// Key holding the raw token string.
pub const TOKEN_KEY: &str = "overseasJobAuthToken";

/// Identity state derived from the stored token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// No token stored.
    #[default]
    Anonymous,
    /// A token is stored; the backend may still reject it.
    Authenticated {
        /// Raw bearer token.
        token: String,
    },
}

impl Session {
    /// Bearer token, when signed in.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated {
                token,
            } => Some(token),
        }
    }

    /// Whether a token is stored.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Login, logout and token expiry over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct AuthSession<S> {
    store: S,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Session backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Current state, re-read from storage on every call.
    pub fn session(&self) -> Session {
        match self.store.get(TOKEN_KEY) {
            Some(token) if !token.trim().is_empty() => Session::Authenticated {
                token: token.trim().to_string(),
            },
            _ => Session::Anonymous,
        }
    }

    /// The token for a protected call. Anonymous sessions fail here, before
    /// any request is built.
    pub fn require_token(&self) -> BoardResult<String> {
        match self.session() {
            Session::Authenticated {
                token,
            } => Ok(token),
            Session::Anonymous => Err(BoardError::Unauthorized),
        }
    }

    /// Pass a protected call's result through, ending the session when the
    /// backend rejected the token.
    pub fn guard<T>(&self, result: BoardResult<T>) -> BoardResult<T> {
        if let Err(BoardError::Unauthorized) = &result {
            self.expire();
        }
        result
    }

    /// Drop a token the backend no longer accepts.
    pub fn expire(&self) {
        if self.session().is_authenticated() {
            tracing::info!("token rejected by the backend, ending session");
            self.store.remove(TOKEN_KEY);
        }
    }

    /// Exchange credentials for a token. A 401/403 means the pair was wrong.
    pub async fn login<A>(&self, api: &A, email: &str, password: &str) -> BoardResult<Session>
    where
        A: BoardApi + ?Sized,
    {
        let credentials = Credentials::new(email, password)?;
        let token = api
            .login(&credentials)
            .await
            .map_err(|err| match err {
                BoardError::Unauthorized => BoardError::InvalidCredentials,
                other => other,
            })?
            .into_token()?;
        self.start(token)
    }

    /// Create an account and keep its token. An "already registered" refusal
    /// becomes [`BoardError::EmailTaken`].
    pub async fn register<A>(&self, api: &A, email: &str, password: &str) -> BoardResult<Session>
    where
        A: BoardApi + ?Sized,
    {
        let credentials = Credentials::new(email, password)?;
        let token = api
            .register(&credentials)
            .await
            .map_err(|err| match err {
                BoardError::Server {
                    detail, ..
                } if detail.to_ascii_lowercase().contains("already registered") => BoardError::EmailTaken,
                other => other,
            })?
            .into_token()?;
        self.start(token)
    }

    fn start(&self, token: String) -> BoardResult<Session> {
        self.store.set(TOKEN_KEY, &token)?;
        tracing::info!("session started");
        Ok(Session::Authenticated {
            token,
        })
    }

    /// Fetch the signed-in profile. An anonymous session fails without a
    /// request; a rejected token is purged.
    pub async fn current_user<A>(&self, api: &A) -> BoardResult<Profile>
    where
        A: BoardApi + ?Sized,
    {
        let token = self.require_token()?;
        self.guard(api.current_user(&token).await)
    }

    /// Local purge only; the backend keeps no session.
    pub fn logout(&self) {
        self.store.remove(TOKEN_KEY);
        tracing::info!("signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        preferences::MemoryStore,
        test_support::{FakeApi, VALID_TOKEN},
    };

    fn session() -> (MemoryStore, AuthSession<MemoryStore>) {
        let store = MemoryStore::new();
        (store.clone(), AuthSession::new(store))
    }

    #[tokio::test]
    async fn login_persists_raw_token() {
        let (store, auth) = session();
        let api = FakeApi::default();
        let state = auth.login(&api, " a@b.c ", "pw").await.expect("login");
        assert_eq!(state.token(), Some(VALID_TOKEN));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some(VALID_TOKEN));
        assert!(auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (store, auth) = session();
        let api = FakeApi::default();
        let err = auth.login(&api, "a@b.c", "nope").await.expect_err("rejected");
        assert_eq!(err, BoardError::InvalidCredentials);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn blank_fields_never_reach_the_backend() {
        let (_, auth) = session();
        let api = FakeApi::default();
        assert!(matches!(auth.login(&api, "  ", "pw").await, Err(BoardError::Validation(_))));
        assert!(matches!(auth.register(&api, "x@y.z", "").await, Err(BoardError::Validation(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn register_classifies_backend_refusals() {
        let (_, auth) = session();
        let api = FakeApi::default();
        assert_eq!(auth.register(&api, "a@b.c", "pw").await, Err(BoardError::EmailTaken));
        assert!(matches!(auth.register(&api, "not-an-email", "pw").await, Err(BoardError::Validation(_))));
        assert!(auth.register(&api, "new@b.c", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn anonymous_current_user_makes_no_call() {
        let (_, auth) = session();
        let api = FakeApi::default();
        assert_eq!(auth.current_user(&api).await, Err(BoardError::Unauthorized));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn rejected_token_ends_session_and_stops_further_calls() {
        let (store, auth) = session();
        store.set(TOKEN_KEY, VALID_TOKEN).expect("seed token");
        let api = FakeApi::default();
        api.token_valid.set(false);

        assert_eq!(auth.current_user(&api).await, Err(BoardError::Unauthorized));
        assert_eq!(auth.session(), Session::Anonymous);
        assert_eq!(store.get(TOKEN_KEY), None);

        assert_eq!(auth.current_user(&api).await, Err(BoardError::Unauthorized));
        assert_eq!(auth.require_token(), Err(BoardError::Unauthorized));
        assert_eq!(api.calls_starting_with("me "), 1);
    }

    #[test]
    fn guard_keeps_session_on_other_errors() {
        let (store, auth) = session();
        store.set(TOKEN_KEY, VALID_TOKEN).expect("seed token");
        let result: BoardResult<()> = Err(BoardError::Network("offline".to_string()));
        assert!(auth.guard(result).is_err());
        assert!(auth.session().is_authenticated());

        auth.logout();
        assert_eq!(auth.session(), Session::Anonymous);
    }
}

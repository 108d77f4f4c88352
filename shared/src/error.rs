use thiserror::Error;

/// Every failure the board client can report.
///
/// Nothing is retried: each variant is either shown to the user or, for
/// storage corruption, silently replaced by defaults inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A required form field is missing; raised before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// Login rejected the email / password pair.
    #[error("メールアドレスまたはパスワードが正しくありません。")]
    InvalidCredentials,

    /// Registration hit an email that already has an account.
    #[error("このメールアドレスは既に登録されています。")]
    EmailTaken,

    /// Token missing, invalid or expired. The session must be ended.
    #[error("ログインしてください。")]
    Unauthorized,

    /// Non-2xx response; `detail` is shown verbatim.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the JSON we expected.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Writing to the local key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BoardError {
    /// Whether this error must end the current session.
    pub fn is_auth(&self) -> bool {
        matches!(self, BoardError::Unauthorized)
    }

    /// Message for the UI, falling back to `fallback` for errors whose own
    /// text is not meant for end users.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BoardError::Network(_) | BoardError::Parse(_) | BoardError::Storage(_) => {
                fallback.to_string()
            },
            other => other.to_string(),
        }
    }
}

/// Result alias used across the engine.
pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::BoardError;

    #[test]
    fn server_error_displays_detail_verbatim() {
        let err = BoardError::Server {
            status: 400,
            detail: "プロフィールを先に設定してください。".to_string(),
        };
        assert_eq!(err.to_string(), "プロフィールを先に設定してください。");
        assert_eq!(err.user_message("投稿に失敗しました。"), err.to_string());
    }

    #[test]
    fn transport_errors_use_the_fallback_message() {
        let err = BoardError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.user_message("投稿に失敗しました。"), "投稿に失敗しました。");
        assert!(!err.is_auth());
        assert!(BoardError::Unauthorized.is_auth());
    }
}

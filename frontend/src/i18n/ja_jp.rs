#![allow(dead_code, reason = "string table; not every page uses every entry")]

pub mod common {
    pub const APP_TITLE: &str = "海外知見ボード";
    pub const LOADING: &str = "読み込み中...";
    pub const SAVE: &str = "保存";
    pub const RESET: &str = "リセット";
    pub const CANCEL: &str = "キャンセル";
}

pub mod header {
    pub const HOME: &str = "投稿一覧";
    pub const FILTERS: &str = "フィルター";
    pub const SETTINGS: &str = "設定";
    pub const LOGIN: &str = "ログイン";
}

pub mod error_banner {
    pub const TITLE: &str = "エラーが発生しました";
    pub const CLOSE_ARIA: &str = "エラー表示を閉じる";
}

pub mod loading_spinner {
    pub const ARIA_LABEL: &str = "Loading";
}

pub mod post_card {
    pub const DELETE: &str = "削除";
    pub const DELETE_CONFIRM: &str = "この投稿を削除しますか？";
    pub const OWN_BADGE: &str = "あなたの投稿";
    pub const LIKE_ARIA: &str = "いいね";
}

pub mod home {
    pub const NEW_POST: &str = "＋ 投稿する";
    pub const EMPTY: &str = "条件に合う投稿がありません。";
    pub const SORT_LABEL: &str = "並び替え";
    pub const CLEAR_FILTERS: &str = "フィルターを解除";
    pub const LOAD_FAILED: &str = "投稿の読み込みに失敗しました。";
    pub const LIKE_FAILED: &str = "いいねに失敗しました。";
    pub const DELETE_FAILED: &str = "削除に失敗しました。";
    pub const SESSION_EXPIRED: &str = "ログインの有効期限が切れました。再度ログインしてください。";
}

pub mod post_form {
    pub const TITLE: &str = "新しい投稿";
    pub const FIELD_TITLE: &str = "タイトル";
    pub const FIELD_TYPE: &str = "知見の種類";
    pub const FIELD_CONTENT: &str = "内容";
    pub const TYPE_PLACEHOLDER: &str = "選択してください";
    pub const SUBMIT: &str = "投稿";
    pub const SUBMIT_FAILED: &str = "投稿に失敗しました。";
}

pub mod login {
    pub const TITLE: &str = "ログイン / 新規登録";
    pub const EMAIL: &str = "メールアドレス";
    pub const PASSWORD: &str = "パスワード";
    pub const LOGIN: &str = "ログイン";
    pub const REGISTER: &str = "新規登録";
    pub const PROCESSING: &str = "処理中...";
    pub const LOGGED_IN: &str = "ログインしました。";
    pub const REGISTERED: &str = "登録しました。";
    pub const FAILED: &str = "認証に失敗しました。";
    pub const STATUS_SIGNED_IN: &str = "ログイン中: {}";
    pub const STATUS_SIGNED_OUT: &str = "未ログイン";
    pub const FALLBACK_USER: &str = "ユーザー";
    pub const SESSION_INVALID: &str = "ログイン情報が無効になりました。再ログインしてください。";
    pub const LOGOUT: &str = "ログアウト";
    pub const LOGGED_OUT: &str = "ログアウトしました。";
    pub const TO_SETTINGS: &str = "設定へ";
}

pub mod settings {
    pub const TITLE: &str = "設定";
    pub const VIEW_FILTERS: &str = "見たい投稿";
    pub const POST_DEFAULTS: &str = "投稿のデフォルト";
    pub const NICKNAME: &str = "ニックネーム";
    pub const SAVED: &str = "✓ 保存しました！";
    pub const SAVE_PROFILE: &str = "プロフィールに反映";
    pub const PROFILE_SAVED: &str = "プロフィールを更新しました。";
    pub const PROFILE_FAILED: &str = "プロフィールの更新に失敗しました。";
    pub const LOGOUT: &str = "ログアウト";
    pub const NOT_SET: &str = "未設定";
    pub const DEFAULTS_FROM_PROFILE: &str = "プロフィールから投稿のデフォルトを設定しました。";
}

pub mod filters {
    pub const TITLE: &str = "フィルター";
    pub const RESET: &str = "フィルターをリセット";
    pub const RESET_DONE: &str = "リセット完了！";
    pub const SAVE: &str = "保存";
    pub const SAVED: &str = "✓ 保存しました！";
}

pub mod user {
    pub const TITLE_TEMPLATE: &str = "{} さんの投稿";
    pub const FALLBACK_NAME: &str = "ユーザー";
    pub const EMPTY: &str = "まだ投稿がありません。";
}

pub mod not_found {
    pub const TITLE: &str = "404 - ページが見つかりません";
    pub const BODY: &str = "お探しのページは存在しません。";
}

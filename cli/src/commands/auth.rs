use anyhow::Result;
use overseas_board_shared::BoardError;

use super::Client;
use crate::output::{print_json, render_profile};

pub async fn login(client: &Client, email: &str, password: &str) -> Result<()> {
    client.login(email, password).await?;
    println!("ログインしました。");
    Ok(())
}

pub async fn register(client: &Client, email: &str, password: &str) -> Result<()> {
    client.register(email, password).await?;
    println!("登録しました。");
    Ok(())
}

pub fn logout(client: &Client) {
    client.logout();
    println!("ログアウトしました。");
}

pub async fn whoami(client: &Client, json: bool) -> Result<()> {
    match client.current_user().await {
        Ok(profile) if json => print_json(&profile),
        Ok(profile) => {
            print!("{}", render_profile(&profile));
            Ok(())
        },
        Err(BoardError::Unauthorized) => {
            println!("ログインしていません。");
            Ok(())
        },
        Err(err) => Err(err.into()),
    }
}

/// Send the saved posting defaults to the profile. Without `--nickname` the
/// nickname remembered from the last update is sent again.
pub async fn update_profile(client: &Client, nickname: Option<&str>, json: bool) -> Result<()> {
    let preferences = client.preferences().load();
    let nickname = nickname.or(preferences.nickname.as_deref());
    let profile = client.update_profile(nickname, &preferences.defaults).await?;
    if json {
        print_json(&profile)
    } else {
        println!("プロフィールを更新しました。");
        print!("{}", render_profile(&profile));
        Ok(())
    }
}

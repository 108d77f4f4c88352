use anyhow::Result;
use overseas_board_shared::{
    board::{compose_view, reduce, BoardEvent, BoardState},
    BoardError, FilterSummary, LikeStateCache, PostDraft, SortMode, TypeMatching,
};

use super::Client;
use crate::{
    cli::PostCommands,
    output::{print_json, render_posts, PostRow},
};

pub async fn run(client: &Client, command: PostCommands, json: bool) -> Result<()> {
    match command {
        PostCommands::List {
            sort,
            all,
            author,
            type_labels,
        } => {
            let matching = if type_labels { TypeMatching::Label } else { TypeMatching::RawCode };
            list(client, sort, all, author, matching, json).await
        },
        PostCommands::Create {
            title,
            content,
            type_code,
        } => create(client, title, content, type_code, json).await,
        PostCommands::Delete {
            id,
        } => {
            client.delete_post(id).await?;
            println!("投稿 #{id} を削除しました。");
            Ok(())
        },
        PostCommands::Like {
            id,
        } => like(client, id, json).await,
    }
}

async fn list(
    client: &Client,
    sort: SortMode,
    all: bool,
    author: Option<i64>,
    matching: TypeMatching,
    json: bool,
) -> Result<()> {
    let mut state = BoardState::restore(client.preferences().load(), client.session());
    state = reduce(state, BoardEvent::SetSort(sort));
    if all {
        state = reduce(state, BoardEvent::ResetFilters);
    }

    let mut likes = LikeStateCache::new();
    let posts = match author {
        Some(author_id) => client.user_posts(author_id, &mut likes).await?,
        None => client.load_posts(&mut likes).await?,
    };

    let viewer_id = if state.session.is_authenticated() {
        match client.current_user().await {
            Ok(profile) => Some(profile.id),
            Err(BoardError::Unauthorized) => {
                state = reduce(state, BoardEvent::SessionExpired);
                None
            },
            Err(err) => {
                tracing::warn!("could not load profile: {err}");
                None
            },
        }
    } else {
        None
    };
    let views = compose_view(&posts, &state, &likes, viewer_id, matching);
    if json {
        let rows: Vec<PostRow<'_>> = views.iter().map(PostRow::from).collect();
        return print_json(&rows);
    }
    if state.needs_login() {
        eprintln!("セッションの有効期限が切れました。再度ログインしてください。");
    }
    println!("{} ({})", FilterSummary::of(&state.selection).message(), state.sort.label());
    print!("{}", render_posts(&views));
    Ok(())
}

async fn create(
    client: &Client,
    title: String,
    content: String,
    type_code: Option<String>,
    json: bool,
) -> Result<()> {
    let type_code = match type_code {
        Some(code) => code,
        None => client.preferences().load().defaults.knowledge_type,
    };
    let draft = PostDraft {
        title,
        type_code,
        content,
    };
    let post = client.submit_post(&draft).await?;
    if json {
        print_json(&post)
    } else {
        println!("投稿 #{} を作成しました。", post.id);
        Ok(())
    }
}

/// Ask for this post's status so the toggle goes the right way, then toggle.
async fn like(client: &Client, post_id: i64, json: bool) -> Result<()> {
    let mut likes = LikeStateCache::new();
    client.like_status(&mut likes, post_id).await?;
    let status = client.toggle_like(&mut likes, post_id).await?;
    if json {
        print_json(&status)
    } else {
        let verb = if status.liked { "いいねしました" } else { "いいねを取り消しました" };
        println!("投稿 #{post_id} に{verb} (♥ {})", status.likes_count);
        Ok(())
    }
}

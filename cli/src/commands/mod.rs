pub mod auth;
pub mod labels;
pub mod posts;
pub mod prefs;

use anyhow::Result;
use overseas_board_shared::BoardClient;

use crate::{
    cli::{Cli, Commands, ProfileCommands},
    file_store::FileStore,
    http::HttpBoardApi,
};

/// Client type every command runs against.
pub type Client = BoardClient<HttpBoardApi, FileStore>;

pub async fn run(cli: Cli) -> Result<()> {
    let api = HttpBoardApi::new(&cli.api_base)?;
    let store = FileStore::new(&cli.state_file);
    tracing::debug!(api_base = %cli.api_base, state_file = %store.path().display(), "starting");
    let client = BoardClient::new(api, store).with_like_concurrency(cli.like_concurrency);
    let json = cli.json;

    match cli.command {
        Commands::Login {
            email,
            password,
        } => auth::login(&client, &email, &password).await,
        Commands::Register {
            email,
            password,
        } => auth::register(&client, &email, &password).await,
        Commands::Logout => {
            auth::logout(&client);
            Ok(())
        },
        Commands::Whoami => auth::whoami(&client, json).await,
        Commands::Posts(command) => posts::run(&client, command, json).await,
        Commands::Filters(command) => prefs::filters(&client, command, json),
        Commands::Defaults(command) => prefs::defaults(&client, command, json),
        Commands::LegacyFilters(command) => prefs::legacy_filters(&client, command, json),
        Commands::Profile(ProfileCommands::Update {
            nickname,
        }) => auth::update_profile(&client, nickname.as_deref(), json).await,
        Commands::Labels {
            dimension,
        } => labels::run(dimension, json),
    }
}

use clap::Parser;
use ob_cli::cli::{Cli, Commands, FilterCommands, PostCommands, DEFAULT_API_BASE};
use overseas_board_shared::{Dimension, SortMode};

#[test]
fn global_options_have_defaults() {
    let cli = Cli::try_parse_from(["ob-cli", "posts", "list"]).expect("parse");
    assert_eq!(cli.like_concurrency, 8);
    assert!(!cli.json);
    if std::env::var_os("OVERSEAS_BOARD_API_BASE").is_none() {
        assert_eq!(cli.api_base, DEFAULT_API_BASE);
    }
    match cli.command {
        Commands::Posts(PostCommands::List {
            sort,
            all,
            author,
            type_labels,
        }) => {
            assert_eq!(sort, SortMode::Latest);
            assert!(!all && !type_labels);
            assert_eq!(author, None);
        },
        _ => panic!("expected posts list"),
    }
}

#[test]
fn list_flags_and_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "ob-cli", "posts", "list", "--sort", "popular", "--author", "4", "--json", "--like-concurrency", "2",
    ])
    .expect("parse");
    assert!(cli.json);
    assert_eq!(cli.like_concurrency, 2);
    assert!(matches!(
        cli.command,
        Commands::Posts(PostCommands::List {
            sort: SortMode::Popular,
            author: Some(4),
            ..
        })
    ));
}

#[test]
fn filter_toggle_parses_dimension() {
    let cli = Cli::try_parse_from(["ob-cli", "filters", "toggle", "country", "usa"]).expect("parse");
    match cli.command {
        Commands::Filters(FilterCommands::Toggle {
            dimension,
            code,
        }) => {
            assert_eq!(dimension, Dimension::Country);
            assert_eq!(code, "usa");
        },
        _ => panic!("expected filters toggle"),
    }
    assert!(Cli::try_parse_from(["ob-cli", "filters", "toggle", "planet", "mars"]).is_err());
    assert!(Cli::try_parse_from(["ob-cli", "posts", "list", "--sort", "random"]).is_err());
}

#[test]
fn create_takes_optional_type() {
    let cli = Cli::try_parse_from([
        "ob-cli", "posts", "create", "--title", "Visa tips", "--content", "Apply early", "--type", "visa",
    ])
    .expect("parse");
    assert!(matches!(
        cli.command,
        Commands::Posts(PostCommands::Create {
            type_code: Some(ref code),
            ..
        }) if code == "visa"
    ));
}

use anyhow::{bail, Result};
use overseas_board_shared::{
    board::{reduce, BoardEvent, BoardState},
    labels, Dimension, FilterSelection, PostDefaults,
};
use serde::Serialize;

use super::Client;
use crate::{
    cli::{DefaultCommands, FilterCommands},
    output::{print_json, render_defaults, render_selection},
};

/// Reject codes outside the dimension's vocabulary.
pub fn known_code(dimension: Dimension, code: &str) -> Result<()> {
    if labels::backend_label(dimension, code).is_none() {
        let valid: Vec<&str> = labels::codes(dimension).collect();
        bail!("unknown {dimension} code `{code}` (expected one of: {})", valid.join(", "));
    }
    Ok(())
}

#[derive(Serialize)]
struct DefaultsOutput<'a> {
    #[serde(flatten)]
    defaults: &'a PostDefaults,
    status: String,
}

fn show_selection(selection: &FilterSelection, json: bool) -> Result<()> {
    if json {
        print_json(selection)
    } else {
        print!("{}", render_selection(selection));
        Ok(())
    }
}

fn show_defaults(defaults: &PostDefaults, json: bool) -> Result<()> {
    if json {
        print_json(&DefaultsOutput {
            defaults,
            status: defaults.status().label(),
        })
    } else {
        print!("{}", render_defaults(defaults));
        Ok(())
    }
}

fn restore(client: &Client) -> BoardState {
    BoardState::restore(client.preferences().load(), client.session())
}

fn save(client: &Client, state: &BoardState) -> Result<()> {
    client
        .preferences()
        .save(&state.selection, &state.post_defaults)?;
    Ok(())
}

/// View filters of the settings document.
pub fn filters(client: &Client, command: FilterCommands, json: bool) -> Result<()> {
    let state = restore(client);
    let state = match command {
        FilterCommands::Show => return show_selection(&state.selection, json),
        FilterCommands::Toggle {
            dimension,
            code,
        } => {
            known_code(dimension, &code)?;
            reduce(
                state,
                BoardEvent::ToggleFilter {
                    dimension,
                    code,
                },
            )
        },
        FilterCommands::Reset => reduce(state, BoardEvent::ResetFilters),
    };
    save(client, &state)?;
    show_selection(&state.selection, json)
}

pub fn defaults(client: &Client, command: DefaultCommands, json: bool) -> Result<()> {
    let state = restore(client);
    let state = match command {
        DefaultCommands::Show => return show_defaults(&state.post_defaults, json),
        DefaultCommands::Set {
            dimension,
            code,
        } => {
            known_code(dimension, &code)?;
            reduce(
                state,
                BoardEvent::SetPostDefault {
                    dimension,
                    code,
                },
            )
        },
        DefaultCommands::Reset => reduce(state, BoardEvent::ResetPostDefaults),
    };
    save(client, &state)?;
    show_defaults(&state.post_defaults, json)
}

/// Filters of the standalone filter page; never touches the settings
/// document.
pub fn legacy_filters(client: &Client, command: FilterCommands, json: bool) -> Result<()> {
    let store = client.legacy_filters();
    let mut selection = store.load();
    match command {
        FilterCommands::Show => {},
        FilterCommands::Toggle {
            dimension,
            code,
        } => {
            known_code(dimension, &code)?;
            selection.toggle(dimension, &code);
            store.save(&selection)?;
        },
        FilterCommands::Reset => {
            store.reset();
            selection.clear();
        },
    }
    show_selection(&selection, json)
}

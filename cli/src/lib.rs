//! Library half of `ob-cli`: argument parsing, the reqwest backend adapter,
//! the JSON state file and output rendering.

pub mod cli;
pub mod commands;
pub mod file_store;
pub mod http;
pub mod output;

//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the context command service.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, CreateArgs, CreateCommands};
pub use presentation::{
    format_create_result, format_inspect_result, format_list_names, format_list_result_json,
    format_list_result_text, format_remove_result,
};
pub use route::RunContext;

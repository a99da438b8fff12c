//! CLI presentation: text and json formatters per command family.

mod context;

pub use context::{
    format_create_result, format_inspect_result, format_list_names, format_list_result_json,
    format_list_result_text, format_remove_result,
};

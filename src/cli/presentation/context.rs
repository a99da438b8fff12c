//! Context command presentation: create, list, inspect, remove text/json.

use crate::commands::{ContextCreateResult, ContextListResult, ContextRemoveResult};
use crate::context::Context;
use comfy_table::presets::NOTHING;
use comfy_table::Table;
use serde_json::json;

pub fn format_create_result(result: &ContextCreateResult) -> String {
    let kinds: Vec<&str> = result
        .context
        .endpoint_kinds()
        .into_iter()
        .map(|k| k.as_str())
        .collect();
    format!(
        "Successfully created {} context \"{}\" ({})",
        result.context.context_type,
        result.context.name,
        kinds.join(", ")
    )
}

pub fn format_list_result_text(result: &ContextListResult) -> String {
    if result.contexts.is_empty() {
        return "No contexts found.\n\nUse 'ctxstore create NAME' to add one.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec!["NAME", "TYPE", "DESCRIPTION", "ENDPOINTS"]);
    for summary in &result.contexts {
        let name = if result.current.as_deref() == Some(summary.name.as_str()) {
            format!("{} *", summary.name)
        } else {
            summary.name.clone()
        };
        let endpoints: Vec<&str> = summary.endpoint_kinds.iter().map(|k| k.as_str()).collect();
        table.add_row(vec![
            name,
            summary.context_type.to_string(),
            summary.description.clone(),
            endpoints.join(","),
        ]);
    }
    table.to_string()
}

pub fn format_list_result_json(result: &ContextListResult) -> String {
    let contexts: Vec<_> = result
        .contexts
        .iter()
        .map(|summary| {
            json!({
                "name": summary.name,
                "description": summary.description,
                "context_type": summary.context_type,
                "endpoints": summary.endpoint_kinds,
                "current": result.current.as_deref() == Some(summary.name.as_str()),
            })
        })
        .collect();
    let out = json!({ "contexts": contexts, "total": result.contexts.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_list_names(result: &ContextListResult) -> String {
    result
        .contexts
        .iter()
        .map(|summary| summary.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_inspect_result(context: &Context) -> String {
    serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_remove_result(result: &ContextRemoveResult) -> String {
    result.name.clone()
}

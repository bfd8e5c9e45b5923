// Shared utilities for dashboard handlers

use axum::http::HeaderMap;
use tera::Context;

use crate::handlers::ErrorResponse;
use crate::templates::TEMPLATES;
use common::badge::{badge_category, badge_icon};
use common::format::format_duration;
use common::models::Execution;
use common::poller::FetchState;

/// Check if request is HTMX and setup context accordingly
/// Returns the template to render (content-only for HTMX, full page otherwise)
pub fn setup_htmx_context(
    context: &mut Context,
    headers: &HeaderMap,
    content_template: &'static str,
    full_template: &'static str,
) -> &'static str {
    let is_htmx = headers.get("HX-Request").is_some();
    context.insert("is_htmx", &is_htmx);

    if is_htmx {
        content_template
    } else {
        full_template
    }
}

/// Map an execution to the flat JSON view model the templates consume.
/// Badge and duration fields are precomputed so templates stay logic-free.
pub fn execution_row(execution: &Execution) -> serde_json::Value {
    serde_json::json!({
        "id": execution.id.to_string(),
        "function_name": execution.trigger.function_name,
        "status": execution.status.to_string(),
        "badge_type": badge_category(&execution.status).as_str(),
        "badge_icon": badge_icon(&execution.status),
        "duration": format_duration(execution.started_at, execution.finished_at),
        "started_at": execution
            .started_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        "trigger_type": execution.trigger.trigger_type,
    })
}

/// Insert the {loading, error, data} view of the executions cache into the
/// template context. Exactly one of the three states renders.
pub fn insert_fetch_state(context: &mut Context, state: &FetchState) {
    context.insert("is_loading", &!state.loaded);

    if let Some(error) = &state.error {
        context.insert("error", error);
    }

    let rows: Vec<serde_json::Value> = state
        .data
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(execution_row)
        .collect();
    context.insert("count", &rows.len());
    context.insert("executions", &rows);
}

/// Render a template, mapping failures to the standard error response
pub fn render_template(template: &str, context: &Context) -> Result<String, ErrorResponse> {
    TEMPLATES.render(template, context).map_err(|e| {
        tracing::error!(error = %e, template = template, "Template rendering failed");
        ErrorResponse::new("template_error", format!("Failed to render '{}'", template))
    })
}

// Executions page and HTMX partials

use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Html,
};
use tera::Context;

use crate::handlers::shared::{insert_fetch_state, render_template, setup_htmx_context};
use crate::handlers::trigger::DEFAULT_PAYLOAD;
use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Sidebar entries; the active one is matched by exact path comparison.
const NAV_ITEMS: &[(&str, &str)] = &[("Workflows", "/")];

fn base_context(uri: &Uri) -> Context {
    let mut context = Context::new();
    context.insert("title", "Workflows");

    // Defaults for the trigger form embedded in the page shell.
    context.insert("function_name", "");
    context.insert("payload", DEFAULT_PAYLOAD);

    let nav: Vec<serde_json::Value> = NAV_ITEMS
        .iter()
        .map(|(title, href)| {
            serde_json::json!({
                "title": title,
                "href": href,
                "active": *href == uri.path(),
            })
        })
        .collect();
    context.insert("nav_items", &nav);
    context
}

/// Dashboard page. Serves the full page on a plain request and only the
/// executions panel on an HTMX one; the page reloads that panel every poll
/// interval, on window focus, and after a trigger submission.
#[tracing::instrument(skip(state, headers))]
pub async fn executions_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Html<String>, ErrorResponse> {
    let mut context = base_context(&uri);

    let snapshot = state.executions.snapshot().await;
    insert_fetch_state(&mut context, &snapshot);

    let template = setup_htmx_context(
        &mut context,
        &headers,
        "_executions_content.html",
        "executions.html",
    );
    render_template(template, &context).map(Html)
}

/// Manual refresh (HTMX). Revalidates the executions cache, then returns the
/// refreshed partial for the panel swap.
#[tracing::instrument(skip(state))]
pub async fn refresh_executions(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, ErrorResponse> {
    state.executions.revalidate().await;
    metrics::counter!("dashboard_manual_refreshes_total").increment(1);

    let mut context = base_context(&uri);
    let snapshot = state.executions.snapshot().await;
    insert_fetch_state(&mut context, &snapshot);

    render_template("_executions_content.html", &context).map(Html)
}

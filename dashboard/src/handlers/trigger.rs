// Test trigger form submission (HTMX)

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tera::Context;

use crate::handlers::shared::render_template;
use crate::handlers::ErrorResponse;
use crate::state::AppState;
use common::models::TriggerRequest;

/// Default payload shown in the form, both initially and after a reset.
pub const DEFAULT_PAYLOAD: &str = "{}";

/// Raw form fields as submitted from the dialog
#[derive(Debug, Deserialize)]
pub struct TriggerForm {
    #[serde(default)]
    pub function_name: String,
    #[serde(default)]
    pub payload: String,
}

fn form_context(function_name: &str, payload: &str) -> Context {
    let mut context = Context::new();
    context.insert("function_name", function_name);
    context.insert("payload", payload);
    context
}

/// Handle `POST /trigger`.
///
/// Validation failures and backend errors re-render the form with the
/// entered values preserved so the user can retry; a success resets the form
/// and tells the page to refresh the executions panel via the
/// `HX-Trigger: executions-refreshed` response header. Toasts ride along as
/// out-of-band swaps.
#[tracing::instrument(skip(state, form), fields(function_name = %form.function_name))]
pub async fn submit_trigger(
    State(state): State<AppState>,
    Form(form): Form<TriggerForm>,
) -> Result<Response, ErrorResponse> {
    let function_name = form.function_name.trim();

    // Client-side validation mirror: empty function name never reaches the
    // backend.
    if function_name.is_empty() {
        tracing::debug!("Rejected trigger submission with empty function name");
        let mut context = form_context(&form.function_name, &form.payload);
        context.insert("field_error", "Function name is required");
        let html = render_template("_trigger_form.html", &context)?;
        return Ok(Html(html).into_response());
    }

    let request = TriggerRequest::from_form_input(function_name, &form.payload);
    match state.client.send_trigger(&request).await {
        Ok(()) => {
            metrics::counter!("dashboard_trigger_submissions_total", "outcome" => "success")
                .increment(1);

            // One revalidation of the executions resource per successful
            // trigger; the response header reloads the panel on the page.
            state.executions.revalidate().await;

            let mut context = form_context("", DEFAULT_PAYLOAD);
            context.insert("toast_kind", "success");
            context.insert("toast_title", "Triggered successfully");
            let html = render_template("_trigger_form.html", &context)?;

            let mut headers = HeaderMap::new();
            headers.insert("HX-Trigger", HeaderValue::from_static("executions-refreshed"));
            Ok((headers, Html(html)).into_response())
        }
        Err(e) => {
            metrics::counter!("dashboard_trigger_submissions_total", "outcome" => "failure")
                .increment(1);
            tracing::warn!(error = %e, "Trigger submission failed");

            let mut context = form_context(&form.function_name, &form.payload);
            context.insert("toast_kind", "error");
            context.insert("toast_title", "Failed to trigger");
            context.insert("toast_message", &e.display_message());
            let html = render_template("_trigger_form.html", &context)?;
            Ok(Html(html).into_response())
        }
    }
}

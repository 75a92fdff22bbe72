use serde_json::{Value, json};
use thiserror::Error;

use intake_spec::{
    ApplyOutcome, AssembleError, CatalogError, FormError, FormState, FormStore, FormUpdate,
    ReferenceCatalog, RenderError, assemble, build_summary, counters, next_step,
    render_json_ui as summary_json_ui, render_text as summary_text, submission_schema, validate,
};

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse form state: {0}")]
    FormParse(#[source] serde_json::Error),
    #[error("failed to parse update: {0}")]
    UpdateParse(#[source] serde_json::Error),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
    #[error("reference catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
    #[error("update rejected: {0}")]
    Update(#[from] FormError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

fn parse_form(form_json: &str) -> Result<FormState, ComponentError> {
    if form_json.trim().is_empty() {
        return Ok(FormState::default());
    }
    serde_json::from_str(form_json).map_err(ComponentError::FormParse)
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, ComponentError> {
    serde_json::to_value(value).map_err(ComponentError::JsonEncode)
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn respond_string(result: Result<String, ComponentError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn outcome_value(outcome: &ApplyOutcome) -> Value {
    match outcome {
        ApplyOutcome::Toggle(toggle) => json!({
            "kind": "toggle",
            "result": toggle.as_str(),
        }),
        ApplyOutcome::Text(intake) => json!({
            "kind": "text",
            "committed": intake.committed,
            "pending": intake.pending,
        }),
        ApplyOutcome::Applied => json!({ "kind": "applied" }),
    }
}

fn describe_inner() -> Result<Value, ComponentError> {
    let catalog = ReferenceCatalog::bundled()?;
    Ok(json!({
        "health_concerns": encode(&catalog.health_concerns())?,
        "diets": encode(&catalog.diets())?,
        "allergies": encode(&catalog.allergies())?,
    }))
}

/// The three reference catalogs the screens are built from.
pub fn describe() -> String {
    respond(describe_inner())
}

fn apply_update_inner(form_json: &str, update_json: &str) -> Result<Value, ComponentError> {
    let catalog = ReferenceCatalog::bundled()?;
    let mut store = FormStore::with_state(&catalog, parse_form(form_json)?);
    let update: FormUpdate =
        serde_json::from_str(update_json).map_err(ComponentError::UpdateParse)?;
    let outcome = store.apply(update)?;
    let state = store.into_state();

    Ok(json!({
        "status": "ok",
        "outcome": outcome_value(&outcome),
        "at_capacity": state.concerns.is_at_capacity(),
        "selected": encode(&state.concerns.selected())?,
        "prioritized": encode(&state.concerns.prioritized())?,
        "form": encode(&state)?,
    }))
}

/// Applies one tagged update to the serialized form and returns the new
/// state plus the engine's view of the concern board.
pub fn apply_update(form_json: &str, update_json: &str) -> String {
    respond(apply_update_inner(form_json, update_json))
}

fn validate_inner(form_json: &str) -> Result<Value, ComponentError> {
    let form = parse_form(form_json)?;
    encode(&validate(&form))
}

pub fn validate_form(form_json: &str) -> String {
    respond(validate_inner(form_json))
}

fn next_inner(form_json: &str) -> Result<Value, ComponentError> {
    let form = parse_form(form_json)?;
    let next = next_step(&form);
    let progress = counters(&form);
    Ok(json!({
        "status": if next.is_some() { "need_input" } else { "complete" },
        "next_step": next.map(|step| step.as_str()),
        "progress": {
            "answered": progress.answered,
            "total": progress.total,
        },
    }))
}

/// Which gated screen still needs input, with progress counters.
pub fn next(form_json: &str) -> String {
    respond(next_inner(form_json))
}

fn assemble_inner(form_json: &str) -> Result<Value, ComponentError> {
    let catalog = ReferenceCatalog::bundled()?;
    let form = parse_form(form_json)?;
    match assemble(&form, &catalog) {
        Ok(payload) => Ok(json!({
            "status": "complete",
            "payload": encode(&payload)?,
        })),
        Err(AssembleError::Invalid(validation)) => Ok(json!({
            "status": "error",
            "validation": encode(&validation)?,
        })),
    }
}

/// Builds the submission payload, or a validation report when the form is
/// not ready.
pub fn assemble_form(form_json: &str) -> String {
    respond(assemble_inner(form_json))
}

fn render_text_inner(form_json: &str) -> Result<String, ComponentError> {
    let form = parse_form(form_json)?;
    Ok(summary_text(&build_summary(&form))?)
}

pub fn render_text(form_json: &str) -> String {
    respond_string(render_text_inner(form_json))
}

pub fn render_json_ui(form_json: &str) -> String {
    respond(parse_form(form_json).map(|form| summary_json_ui(&build_summary(&form))))
}

/// JSON Schema for the submission payload.
pub fn submission_schema_json() -> String {
    respond(Ok(submission_schema()))
}

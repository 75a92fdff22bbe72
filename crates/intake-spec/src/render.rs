use handlebars::Handlebars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::assemble::RankedConcern;
use crate::form::FormState;
use crate::progress::{ProgressCounters, counters, next_step};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    /// More input is required before the summary is final.
    NeedInput,
    /// All gated screens are answered.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Everything the summary surface needs, detached from rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryPayload {
    pub concerns: Vec<RankedConcern>,
    pub diets: Vec<String>,
    pub allergies: Vec<String>,
    pub sun_exposure: Option<String>,
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub progress: ProgressCounters,
    pub status: RenderStatus,
}

/// Builds the summary payload from the current form.
pub fn build_summary(form: &FormState) -> SummaryPayload {
    let concerns = form
        .concerns
        .prioritized()
        .iter()
        .enumerate()
        .map(|(index, concern)| RankedConcern {
            id: concern.id,
            name: concern.name.clone(),
            priority: index + 1,
        })
        .collect();

    let status = if next_step(form).is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    SummaryPayload {
        concerns,
        diets: form.diets.names().to_vec(),
        allergies: form.allergies.names().to_vec(),
        sun_exposure: form.sun_exposure.map(|answer| answer.as_str().to_string()),
        smoking: form.smoking.map(|answer| answer.as_str().to_string()),
        alcohol: form.alcohol.map(|band| band.as_str().to_string()),
        progress: counters(form),
        status,
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("summary template registration failed: {0}")]
    Register(Box<handlebars::TemplateError>),
    #[error("summary template failed: {0}")]
    Template(#[from] handlebars::RenderError),
}

const SUMMARY_TEMPLATE: &str = "\
Your Selections

Health Concerns
{{#each concerns}}{{priority}}. {{name}}
{{/each}}

Diets
{{#each diets}}- {{this}}
{{/each}}
{{#if allergies}}
Allergies
{{#each allergies}}- {{this}}
{{/each}}
{{/if}}
Lifestyle
Sun Exposure: {{#if sun_exposure}}{{sun_exposure}}{{else}}unanswered{{/if}}
Smoking: {{#if smoking}}{{smoking}}{{else}}unanswered{{/if}}
Alcohol: {{#if alcohol}}{{alcohol}}{{else}}unanswered{{/if}}
";

/// Renders the payload as the human-friendly summary screen text.
pub fn render_text(payload: &SummaryPayload) -> Result<String, RenderError> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string("summary", SUMMARY_TEMPLATE)
        .map_err(|error| RenderError::Register(Box::new(error)))?;
    Ok(registry.render("summary", payload)?)
}

/// Renders the payload as a structured JSON-friendly value for host UIs.
pub fn render_json_ui(payload: &SummaryPayload) -> Value {
    let concerns = payload
        .concerns
        .iter()
        .map(|concern| {
            json!({
                "id": concern.id,
                "name": concern.name,
                "priority": concern.priority,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "status": payload.status.as_str(),
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "health_concerns": concerns,
        "diets": payload.diets,
        "allergies": payload.allergies,
        "lifestyle": {
            "sun_exposure": payload.sun_exposure,
            "smoking": payload.smoking,
            "alcohol": payload.alcohol,
        },
    })
}

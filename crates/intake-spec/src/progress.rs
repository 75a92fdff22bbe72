use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::form::FormState;

/// Screens of the onboarding flow, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    HealthConcerns,
    DietSelection,
    Allergies,
    Questionnaire,
    Summary,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Welcome => "welcome",
            Step::HealthConcerns => "health_concerns",
            Step::DietSelection => "diet_selection",
            Step::Allergies => "allergies",
            Step::Questionnaire => "questionnaire",
            Step::Summary => "summary",
        }
    }
}

/// Screens whose gate must pass before the summary is reachable. Allergies
/// is an optional screen and never blocks.
const GATED: [Step; 3] = [Step::HealthConcerns, Step::DietSelection, Step::Questionnaire];

/// Screens counted toward the progress display.
const COUNTED: [Step; 4] = [
    Step::HealthConcerns,
    Step::DietSelection,
    Step::Allergies,
    Step::Questionnaire,
];

pub fn step_complete(form: &FormState, step: Step) -> bool {
    match step {
        Step::Welcome | Step::Allergies => true,
        Step::HealthConcerns => !form.concerns.selected().is_empty(),
        Step::DietSelection => !form.diets.is_empty(),
        Step::Questionnaire => {
            form.sun_exposure.is_some() && form.smoking.is_some() && form.alcohol.is_some()
        }
        Step::Summary => false,
    }
}

/// First gated screen still missing input; `None` once the summary is
/// reachable.
pub fn next_step(form: &FormState) -> Option<Step> {
    GATED
        .into_iter()
        .find(|step| !step_complete(form, *step))
}

/// Progress counters shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressCounters {
    pub answered: usize,
    pub total: usize,
}

pub fn counters(form: &FormState) -> ProgressCounters {
    let answered = COUNTED
        .iter()
        .filter(|step| step_complete(form, **step))
        .count();
    ProgressCounters {
        answered,
        total: COUNTED.len(),
    }
}

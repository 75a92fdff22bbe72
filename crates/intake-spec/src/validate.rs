use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::form::FormState;

/// A single validation failure surfaced to the user as a blocking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut problems: Vec<String> = Vec::new();
        for field in &self.missing_required {
            problems.push(format!("{field} is unanswered"));
        }
        for error in &self.errors {
            problems.push(error.message.clone());
        }
        if problems.is_empty() {
            write!(f, "valid")
        } else {
            write!(f, "{}", problems.join("; "))
        }
    }
}

/// Checks the whole form against the submission requirements: at least one
/// health concern, at least one diet (the `"None"` entry counts), and all
/// three lifestyle answers.
pub fn validate(form: &FormState) -> ValidationResult {
    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    if form.concerns.selected().is_empty() {
        errors.push(ValidationError {
            field: Some("health_concerns".into()),
            message: "select at least one health concern".into(),
            code: Some("no_concern_selected".into()),
        });
    }

    if form.diets.is_empty() {
        errors.push(ValidationError {
            field: Some("diets".into()),
            message: "select at least one diet".into(),
            code: Some("no_diet_selected".into()),
        });
    }

    if form.sun_exposure.is_none() {
        missing_required.push("sun_exposure".into());
    }
    if form.smoking.is_none() {
        missing_required.push("smoking".into());
    }
    if form.alcohol.is_none() {
        missing_required.push("alcohol".into());
    }

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty(),
        errors,
        missing_required,
    }
}

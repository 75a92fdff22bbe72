use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::ReferenceCatalog;
use crate::form::{AlcoholBand, FormState};
use crate::validate::{ValidationResult, validate};

/// A health concern with its user-assigned rank, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedConcern {
    pub id: u32,
    pub name: String,
    pub priority: usize,
}

/// An allergy entry resolved against the reference list. Names missing from
/// the catalog keep their entry; only the id is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AllergyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
}

/// The immutable snapshot handed to the submission boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubmissionPayload {
    pub health_concerns: Vec<RankedConcern>,
    pub diets: Vec<String>,
    pub is_daily_exposure: bool,
    pub is_smoke: bool,
    pub alcohol: AlcoholBand,
    pub allergies: Vec<AllergyRecord>,
}

impl SubmissionPayload {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }
}

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("form is not ready for submission: {0}")]
    Invalid(ValidationResult),
}

/// Pure transformation from a complete form into the submission payload.
///
/// Validation runs first; an incomplete form is rejected wholesale with
/// every missing field reported, never submitted partially.
pub fn assemble(
    form: &FormState,
    catalog: &ReferenceCatalog,
) -> Result<SubmissionPayload, AssembleError> {
    let validation = validate(form);
    let (Some(sun_exposure), Some(smoking), Some(alcohol)) =
        (form.sun_exposure, form.smoking, form.alcohol)
    else {
        return Err(AssembleError::Invalid(validation));
    };
    if !validation.valid {
        return Err(AssembleError::Invalid(validation));
    }

    let health_concerns = form
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

    let allergies = form
        .allergies
        .names()
        .iter()
        .map(|name| AllergyRecord {
            id: catalog.allergy_by_name(name).map(|allergy| allergy.id),
            name: name.clone(),
        })
        .collect();

    Ok(SubmissionPayload {
        health_concerns,
        diets: form.diets.names().to_vec(),
        is_daily_exposure: sun_exposure.is_yes(),
        is_smoke: smoking.is_yes(),
        alcohol,
        allergies,
    })
}

/// JSON Schema for the payload, for hosts that validate before forwarding.
pub fn submission_schema() -> Value {
    serde_json::to_value(schema_for!(SubmissionPayload)).unwrap_or(Value::Null)
}

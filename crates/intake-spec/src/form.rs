use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allergy::{AllergyList, TextIntake};
use crate::catalog::ReferenceCatalog;
use crate::concerns::{ConcernBoard, ConcernError, ToggleOutcome};
use crate::diet::DietSelection;

/// Binary lifestyle answer, serialized the way the questionnaire displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

/// Weekly alcohol consumption band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AlcoholBand {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "2-5")]
    TwoToFive,
    #[serde(rename = "5+")]
    FivePlus,
}

impl AlcoholBand {
    pub const ALL: [AlcoholBand; 3] = [
        AlcoholBand::ZeroToOne,
        AlcoholBand::TwoToFive,
        AlcoholBand::FivePlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlcoholBand::ZeroToOne => "0-1",
            AlcoholBand::TwoToFive => "2-5",
            AlcoholBand::FivePlus => "5+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.as_str() == label)
    }
}

/// The in-memory form, created empty at wizard start and discarded with the
/// session. Serializable so hosts can seed a run or persist a draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormState {
    #[serde(default)]
    pub concerns: ConcernBoard,
    #[serde(default)]
    pub diets: DietSelection,
    #[serde(default)]
    pub allergies: AllergyList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun_exposure: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<AlcoholBand>,
}

/// One strongly-typed mutation per question surface. Screens and hosts go
/// through these instead of writing fields by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormUpdate {
    ToggleConcern { id: u32 },
    ReorderConcerns { order: Vec<u32> },
    ToggleDiet { name: String },
    AddAllergy { name: String },
    RemoveAllergy { name: String },
    AllergyText { text: String },
    SetSunExposure { answer: YesNo },
    SetSmoking { answer: YesNo },
    SetAlcohol { band: AlcoholBand },
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Concern(#[from] ConcernError),
}

/// What an update did, for surfaces that echo state back to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// A concern toggle, with the board's verdict.
    Toggle(ToggleOutcome),
    /// Free allergy text, with what was committed and what stays pending.
    Text(TextIntake),
    /// The update applied with nothing further to report.
    Applied,
}

/// Wizard-scoped form store: owns the state for one run, applies updates as
/// the single writer, and hands the state to the assembler read-only.
#[derive(Debug)]
pub struct FormStore<'a> {
    catalog: &'a ReferenceCatalog,
    state: FormState,
}

impl<'a> FormStore<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self {
            catalog,
            state: FormState::default(),
        }
    }

    pub fn with_state(catalog: &'a ReferenceCatalog, state: FormState) -> Self {
        Self { catalog, state }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    pub fn apply(&mut self, update: FormUpdate) -> Result<ApplyOutcome, FormError> {
        match update {
            FormUpdate::ToggleConcern { id } => {
                let outcome = self.state.concerns.toggle(id, self.catalog)?;
                Ok(ApplyOutcome::Toggle(outcome))
            }
            FormUpdate::ReorderConcerns { order } => {
                self.state.concerns.reorder(&order)?;
                Ok(ApplyOutcome::Applied)
            }
            FormUpdate::ToggleDiet { name } => {
                self.state.diets.toggle(&name);
                Ok(ApplyOutcome::Applied)
            }
            FormUpdate::AddAllergy { name } => {
                self.state.allergies.add(&name);
                Ok(ApplyOutcome::Applied)
            }
            FormUpdate::RemoveAllergy { name } => {
                self.state.allergies.remove(&name);
                Ok(ApplyOutcome::Applied)
            }
            FormUpdate::AllergyText { text } => {
                let intake = self.state.allergies.push_text(&text);
                Ok(ApplyOutcome::Text(intake))
            }
            FormUpdate::SetSunExposure { answer } => {
                self.state.sun_exposure = Some(answer);
                Ok(ApplyOutcome::Applied)
            }
            FormUpdate::SetSmoking { answer } => {
                self.state.smoking = Some(answer);
                Ok(ApplyOutcome::Applied)
            }
            FormUpdate::SetAlcohol { band } => {
                self.state.alcohol = Some(band);
                Ok(ApplyOutcome::Applied)
            }
        }
    }
}

#![allow(missing_docs)]

pub mod allergy;
pub mod assemble;
pub mod catalog;
pub mod concerns;
pub mod diet;
pub mod form;
pub mod progress;
pub mod render;
pub mod validate;

pub use allergy::{AllergyList, TextIntake};
pub use assemble::{
    AllergyRecord, AssembleError, RankedConcern, SubmissionPayload, assemble, submission_schema,
};
pub use catalog::{Allergy, CatalogError, DIET_NONE, Diet, HealthConcern, ReferenceCatalog};
pub use concerns::{
    ConcernBoard, ConcernError, MAX_SELECTED, ReorderGesture, ToggleOutcome,
};
pub use diet::DietSelection;
pub use form::{AlcoholBand, ApplyOutcome, FormError, FormState, FormStore, FormUpdate, YesNo};
pub use progress::{ProgressCounters, Step, counters, next_step, step_complete};
pub use render::{
    RenderError, RenderStatus, SummaryPayload, build_summary, render_json_ui, render_text,
};
pub use validate::{ValidationError, ValidationResult, validate};

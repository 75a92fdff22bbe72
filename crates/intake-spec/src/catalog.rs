use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// A selectable health concern from the bundled catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthConcern {
    pub id: u32,
    pub name: String,
}

/// A selectable diet; `tool_tip` backs the info popup on the diet screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diet {
    pub id: u32,
    pub name: String,
    pub tool_tip: String,
}

/// A known allergy from the bundled catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Allergy {
    pub id: u32,
    pub name: String,
}

/// The sentinel diet that excludes every other choice.
pub const DIET_NONE: &str = "None";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse the {asset} catalog: {source}")]
    Parse {
        asset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

const HEALTH_CONCERNS_JSON: &str = include_str!("../assets/health_concerns.json");
const DIETS_JSON: &str = include_str!("../assets/diets.json");
const ALLERGIES_JSON: &str = include_str!("../assets/allergies.json");

/// The three read-only reference lists, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    health_concerns: Vec<HealthConcern>,
    diets: Vec<Diet>,
    allergies: Vec<Allergy>,
}

impl ReferenceCatalog {
    /// Parses the bundled JSON assets. The diet list is normalized on the way
    /// in: the `"None"` sentinel is prepended, and the known source-data typo
    /// `"Vegaterian"` is corrected.
    pub fn bundled() -> Result<Self, CatalogError> {
        let health_concerns =
            parse_envelope::<HealthConcern>(HEALTH_CONCERNS_JSON, "health-concerns")?;
        let raw_diets = parse_envelope::<Diet>(DIETS_JSON, "diets")?;
        let allergies = parse_envelope::<Allergy>(ALLERGIES_JSON, "allergies")?;

        let mut diets = Vec::with_capacity(raw_diets.len() + 1);
        diets.push(Diet {
            id: 0,
            name: DIET_NONE.to_string(),
            tool_tip: "No specific dietary restrictions or preferences".to_string(),
        });
        for mut diet in raw_diets {
            if diet.name == "Vegaterian" {
                diet.name = "Vegetarian".to_string();
            }
            diets.push(diet);
        }

        Ok(Self {
            health_concerns,
            diets,
            allergies,
        })
    }

    /// Builds a catalog from already-final lists, bypassing asset loading.
    pub fn from_parts(
        health_concerns: Vec<HealthConcern>,
        diets: Vec<Diet>,
        allergies: Vec<Allergy>,
    ) -> Self {
        Self {
            health_concerns,
            diets,
            allergies,
        }
    }

    pub fn health_concerns(&self) -> &[HealthConcern] {
        &self.health_concerns
    }

    pub fn diets(&self) -> &[Diet] {
        &self.diets
    }

    pub fn allergies(&self) -> &[Allergy] {
        &self.allergies
    }

    pub fn concern(&self, id: u32) -> Option<&HealthConcern> {
        self.health_concerns.iter().find(|concern| concern.id == id)
    }

    pub fn diet_by_name(&self, name: &str) -> Option<&Diet> {
        self.diets.iter().find(|diet| diet.name == name)
    }

    pub fn allergy_by_name(&self, name: &str) -> Option<&Allergy> {
        self.allergies.iter().find(|allergy| allergy.name == name)
    }
}

fn parse_envelope<T: DeserializeOwned>(
    json: &'static str,
    asset: &'static str,
) -> Result<Vec<T>, CatalogError> {
    serde_json::from_str::<Envelope<T>>(json)
        .map(|envelope| envelope.data)
        .map_err(|source| CatalogError::Parse { asset, source })
}

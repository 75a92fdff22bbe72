use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::DIET_NONE;

/// Chosen diet names, in selection order.
///
/// `"None"` is an explicit catalog entry, not an empty selection: choosing it
/// clears everything else, and choosing anything else clears it. An empty
/// selection fails the at-least-one gate on the diet screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct DietSelection {
    names: Vec<String>,
}

impl DietSelection {
    pub fn toggle(&mut self, name: &str) {
        if name == DIET_NONE {
            self.names.clear();
            self.names.push(DIET_NONE.to_string());
            return;
        }

        self.names.retain(|existing| existing != DIET_NONE);
        if let Some(position) = self.names.iter().position(|existing| existing == name) {
            self.names.remove(position);
        } else {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

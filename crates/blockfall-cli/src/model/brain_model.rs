use std::path::Path;

use blockfall_brain::{Brain, Coefficients};
use serde::{Deserialize, Serialize};

use crate::util;

/// Named set of brain coefficients, as stored under `models/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BrainModel {
    pub name: String,
    pub coefficients: Coefficients,
}

impl Default for BrainModel {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
            coefficients: Coefficients::default(),
        }
    }
}

impl BrainModel {
    /// Reads the model at `path`, or the built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let model: Self = util::read_json_file("brain model", path)?;
        tracing::info!(name = %model.name, path = %path.display(), "loaded brain model");
        Ok(model)
    }

    #[must_use]
    pub fn to_brain(&self) -> Brain<'static> {
        Brain::with_coefficients(self.coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_model_matches_defaults() {
        let json = include_str!("../../../../models/default.json");
        let model: BrainModel = serde_json::from_str(json).unwrap();
        assert_eq!(model, BrainModel::default());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(BrainModel::load(None).unwrap(), BrainModel::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = BrainModel::load(Some(Path::new("does/not/exist.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to open brain model file"));
    }
}

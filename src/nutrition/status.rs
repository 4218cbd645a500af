//! Nutrient status classification
//!
//! Classifies a single nutrient value against its recommended range.

use serde::{Deserialize, Serialize};

use crate::models::Standard;

/// Where a value falls relative to its standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NutrientStatus {
    Normal,
    Excess,
    Deficiency,
    NoStandard,
}

impl NutrientStatus {
    /// Human-readable label
    pub fn display_text(&self) -> &'static str {
        match self {
            NutrientStatus::Normal => "Normal Range",
            NutrientStatus::Excess => "Excess",
            NutrientStatus::Deficiency => "Deficient",
            NutrientStatus::NoStandard => "No Standard",
        }
    }

    /// Style class used by table renderers
    pub fn css_class(&self) -> &'static str {
        match self {
            NutrientStatus::Normal => "status-normal",
            NutrientStatus::Excess => "status-excess",
            NutrientStatus::Deficiency => "status-deficiency",
            NutrientStatus::NoStandard => "status-no-standard",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, NutrientStatus::Normal)
    }
}

/// Classify a nutrient value against a standard.
///
/// A missing value is compared as `0`, so unmeasured data reads the same as
/// a measured zero. Bounds are inclusive.
pub fn classify(value: Option<f64>, standard: Option<&Standard>) -> NutrientStatus {
    let Some(standard) = standard else {
        return NutrientStatus::NoStandard;
    };

    let value = value.unwrap_or(0.0);

    match (standard.minimum, standard.maximum) {
        (None, None) => NutrientStatus::NoStandard,
        (Some(min), Some(max)) => {
            if value >= min && value <= max {
                NutrientStatus::Normal
            } else if value > max {
                NutrientStatus::Excess
            } else {
                NutrientStatus::Deficiency
            }
        }
        (Some(min), None) => {
            if value >= min {
                NutrientStatus::Normal
            } else {
                NutrientStatus::Deficiency
            }
        }
        (None, Some(max)) => {
            if value <= max {
                NutrientStatus::Normal
            } else {
                NutrientStatus::Excess
            }
        }
    }
}

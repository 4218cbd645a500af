//! Nutrition standard tools

use serde::Serialize;

use crate::context::AppContext;
use crate::error::{FnaError, FnaResult};
use crate::models::{Nutrient, Standard, StandardUpsert};
use crate::nutrition::recommended_range;
use super::lookup;

#[derive(Debug, Serialize)]
pub struct StandardEntry {
    #[serde(flatten)]
    pub standard: Standard,
    /// Unit of a catalog nutrient, e.g. "mg"
    pub unit: Option<&'static str>,
    pub recommended_range: String,
}

impl StandardEntry {
    fn new(standard: Standard) -> Self {
        Self {
            unit: Nutrient::from_key(&standard.nutrient).map(|n| n.unit()),
            recommended_range: recommended_range(Some(&standard)),
            standard,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StandardsResponse {
    pub standards: Vec<StandardEntry>,
    pub total: usize,
}

/// All standards, sorted by nutrient label
pub fn get_standards(ctx: &AppContext) -> FnaResult<StandardsResponse> {
    let standards: Vec<StandardEntry> = lookup::standards(ctx)?
        .into_iter()
        .map(StandardEntry::new)
        .collect();

    Ok(StandardsResponse {
        total: standards.len(),
        standards,
    })
}

/// Create or replace the standard for one catalog nutrient
pub fn set_standard(ctx: &AppContext, data: StandardUpsert) -> FnaResult<StandardEntry> {
    let nutrient = Nutrient::from_key(&data.nutrient)
        .ok_or_else(|| FnaError::InvalidInput(format!("unknown nutrient '{}'", data.nutrient)))?;

    for (label, bound) in [("minimum", data.minimum), ("maximum", data.maximum)] {
        if let Some(v) = bound {
            if !v.is_finite() || v < 0.0 {
                return Err(FnaError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    label, v
                )));
            }
        }
    }
    if let (Some(min), Some(max)) = (data.minimum, data.maximum) {
        if min > max {
            return Err(FnaError::InvalidInput(format!(
                "minimum {} is greater than maximum {}",
                min, max
            )));
        }
    }

    let data = StandardUpsert {
        nutrient: nutrient.key().to_string(),
        daily_recommendation: non_blank(data.daily_recommendation),
        function_text: non_blank(data.function_text),
        excess_effect: non_blank(data.excess_effect),
        deficiency_effect: non_blank(data.deficiency_effect),
        ..data
    };

    let standard = ctx.database.with_conn(|conn| Standard::upsert(conn, &data))?;
    lookup::invalidate(ctx);
    tracing::info!("set standard for {}", standard.nutrient);

    Ok(StandardEntry::new(standard))
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

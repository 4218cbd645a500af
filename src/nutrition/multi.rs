//! Side-by-side comparison of several foods
//!
//! Builds one row per catalog nutrient with a classified cell per food and
//! the recommended range. The configured upper limit on food count is
//! enforced by the caller and never exceeds `MAX_COMPARISON_FOODS`.

use serde::Serialize;
use thiserror::Error;

use crate::models::{Food, Nutrient, Standard};
use super::format::{format_bound, format_food_name, format_nutrient_value};
use super::status::{classify, NutrientStatus};

/// Minimum number of foods a comparison needs
pub const MIN_COMPARISON_FOODS: usize = 2;

/// Most foods a comparison table can hold
pub const MAX_COMPARISON_FOODS: usize = 5;

/// Fewer foods than a comparison needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at least 2 foods are required for comparison, got {found}")]
pub struct InsufficientFoodsError {
    pub found: usize,
}

/// A food as it appears in the table header
#[derive(Debug, Clone, Serialize)]
pub struct ComparedFood {
    pub name: String,
    pub display_name: String,
}

/// One food's value for one nutrient
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonCell {
    pub value: Option<f64>,
    pub formatted: String,
    pub status: NutrientStatus,
    pub status_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultiComparisonRow {
    pub nutrient: Nutrient,
    pub unit: &'static str,
    pub cells: Vec<ComparisonCell>,
    pub recommended_range: String,
}

/// Nutrient-by-food comparison table
#[derive(Debug, Clone, Serialize)]
pub struct MultiComparisonTable {
    pub foods: Vec<ComparedFood>,
    /// "Nutrient", one column per food, "Recommended Range"
    pub header: Vec<String>,
    pub rows: Vec<MultiComparisonRow>,
}

impl MultiComparisonTable {
    /// Label column + one per food + range column
    pub fn column_count(&self) -> usize {
        self.foods.len() + 2
    }
}

/// Range text for a standard: `"min - max"`, `"≥ min"`, `"≤ max"`, the
/// free-text recommendation, or `"No standard"`.
pub fn recommended_range(standard: Option<&Standard>) -> String {
    let Some(standard) = standard else {
        return "No standard".to_string();
    };

    match (standard.minimum, standard.maximum) {
        (Some(min), Some(max)) => format!("{} - {}", format_bound(min), format_bound(max)),
        (Some(min), None) => format!("≥ {}", format_bound(min)),
        (None, Some(max)) => format!("≤ {}", format_bound(max)),
        (None, None) => standard
            .daily_recommendation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map_or_else(|| "No standard".to_string(), str::to_string),
    }
}

/// Build the comparison table for `foods`, in the order given
pub fn compute_multi_comparison(
    foods: &[Food],
    standards: &[Standard],
) -> Result<MultiComparisonTable, InsufficientFoodsError> {
    if foods.len() < MIN_COMPARISON_FOODS {
        return Err(InsufficientFoodsError { found: foods.len() });
    }

    let compared: Vec<ComparedFood> = foods
        .iter()
        .map(|food| ComparedFood {
            name: food.name.clone(),
            display_name: format_food_name(&food.name),
        })
        .collect();

    let mut header = Vec::with_capacity(compared.len() + 2);
    header.push("Nutrient".to_string());
    header.extend(compared.iter().map(|f| f.display_name.clone()));
    header.push("Recommended Range".to_string());

    let rows = Nutrient::ALL
        .iter()
        .map(|nutrient| {
            let standard = standards.iter().find(|s| s.nutrient == nutrient.key());
            let cells = foods
                .iter()
                .map(|food| {
                    let value = food.value(*nutrient);
                    let status = classify(value, standard);
                    ComparisonCell {
                        value,
                        formatted: format_nutrient_value(value),
                        status,
                        status_class: status.css_class(),
                    }
                })
                .collect();

            MultiComparisonRow {
                nutrient: *nutrient,
                unit: nutrient.unit(),
                cells,
                recommended_range: recommended_range(standard),
            }
        })
        .collect();

    Ok(MultiComparisonTable {
        foods: compared,
        header,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientValues;

    fn food(name: &str, energy: f64) -> Food {
        Food {
            name: name.to_string(),
            values: NutrientValues::default().with(Nutrient::Energy, energy),
            ..Default::default()
        }
    }

    fn standard(nutrient: &str, min: Option<f64>, max: Option<f64>) -> Standard {
        Standard {
            nutrient: nutrient.to_string(),
            minimum: min,
            maximum: max,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_foods_under_energy_maximum() {
        let foods = vec![food("Nasi Putih", 500.0), food("Tempe Goreng", 900.0)];
        let standards = vec![standard("Energy (kJ)", None, Some(2000.0))];
        let table = compute_multi_comparison(&foods, &standards).unwrap();

        let energy = &table.rows[0];
        assert_eq!(energy.nutrient, Nutrient::Energy);
        assert_eq!(energy.unit, "kJ");
        assert_eq!(energy.recommended_range, "≤ 2000");
        assert!(energy.cells.iter().all(|c| c.status == NutrientStatus::Normal));
        assert_eq!(energy.cells[0].formatted, "500.00");
        assert_eq!(energy.cells[1].status_class, "status-normal");
    }

    #[test]
    fn test_shape() {
        let foods = vec![food("a", 1.0), food("b", 2.0), food("c", 3.0)];
        let table = compute_multi_comparison(&foods, &[]).unwrap();

        assert_eq!(table.rows.len(), Nutrient::ALL.len());
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.header.len(), table.column_count());
        assert_eq!(table.header[0], "Nutrient");
        assert_eq!(table.header[4], "Recommended Range");
        assert!(table.rows.iter().all(|r| r.cells.len() == 3));
    }

    #[test]
    fn test_rows_follow_catalog_order() {
        let foods = vec![food("a", 1.0), food("b", 2.0)];
        let table = compute_multi_comparison(&foods, &[]).unwrap();
        let order: Vec<Nutrient> = table.rows.iter().map(|r| r.nutrient).collect();
        assert_eq!(order, Nutrient::ALL.to_vec());
    }

    #[test]
    fn test_missing_values_and_standards() {
        let foods = vec![food("a", 1.0), food("b", 2.0)];
        let table = compute_multi_comparison(&foods, &[]).unwrap();
        let protein = &table.rows[1];
        assert_eq!(protein.cells[0].formatted, "-");
        assert_eq!(protein.cells[0].status, NutrientStatus::NoStandard);
        assert_eq!(protein.recommended_range, "No standard");
    }

    #[test]
    fn test_insufficient_foods() {
        let one = vec![food("a", 1.0)];
        assert_eq!(
            compute_multi_comparison(&one, &[]).unwrap_err(),
            InsufficientFoodsError { found: 1 }
        );
        assert_eq!(
            compute_multi_comparison(&[], &[]).unwrap_err(),
            InsufficientFoodsError { found: 0 }
        );
    }

    #[test]
    fn test_recommended_range_text() {
        assert_eq!(recommended_range(Some(&standard("x", Some(3.0), Some(10.5)))), "3 - 10.5");
        assert_eq!(recommended_range(Some(&standard("x", Some(0.5), None))), "≥ 0.5");
        assert_eq!(recommended_range(Some(&standard("x", None, Some(2000.0)))), "≤ 2000");

        let mut text_only = standard("x", None, None);
        text_only.daily_recommendation = Some("Sesuai kebutuhan".to_string());
        assert_eq!(recommended_range(Some(&text_only)), "Sesuai kebutuhan");

        assert_eq!(recommended_range(Some(&standard("x", None, None))), "No standard");
        assert_eq!(recommended_range(None), "No standard");
    }
}

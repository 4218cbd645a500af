//! Single-food comparison against the full standards set

use serde::Serialize;

use crate::models::{Food, Nutrient, Standard};
use super::status::{classify, NutrientStatus};

/// One nutrient of one food compared with its standard
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub nutrient: String,
    pub food_value: Option<f64>,
    pub standard: Standard,
    pub status: NutrientStatus,
    pub status_text: &'static str,
    pub in_range: bool,
}

/// Per-nutrient classification for one food plus summary statistics
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSet {
    pub comparisons: Vec<Comparison>,
    pub total_nutrients: usize,
    pub safe_nutrients: usize,
    pub safety_percentage: u32,
}

/// Rounded share of safe nutrients, 0 when there is nothing to compare
pub fn safety_percentage(safe: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * safe as f64 / total as f64).round() as u32
}

/// Classify every standard against the food, in the standards' order.
///
/// A standard whose nutrient is not in the catalog sees a missing value.
pub fn compute_comparison_set(food: &Food, standards: &[Standard]) -> ComparisonSet {
    let comparisons: Vec<Comparison> = standards
        .iter()
        .map(|standard| {
            let food_value = Nutrient::from_key(&standard.nutrient).and_then(|n| food.value(n));
            let status = classify(food_value, Some(standard));
            Comparison {
                nutrient: standard.nutrient.clone(),
                food_value,
                standard: standard.clone(),
                status,
                status_text: status.display_text(),
                in_range: status.is_normal(),
            }
        })
        .collect();

    let total_nutrients = comparisons.len();
    let safe_nutrients = comparisons.iter().filter(|c| c.in_range).count();

    ComparisonSet {
        comparisons,
        total_nutrients,
        safe_nutrients,
        safety_percentage: safety_percentage(safe_nutrients, total_nutrients),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientValues;

    fn standard(nutrient: &str, min: Option<f64>, max: Option<f64>) -> Standard {
        Standard {
            nutrient: nutrient.to_string(),
            minimum: min,
            maximum: max,
            ..Default::default()
        }
    }

    fn food(values: NutrientValues) -> Food {
        Food {
            name: "nasi putih".to_string(),
            values,
            ..Default::default()
        }
    }

    #[test]
    fn test_output_follows_standards_order_and_length() {
        let standards = vec![
            standard("Zinc (mg)", Some(1.0), None),
            standard("Energy (kJ)", None, Some(2000.0)),
            standard("Vitamin D (mg)", Some(1.0), Some(2.0)),
        ];
        let set = compute_comparison_set(&food(NutrientValues::default()), &standards);

        assert_eq!(set.comparisons.len(), standards.len());
        assert_eq!(set.total_nutrients, 3);
        let order: Vec<&str> = set.comparisons.iter().map(|c| c.nutrient.as_str()).collect();
        assert_eq!(order, vec!["Zinc (mg)", "Energy (kJ)", "Vitamin D (mg)"]);
    }

    #[test]
    fn test_statistics() {
        let values = NutrientValues::default()
            .with(Nutrient::Energy, 500.0)
            .with(Nutrient::Protein, 20.0)
            .with(Nutrient::Fat, 1.0);
        let standards = vec![
            standard("Energy (kJ)", None, Some(2000.0)),   // normal
            standard("Fat (g)", Some(5.0), Some(10.0)),    // deficiency
            standard("Protein (g)", Some(3.0), Some(10.0)), // excess
        ];
        let set = compute_comparison_set(&food(values), &standards);

        assert_eq!(set.safe_nutrients, 1);
        assert_eq!(set.safety_percentage, 33);
        assert_eq!(set.comparisons[0].status, NutrientStatus::Normal);
        assert!(set.comparisons[0].in_range);
        assert_eq!(set.comparisons[1].status_text, "Deficient");
        assert_eq!(set.comparisons[2].status, NutrientStatus::Excess);
        assert_eq!(set.comparisons[2].food_value, Some(20.0));
    }

    #[test]
    fn test_unknown_nutrient_uses_missing_value() {
        let standards = vec![standard("Vitamin D (mg)", Some(1.0), None)];
        let set = compute_comparison_set(&food(NutrientValues::default()), &standards);
        assert_eq!(set.comparisons[0].food_value, None);
        assert_eq!(set.comparisons[0].status, NutrientStatus::Deficiency);
    }

    #[test]
    fn test_empty_standards() {
        let set = compute_comparison_set(&food(NutrientValues::default()), &[]);
        assert_eq!(set.total_nutrients, 0);
        assert_eq!(set.safety_percentage, 0);
    }

    #[test]
    fn test_safety_percentage_bounds() {
        for total in 0..30 {
            for safe in 0..=total {
                let pct = safety_percentage(safe, total);
                assert!(pct <= 100);
            }
        }
        assert_eq!(safety_percentage(21, 21), 100);
        assert_eq!(safety_percentage(1, 2), 50);
        assert_eq!(safety_percentage(2, 3), 67);
    }
}

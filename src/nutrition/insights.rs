//! Textual insights for a multi-food comparison

use serde::Serialize;

use crate::models::{Food, Nutrient};
use super::format::format_food_name;

/// Energy above this (kJ) triggers portion-control advice
const HIGH_ENERGY_KJ: f64 = 2000.0;

/// Average protein (g) considered good
const GOOD_PROTEIN_G: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Positive,
    Highlight,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightCard {
    pub title: &'static str,
    pub tone: InsightTone,
    pub lines: Vec<String>,
    pub recommendation: &'static str,
}

struct NutrientSummary {
    average: f64,
    highest: f64,
    highest_food: String,
}

/// Average and first-highest value, missing values counted as 0
fn summarize(foods: &[Food], nutrient: Nutrient) -> Option<NutrientSummary> {
    let first = foods.first()?;
    let values: Vec<f64> = foods.iter().map(|f| f.value(nutrient).unwrap_or(0.0)).collect();

    let mut highest = values[0];
    let mut highest_food = first;
    for (food, value) in foods.iter().zip(&values).skip(1) {
        if *value > highest {
            highest = *value;
            highest_food = food;
        }
    }

    Some(NutrientSummary {
        average: values.iter().sum::<f64>() / values.len() as f64,
        highest,
        highest_food: format_food_name(&highest_food.name),
    })
}

/// Energy, protein and variety cards. Empty when there are no foods.
pub fn generate_insights(foods: &[Food]) -> Vec<InsightCard> {
    let (Some(energy), Some(protein)) = (
        summarize(foods, Nutrient::Energy),
        summarize(foods, Nutrient::Protein),
    ) else {
        return Vec::new();
    };

    let high_energy = energy.highest > HIGH_ENERGY_KJ;
    let energy_card = InsightCard {
        title: "Energy Analysis",
        tone: if high_energy { InsightTone::Highlight } else { InsightTone::Positive },
        lines: vec![
            format!("Average energy: {:.0} kJ", energy.average),
            format!("Highest: {} ({:.0} kJ)", energy.highest_food, energy.highest),
        ],
        recommendation: if high_energy {
            "Some selected foods are high in energy. Consider portion control."
        } else {
            "Energy levels are moderate. Good for balanced nutrition."
        },
    };

    let good_protein = protein.average >= GOOD_PROTEIN_G;
    let protein_card = InsightCard {
        title: "Protein Analysis",
        tone: if good_protein { InsightTone::Positive } else { InsightTone::Highlight },
        lines: vec![
            format!("Average protein: {:.1} g", protein.average),
            format!("Highest: {} ({:.1} g)", protein.highest_food, protein.highest),
        ],
        recommendation: if good_protein {
            "Good protein content. Excellent for growth and development."
        } else {
            "Consider adding more protein-rich foods to meet daily requirements."
        },
    };

    let variety_card = InsightCard {
        title: "Nutritional Variety",
        tone: InsightTone::Positive,
        lines: vec![format!("You've selected {} different foods for comparison.", foods.len())],
        recommendation: "Comparing multiple foods helps identify the best nutritional choices for balanced meals.",
    };

    vec![energy_card, protein_card, variety_card]
}

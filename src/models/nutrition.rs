//! Per-food nutrient values
//!
//! One nullable value per catalog nutrient. A missing lab value is `None`,
//! never an absent key.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::Nutrient;

/// Nutrient values for one food, serialized as a map keyed by catalog label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientValues {
    #[serde(rename = "Energy (kJ)", default)]
    pub energy_kj: Option<f64>,
    #[serde(rename = "Protein (g)", default)]
    pub protein_g: Option<f64>,
    #[serde(rename = "Fat (g)", default)]
    pub fat_g: Option<f64>,
    #[serde(rename = "Carbohydrates (g)", default)]
    pub carbohydrates_g: Option<f64>,
    #[serde(rename = "Dietary Fiber (g)", default)]
    pub dietary_fiber_g: Option<f64>,
    #[serde(rename = "PUFA (g)", default)]
    pub pufa_g: Option<f64>,
    #[serde(rename = "Cholesterol (mg)", default)]
    pub cholesterol_mg: Option<f64>,
    #[serde(rename = "Vitamin A (mg)", default)]
    pub vitamin_a_mg: Option<f64>,
    #[serde(rename = "Vitamin E (eq.) (mg)", default)]
    pub vitamin_e_mg: Option<f64>,
    #[serde(rename = "Vitamin B1 (mg)", default)]
    pub vitamin_b1_mg: Option<f64>,
    #[serde(rename = "Vitamin B2 (mg)", default)]
    pub vitamin_b2_mg: Option<f64>,
    #[serde(rename = "Vitamin B6 (mg)", default)]
    pub vitamin_b6_mg: Option<f64>,
    #[serde(rename = "Total Folic Acid (µg)", default)]
    pub total_folic_acid_ug: Option<f64>,
    #[serde(rename = "Vitamin C (mg)", default)]
    pub vitamin_c_mg: Option<f64>,
    #[serde(rename = "Sodium (mg)", default)]
    pub sodium_mg: Option<f64>,
    #[serde(rename = "Potassium (mg)", default)]
    pub potassium_mg: Option<f64>,
    #[serde(rename = "Calcium (mg)", default)]
    pub calcium_mg: Option<f64>,
    #[serde(rename = "Magnesium (mg)", default)]
    pub magnesium_mg: Option<f64>,
    #[serde(rename = "Phosphorus (mg)", default)]
    pub phosphorus_mg: Option<f64>,
    #[serde(rename = "Iron (mg)", default)]
    pub iron_mg: Option<f64>,
    #[serde(rename = "Zinc (mg)", default)]
    pub zinc_mg: Option<f64>,
}

impl NutrientValues {
    /// Value for a nutrient, `None` when unmeasured
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        *self.slot(nutrient)
    }

    pub fn set(&mut self, nutrient: Nutrient, value: Option<f64>) {
        *self.slot_mut(nutrient) = value;
    }

    /// Builder-style setter
    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, Some(value));
        self
    }

    /// Iterate values in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, Option<f64>)> + '_ {
        Nutrient::ALL.iter().map(move |n| (*n, self.get(*n)))
    }

    /// Read all nutrient columns from a `foods` row
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let mut values = Self::default();
        for nutrient in Nutrient::ALL {
            values.set(nutrient, row.get(nutrient.column())?);
        }
        Ok(values)
    }

    fn slot(&self, nutrient: Nutrient) -> &Option<f64> {
        match nutrient {
            Nutrient::Energy => &self.energy_kj,
            Nutrient::Protein => &self.protein_g,
            Nutrient::Fat => &self.fat_g,
            Nutrient::Carbohydrates => &self.carbohydrates_g,
            Nutrient::DietaryFiber => &self.dietary_fiber_g,
            Nutrient::Pufa => &self.pufa_g,
            Nutrient::Cholesterol => &self.cholesterol_mg,
            Nutrient::VitaminA => &self.vitamin_a_mg,
            Nutrient::VitaminE => &self.vitamin_e_mg,
            Nutrient::VitaminB1 => &self.vitamin_b1_mg,
            Nutrient::VitaminB2 => &self.vitamin_b2_mg,
            Nutrient::VitaminB6 => &self.vitamin_b6_mg,
            Nutrient::FolicAcid => &self.total_folic_acid_ug,
            Nutrient::VitaminC => &self.vitamin_c_mg,
            Nutrient::Sodium => &self.sodium_mg,
            Nutrient::Potassium => &self.potassium_mg,
            Nutrient::Calcium => &self.calcium_mg,
            Nutrient::Magnesium => &self.magnesium_mg,
            Nutrient::Phosphorus => &self.phosphorus_mg,
            Nutrient::Iron => &self.iron_mg,
            Nutrient::Zinc => &self.zinc_mg,
        }
    }

    fn slot_mut(&mut self, nutrient: Nutrient) -> &mut Option<f64> {
        match nutrient {
            Nutrient::Energy => &mut self.energy_kj,
            Nutrient::Protein => &mut self.protein_g,
            Nutrient::Fat => &mut self.fat_g,
            Nutrient::Carbohydrates => &mut self.carbohydrates_g,
            Nutrient::DietaryFiber => &mut self.dietary_fiber_g,
            Nutrient::Pufa => &mut self.pufa_g,
            Nutrient::Cholesterol => &mut self.cholesterol_mg,
            Nutrient::VitaminA => &mut self.vitamin_a_mg,
            Nutrient::VitaminE => &mut self.vitamin_e_mg,
            Nutrient::VitaminB1 => &mut self.vitamin_b1_mg,
            Nutrient::VitaminB2 => &mut self.vitamin_b2_mg,
            Nutrient::VitaminB6 => &mut self.vitamin_b6_mg,
            Nutrient::FolicAcid => &mut self.total_folic_acid_ug,
            Nutrient::VitaminC => &mut self.vitamin_c_mg,
            Nutrient::Sodium => &mut self.sodium_mg,
            Nutrient::Potassium => &mut self.potassium_mg,
            Nutrient::Calcium => &mut self.calcium_mg,
            Nutrient::Magnesium => &mut self.magnesium_mg,
            Nutrient::Phosphorus => &mut self.phosphorus_mg,
            Nutrient::Iron => &mut self.iron_mg,
            Nutrient::Zinc => &mut self.zinc_mg,
        }
    }
}

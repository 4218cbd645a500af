//! Nutrient catalog
//!
//! The fixed, ordered set of 21 nutrients tracked for every food.

use serde::{Serialize, Serializer};

/// A tracked nutrient. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nutrient {
    Energy,
    Protein,
    Fat,
    Carbohydrates,
    DietaryFiber,
    Pufa,
    Cholesterol,
    VitaminA,
    VitaminE,
    VitaminB1,
    VitaminB2,
    VitaminB6,
    FolicAcid,
    VitaminC,
    Sodium,
    Potassium,
    Calcium,
    Magnesium,
    Phosphorus,
    Iron,
    Zinc,
}

impl Nutrient {
    /// All nutrients in catalog order
    pub const ALL: [Nutrient; 21] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrates,
        Nutrient::DietaryFiber,
        Nutrient::Pufa,
        Nutrient::Cholesterol,
        Nutrient::VitaminA,
        Nutrient::VitaminE,
        Nutrient::VitaminB1,
        Nutrient::VitaminB2,
        Nutrient::VitaminB6,
        Nutrient::FolicAcid,
        Nutrient::VitaminC,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Calcium,
        Nutrient::Magnesium,
        Nutrient::Phosphorus,
        Nutrient::Iron,
        Nutrient::Zinc,
    ];

    /// Nutrients shown in the "all major nutrients" chart
    pub const MAJOR: [Nutrient; 4] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrates,
    ];

    /// Canonical label, also the key used by standards
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Energy => "Energy (kJ)",
            Nutrient::Protein => "Protein (g)",
            Nutrient::Fat => "Fat (g)",
            Nutrient::Carbohydrates => "Carbohydrates (g)",
            Nutrient::DietaryFiber => "Dietary Fiber (g)",
            Nutrient::Pufa => "PUFA (g)",
            Nutrient::Cholesterol => "Cholesterol (mg)",
            Nutrient::VitaminA => "Vitamin A (mg)",
            Nutrient::VitaminE => "Vitamin E (eq.) (mg)",
            Nutrient::VitaminB1 => "Vitamin B1 (mg)",
            Nutrient::VitaminB2 => "Vitamin B2 (mg)",
            Nutrient::VitaminB6 => "Vitamin B6 (mg)",
            Nutrient::FolicAcid => "Total Folic Acid (µg)",
            Nutrient::VitaminC => "Vitamin C (mg)",
            Nutrient::Sodium => "Sodium (mg)",
            Nutrient::Potassium => "Potassium (mg)",
            Nutrient::Calcium => "Calcium (mg)",
            Nutrient::Magnesium => "Magnesium (mg)",
            Nutrient::Phosphorus => "Phosphorus (mg)",
            Nutrient::Iron => "Iron (mg)",
            Nutrient::Zinc => "Zinc (mg)",
        }
    }

    /// Column name in the `foods` table
    pub fn column(&self) -> &'static str {
        match self {
            Nutrient::Energy => "energy_kj",
            Nutrient::Protein => "protein_g",
            Nutrient::Fat => "fat_g",
            Nutrient::Carbohydrates => "carbohydrates_g",
            Nutrient::DietaryFiber => "dietary_fiber_g",
            Nutrient::Pufa => "pufa_g",
            Nutrient::Cholesterol => "cholesterol_mg",
            Nutrient::VitaminA => "vitamin_a_mg",
            Nutrient::VitaminE => "vitamin_e_mg",
            Nutrient::VitaminB1 => "vitamin_b1_mg",
            Nutrient::VitaminB2 => "vitamin_b2_mg",
            Nutrient::VitaminB6 => "vitamin_b6_mg",
            Nutrient::FolicAcid => "total_folic_acid_ug",
            Nutrient::VitaminC => "vitamin_c_mg",
            Nutrient::Sodium => "sodium_mg",
            Nutrient::Potassium => "potassium_mg",
            Nutrient::Calcium => "calcium_mg",
            Nutrient::Magnesium => "magnesium_mg",
            Nutrient::Phosphorus => "phosphorus_mg",
            Nutrient::Iron => "iron_mg",
            Nutrient::Zinc => "zinc_mg",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Energy => "kJ",
            Nutrient::Protein
            | Nutrient::Fat
            | Nutrient::Carbohydrates
            | Nutrient::DietaryFiber
            | Nutrient::Pufa => "g",
            Nutrient::FolicAcid => "µg",
            _ => "mg",
        }
    }

    /// Label with the unit suffix stripped, e.g. "Protein"
    pub fn short_label(&self) -> &'static str {
        let key = self.key();
        match key.find(" (") {
            Some(idx) => &key[..idx],
            None => key,
        }
    }

    /// Look up a nutrient by its canonical label (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.key().eq_ignore_ascii_case(key))
    }
}

impl Serialize for Nutrient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

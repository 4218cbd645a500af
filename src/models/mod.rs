//! Data models
//!
//! Rust structs representing database entities.

mod food;
mod nutrient;
mod nutrition;
mod standard;

pub use food::{Food, FoodCreate, FoodUpdate};
pub use nutrient::Nutrient;
pub use nutrition::NutrientValues;
pub use standard::{Standard, StandardUpsert};

//! Nutrition analysis module
//!
//! Status classification, single- and multi-food comparison against the
//! standards, insights, charts and display formatting.

pub mod chart;
pub mod comparison;
pub mod format;
pub mod insights;
pub mod multi;
pub mod status;

pub use chart::{
    chart_data, nutrition_chart_data, render_bar_chart, ChartData, ChartMode, ChartSeries,
    MAX_NUTRITION_CHART_NUTRIENTS,
};
pub use comparison::{compute_comparison_set, safety_percentage, Comparison, ComparisonSet};
pub use format::{format_bound, format_food_name, format_nutrient_value};
pub use insights::{generate_insights, InsightCard, InsightTone};
pub use multi::{
    compute_multi_comparison, recommended_range, ComparedFood, ComparisonCell,
    InsufficientFoodsError, MultiComparisonRow, MultiComparisonTable, MAX_COMPARISON_FOODS,
    MIN_COMPARISON_FOODS,
};
pub use status::{classify, NutrientStatus};

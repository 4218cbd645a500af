//! Nutrition analysis tools
//!
//! Single-food analysis, multi-food comparison and PNG charts.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::context::AppContext;
use crate::error::{FnaError, FnaResult};
use crate::models::{Food, Nutrient};
use crate::nutrition::{
    chart_data, compute_comparison_set, compute_multi_comparison, format_food_name,
    generate_insights, nutrition_chart_data, render_bar_chart, ChartData, ChartMode,
    ComparisonSet, InsightCard, MultiComparisonTable, MIN_COMPARISON_FOODS,
};
use super::lookup;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 600;

#[derive(Debug, Serialize)]
pub struct NutritionAnalysisResponse {
    pub food: Food,
    pub display_name: String,
    pub analysis: ComparisonSet,
}

#[derive(Debug, Serialize)]
pub struct ComparisonSummary {
    pub foods_compared: usize,
    pub nutrients_analyzed: usize,
    /// Requested names with no matching food
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareFoodsResponse {
    pub table: MultiComparisonTable,
    pub insights: Vec<InsightCard>,
    pub summary: ComparisonSummary,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub success: bool,
    pub output_path: PathBuf,
    pub title: String,
    pub foods: Vec<String>,
    pub size_bytes: usize,
}

/// Compare one food against every standard
pub fn get_nutrition_analysis(ctx: &AppContext, name: &str) -> FnaResult<NutritionAnalysisResponse> {
    let name = name.trim();
    let food = lookup::food_by_name(ctx, name)?
        .ok_or_else(|| FnaError::NotFound(format!("Food '{}'", name)))?;
    let standards = lookup::standards(ctx)?;

    let analysis = compute_comparison_set(&food, &standards);
    tracing::debug!(
        "analyzed {}: {}/{} nutrients in range",
        food.name,
        analysis.safe_nutrients,
        analysis.total_nutrients
    );

    Ok(NutritionAnalysisResponse {
        display_name: format_food_name(&food.name),
        food,
        analysis,
    })
}

struct ResolvedFoods {
    foods: Vec<Food>,
    missing: Vec<String>,
    /// Distinct names asked for
    requested: usize,
}

/// Parse and check a comparison name list, then load the foods in request order
fn resolve_comparison_foods(ctx: &AppContext, names: &str) -> FnaResult<ResolvedFoods> {
    let requested = lookup::dedup_names(lookup::parse_name_list(names));
    let max = ctx.config.max_comparison_items;

    if requested.len() < MIN_COMPARISON_FOODS {
        return Err(FnaError::InvalidInput(format!(
            "at least {} food names are required, got {}",
            MIN_COMPARISON_FOODS,
            requested.len()
        )));
    }
    if requested.len() > max {
        return Err(FnaError::InvalidInput(format!(
            "at most {} foods can be compared, got {}",
            max,
            requested.len()
        )));
    }

    let foods = lookup::foods_by_names(ctx, &requested)?;
    if foods.len() < MIN_COMPARISON_FOODS {
        return Err(FnaError::InsufficientFoods {
            found: foods.len(),
            requested: requested.len(),
        });
    }

    let requested_count = requested.len();
    let missing = requested
        .into_iter()
        .filter(|name| !foods.iter().any(|f| f.name.to_lowercase() == name.to_lowercase()))
        .collect();

    Ok(ResolvedFoods {
        foods,
        missing,
        requested: requested_count,
    })
}

/// Side-by-side comparison of 2 or more foods (comma-separated names)
pub fn compare_foods(ctx: &AppContext, names: &str) -> FnaResult<CompareFoodsResponse> {
    let ResolvedFoods {
        foods,
        missing,
        requested,
    } = resolve_comparison_foods(ctx, names)?;
    let standards = lookup::standards(ctx)?;

    let table = compute_multi_comparison(&foods, &standards)
        .map_err(|e| FnaError::insufficient_foods(e, requested))?;
    let insights = generate_insights(&foods);

    tracing::info!("compared {} foods", foods.len());

    Ok(CompareFoodsResponse {
        summary: ComparisonSummary {
            foods_compared: table.foods.len(),
            nutrients_analyzed: table.rows.len(),
            missing,
        },
        table,
        insights,
    })
}

/// Render a comparison bar chart PNG to `output_path`.
///
/// `nutrient` is `"all"` (the default) for the major nutrients or a catalog label.
pub fn generate_comparison_chart(
    ctx: &AppContext,
    names: &str,
    nutrient: Option<&str>,
    output_path: &Path,
) -> FnaResult<ChartResponse> {
    let mode_text = nutrient.unwrap_or("all");
    let mode = ChartMode::parse(mode_text).ok_or_else(|| {
        FnaError::InvalidInput(format!(
            "unknown chart nutrient '{}', expected 'all' or one of: {}",
            mode_text,
            Nutrient::ALL.map(|n| n.key()).join(", ")
        ))
    })?;

    let ResolvedFoods { foods, .. } = resolve_comparison_foods(ctx, names)?;
    let data = chart_data(&foods, mode);
    let size_bytes = write_chart(&data, output_path)?;

    Ok(ChartResponse {
        success: true,
        output_path: output_path.to_path_buf(),
        title: data.title,
        foods: foods.iter().map(|f| format_food_name(&f.name)).collect(),
        size_bytes,
    })
}

/// Render one food's values against its bounded standards to `output_path`
pub fn generate_nutrition_chart(
    ctx: &AppContext,
    name: &str,
    output_path: &Path,
) -> FnaResult<ChartResponse> {
    let name = name.trim();
    let food = lookup::food_by_name(ctx, name)?
        .ok_or_else(|| FnaError::NotFound(format!("Food '{}'", name)))?;
    let standards = lookup::standards(ctx)?;

    let data = nutrition_chart_data(&compute_comparison_set(&food, &standards));
    if data.categories.is_empty() {
        return Err(FnaError::NotFound(format!(
            "Nutrients with both a value and a bounded standard for '{}'",
            food.name
        )));
    }
    let size_bytes = write_chart(&data, output_path)?;

    Ok(ChartResponse {
        success: true,
        output_path: output_path.to_path_buf(),
        title: data.title,
        foods: vec![format_food_name(&food.name)],
        size_bytes,
    })
}

/// Render `data` and write the PNG, creating parent directories. Returns the file size.
fn write_chart(data: &ChartData, output_path: &Path) -> FnaResult<usize> {
    let png = render_bar_chart(data, CHART_WIDTH, CHART_HEIGHT).map_err(FnaError::Chart)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, &png)?;
    tracing::info!("wrote chart '{}' to {}", data.title, output_path.display());

    Ok(png.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCreate, NutrientValues, Standard, StandardUpsert};
    use crate::nutrition::NutrientStatus;

    fn add(ctx: &AppContext, name: &str, energy: f64, protein: f64) {
        ctx.database
            .with_conn(|conn| {
                Food::create(conn, &FoodCreate {
                    name: name.to_string(),
                    values: NutrientValues::default()
                        .with(Nutrient::Energy, energy)
                        .with(Nutrient::Protein, protein),
                })
            })
            .unwrap();
    }

    fn standard(ctx: &AppContext, nutrient: &str, min: Option<f64>, max: Option<f64>) {
        ctx.database
            .with_conn(|conn| {
                Standard::upsert(conn, &StandardUpsert {
                    nutrient: nutrient.to_string(),
                    minimum: min,
                    maximum: max,
                    ..Default::default()
                })
            })
            .unwrap();
    }

    fn setup() -> AppContext {
        let ctx = AppContext::for_tests();
        add(&ctx, "Nasi Putih", 500.0, 2.0);
        add(&ctx, "Tempe Goreng", 900.0, 18.0);
        add(&ctx, "tahu", 300.0, 8.0);
        standard(&ctx, "Energy (kJ)", None, Some(2000.0));
        standard(&ctx, "Protein (g)", Some(3.0), Some(10.0));
        ctx
    }

    #[test]
    fn test_nutrition_analysis() {
        let ctx = setup();
        let result = get_nutrition_analysis(&ctx, " tempe goreng ").unwrap();

        assert_eq!(result.display_name, "Tempe Goreng");
        assert_eq!(result.analysis.total_nutrients, 2);
        assert_eq!(result.analysis.safe_nutrients, 1);
        assert_eq!(result.analysis.safety_percentage, 50);
        // Standards come back sorted by nutrient label
        assert_eq!(result.analysis.comparisons[0].nutrient, "Energy (kJ)");
        assert_eq!(result.analysis.comparisons[1].status, NutrientStatus::Excess);
    }

    #[test]
    fn test_nutrition_analysis_not_found() {
        let ctx = setup();
        assert!(matches!(get_nutrition_analysis(&ctx, "rendang"), Err(FnaError::NotFound(_))));
    }

    #[test]
    fn test_compare_foods_in_request_order() {
        let ctx = setup();
        let result = compare_foods(&ctx, "Tempe Goreng, nasi putih").unwrap();

        assert_eq!(result.table.foods[0].name, "Tempe Goreng");
        assert_eq!(result.table.foods[1].name, "Nasi Putih");
        assert_eq!(result.summary.foods_compared, 2);
        assert_eq!(result.summary.nutrients_analyzed, Nutrient::ALL.len());
        assert!(result.summary.missing.is_empty());
        assert_eq!(result.table.rows[0].recommended_range, "≤ 2000");
        assert!(result.table.rows[0].cells.iter().all(|c| c.status == NutrientStatus::Normal));
        assert_eq!(result.insights.len(), 3);
    }

    #[test]
    fn test_compare_foods_reports_missing() {
        let ctx = setup();
        let result = compare_foods(&ctx, "tahu, rendang, nasi putih").unwrap();
        assert_eq!(result.summary.foods_compared, 2);
        assert_eq!(result.summary.missing, vec!["rendang"]);
    }

    #[test]
    fn test_compare_foods_name_count_limits() {
        let ctx = setup();
        assert!(matches!(compare_foods(&ctx, "tahu"), Err(FnaError::InvalidInput(_))));
        assert!(matches!(compare_foods(&ctx, "tahu, TAHU"), Err(FnaError::InvalidInput(_))));
        assert!(matches!(compare_foods(&ctx, "a, b, c, d, e, f"), Err(FnaError::InvalidInput(_))));
    }

    #[test]
    fn test_compare_foods_insufficient() {
        let ctx = setup();
        match compare_foods(&ctx, "tahu, rendang, sate") {
            Err(FnaError::InsufficientFoods { found, requested }) => {
                assert_eq!(found, 1);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientFoods, got {:?}", other.map(|r| r.summary)),
        }
    }

    #[test]
    fn test_chart_rejects_unknown_nutrient() {
        let ctx = setup();
        let path = std::env::temp_dir().join("fna-chart-unknown.png");
        assert!(matches!(
            generate_comparison_chart(&ctx, "tahu, nasi putih", Some("Vitamin D (mg)"), &path),
            Err(FnaError::InvalidInput(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_comparison_chart_written_to_disk() {
        let ctx = setup();
        let path = std::env::temp_dir()
            .join(format!("fna-chart-{}", std::process::id()))
            .join("comparison.png");

        let result = generate_comparison_chart(&ctx, "tahu, Tempe Goreng", None, &path).unwrap();
        assert!(result.success);
        assert!(path.exists());
        assert!(result.size_bytes > 0);
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, result.size_bytes);
        assert_eq!(result.title, "Major Nutrients Comparison");
        assert_eq!(result.foods, vec!["Tahu", "Tempe Goreng"]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_nutrition_chart_written_to_disk() {
        let ctx = setup();
        let path = std::env::temp_dir().join(format!("fna-nutrition-{}.png", std::process::id()));

        let result = generate_nutrition_chart(&ctx, "nasi putih", &path).unwrap();
        assert!(path.exists());
        assert!(result.size_bytes > 0);
        assert_eq!(result.title, "Nutrient Comparison: Food vs Standards");
        assert_eq!(result.foods, vec!["Nasi Putih"]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_nutrition_chart_needs_bounded_standards() {
        let ctx = AppContext::for_tests();
        add(&ctx, "tahu", 300.0, 8.0);
        let path = std::env::temp_dir().join("fna-nutrition-empty.png");

        assert!(matches!(
            generate_nutrition_chart(&ctx, "tahu", &path),
            Err(FnaError::NotFound(_))
        ));
        assert!(matches!(
            generate_nutrition_chart(&ctx, "rendang", &path),
            Err(FnaError::NotFound(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_chart_checks_food_count() {
        let ctx = setup();
        let path = std::env::temp_dir().join("fna-chart-count.png");
        assert!(matches!(
            generate_comparison_chart(&ctx, "tahu", None, &path),
            Err(FnaError::InvalidInput(_))
        ));
    }
}

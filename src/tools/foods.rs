//! Food catalog tools
//!
//! Browsing, searching and editing the foods table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::{FnaError, FnaResult};
use crate::models::{Food, FoodCreate, FoodUpdate, Nutrient, NutrientValues};
use crate::nutrition::format_food_name;
use super::lookup;

/// Largest page or search size a caller may request
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// A food plus its display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub display_name: String,
    #[serde(flatten)]
    pub food: Food,
}

impl From<Food> for FoodEntry {
    fn from(food: Food) -> Self {
        Self {
            display_name: format_food_name(&food.name),
            food,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub showing_start: i64,
    pub showing_end: i64,
}

impl Pagination {
    /// `page` and `limit` must be at least 1. Offsets saturate instead of
    /// overflowing, so an oversized page is simply past the end.
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let offset = page_offset(page, limit);
        Self {
            current_page: page,
            total_pages: if total_items > 0 { (total_items - 1) / limit + 1 } else { 0 },
            total_items,
            items_per_page: limit,
            showing_start: if total_items > 0 { offset.saturating_add(1) } else { 0 },
            showing_end: offset.saturating_add(limit).min(total_items),
        }
    }

    pub fn offset(&self) -> i64 {
        page_offset(self.current_page, self.items_per_page)
    }
}

fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFoodsResponse {
    pub foods: Vec<FoodEntry>,
    pub pagination: Pagination,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFoodsResponse {
    pub query: String,
    pub results: Vec<FoodEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MultipleFoodsResponse {
    pub requested: Vec<String>,
    pub foods: Vec<FoodEntry>,
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteFoodResponse {
    pub success: bool,
    pub id: i64,
    pub name: String,
}

/// List foods by name with pagination and an optional substring filter
pub fn list_foods(
    ctx: &AppContext,
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<&str>,
) -> FnaResult<ListFoodsResponse> {
    let page = page.unwrap_or(1).max(1);
    let limit = limit
        .unwrap_or(ctx.config.items_per_page)
        .clamp(1, MAX_PAGE_SIZE);
    let search = search.map(str::trim).filter(|s| !s.is_empty());

    let key = format!("list:{}:{}:{}", page, limit, search.unwrap_or_default());
    ctx.cache.get_or_try_insert(&key, || {
        let (total, foods) = ctx.database.with_conn(|conn| {
            let total = Food::count(conn, search)?;
            let pagination = Pagination::new(page, limit, total);
            let foods = Food::list(conn, search, limit, pagination.offset())?;
            Ok((total, foods))
        })?;

        Ok(ListFoodsResponse {
            foods: foods.into_iter().map(FoodEntry::from).collect(),
            pagination: Pagination::new(page, limit, total),
            search: search.map(str::to_string),
        })
    })
}

/// Search by name: exact, then prefix, then substring matches
pub fn search_foods(ctx: &AppContext, query: &str, limit: Option<i64>) -> FnaResult<SearchFoodsResponse> {
    let query = query.trim();
    if query.is_empty() {
        return Err(FnaError::InvalidInput("search query must not be empty".into()));
    }
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_PAGE_SIZE);

    let key = format!("search:{}:{}", limit, query.to_lowercase());
    ctx.cache.get_or_try_insert(&key, || {
        let foods = ctx.database.with_conn(|conn| Food::search(conn, query, limit))?;
        let results: Vec<FoodEntry> = foods.into_iter().map(FoodEntry::from).collect();
        Ok(SearchFoodsResponse {
            query: query.to_string(),
            total: results.len(),
            results,
        })
    })
}

/// One food by case-insensitive exact name
pub fn get_food(ctx: &AppContext, name: &str) -> FnaResult<FoodEntry> {
    lookup::food_by_name(ctx, name.trim())?
        .map(FoodEntry::from)
        .ok_or_else(|| FnaError::NotFound(format!("Food '{}'", name.trim())))
}

/// Foods for a comma-separated name list. Unknown names are reported, not errors.
pub fn get_multiple_foods(ctx: &AppContext, names: &str) -> FnaResult<MultipleFoodsResponse> {
    let requested = lookup::dedup_names(lookup::parse_name_list(names));
    if requested.is_empty() {
        return Err(FnaError::InvalidInput("at least one food name is required".into()));
    }

    let foods = lookup::foods_by_names(ctx, &requested)?;
    let missing = requested
        .iter()
        .filter(|name| !foods.iter().any(|f| f.name.eq_ignore_ascii_case(name)))
        .cloned()
        .collect();

    Ok(MultipleFoodsResponse {
        requested,
        foods: foods.into_iter().map(FoodEntry::from).collect(),
        missing,
    })
}

/// Map catalog labels to values, rejecting unknown labels and negative numbers
pub fn parse_nutrient_values(
    values: &HashMap<String, Option<f64>>,
) -> FnaResult<Vec<(Nutrient, Option<f64>)>> {
    let mut parsed = Vec::with_capacity(values.len());
    for (key, value) in values {
        let nutrient = Nutrient::from_key(key)
            .ok_or_else(|| FnaError::InvalidInput(format!("unknown nutrient '{}'", key)))?;
        if let Some(v) = value {
            if !v.is_finite() || *v < 0.0 {
                return Err(FnaError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    nutrient.key(),
                    v
                )));
            }
        }
        parsed.push((nutrient, *value));
    }
    // HashMap order is arbitrary
    parsed.sort_by_key(|(n, _)| Nutrient::ALL.iter().position(|x| x == n));
    Ok(parsed)
}

fn validate_name(name: &str) -> FnaResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FnaError::InvalidInput("food name must not be empty".into()));
    }
    Ok(name)
}

pub fn add_food(ctx: &AppContext, name: &str, values: &HashMap<String, Option<f64>>) -> FnaResult<FoodEntry> {
    let name = validate_name(name)?;
    let parsed = parse_nutrient_values(values)?;

    let mut nutrient_values = NutrientValues::default();
    for (nutrient, value) in parsed {
        nutrient_values.set(nutrient, value);
    }

    let food = ctx.database.with_conn(|conn| {
        if Food::get_by_name(conn, name)?.is_some() {
            return Ok(None);
        }
        Food::create(conn, &FoodCreate {
            name: name.to_string(),
            values: nutrient_values,
        })
        .map(Some)
    })?;

    let food = food.ok_or_else(|| FnaError::InvalidInput(format!("food '{}' already exists", name)))?;
    lookup::invalidate(ctx);
    tracing::info!("added food {} ({})", food.id, food.name);
    Ok(food.into())
}

/// Rename a food and/or set individual nutrient values (`null` clears one)
pub fn update_food(
    ctx: &AppContext,
    name: &str,
    new_name: Option<&str>,
    values: &HashMap<String, Option<f64>>,
) -> FnaResult<FoodEntry> {
    let name = validate_name(name)?;
    let new_name = new_name.map(validate_name).transpose()?;
    let parsed = parse_nutrient_values(values)?;

    let existing = ctx
        .database
        .with_conn(|conn| Food::get_by_name(conn, name))?
        .ok_or_else(|| FnaError::NotFound(format!("Food '{}'", name)))?;

    if let Some(new_name) = new_name {
        let clash = ctx.database.with_conn(|conn| Food::get_by_name(conn, new_name))?;
        if clash.is_some_and(|other| other.id != existing.id) {
            return Err(FnaError::InvalidInput(format!("food '{}' already exists", new_name)));
        }
    }

    let update = FoodUpdate {
        name: new_name.map(str::to_string),
        values: parsed,
    };
    let food = ctx
        .database
        .with_conn(|conn| Food::update(conn, existing.id, &update))?
        .ok_or_else(|| FnaError::NotFound(format!("Food '{}'", name)))?;

    lookup::invalidate(ctx);
    tracing::info!("updated food {} ({})", food.id, food.name);
    Ok(food.into())
}

pub fn delete_food(ctx: &AppContext, name: &str) -> FnaResult<DeleteFoodResponse> {
    let name = validate_name(name)?;
    let existing = ctx
        .database
        .with_conn(|conn| Food::get_by_name(conn, name))?
        .ok_or_else(|| FnaError::NotFound(format!("Food '{}'", name)))?;

    let success = ctx.database.with_conn(|conn| Food::delete(conn, existing.id))?;
    lookup::invalidate(ctx);
    tracing::info!("deleted food {} ({})", existing.id, existing.name);

    Ok(DeleteFoodResponse {
        success,
        id: existing.id,
        name: existing.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, Option<f64>)]) -> HashMap<String, Option<f64>> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn seed(ctx: &AppContext, names: &[&str]) {
        for name in names {
            add_food(ctx, name, &values(&[("Energy (kJ)", Some(100.0))])).unwrap();
        }
    }

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(2, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.showing_start, 11);
        assert_eq!(p.showing_end, 20);
        assert_eq!(p.offset(), 10);

        let last = Pagination::new(3, 10, 25);
        assert_eq!(last.showing_end, 25);

        let empty = Pagination::new(1, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.showing_start, 0);
        assert_eq!(empty.showing_end, 0);
    }

    #[test]
    fn test_list_foods_sorted_and_paged() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe goreng", "Ayam Bakar", "nasi putih"]);

        let page = list_foods(&ctx, Some(1), Some(2), None).unwrap();
        let names: Vec<&str> = page.foods.iter().map(|f| f.food.name.as_str()).collect();
        assert_eq!(names, vec!["Ayam Bakar", "nasi putih"]);
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.foods[1].display_name, "Nasi Putih");

        let second = list_foods(&ctx, Some(2), Some(2), None).unwrap();
        assert_eq!(second.foods.len(), 1);
        assert_eq!(second.pagination.showing_start, 3);
    }

    #[test]
    fn test_list_foods_clamps_inputs() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["a"]);

        let page = list_foods(&ctx, Some(-4), Some(1000), Some("  ")).unwrap();
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.items_per_page, 100);
        assert_eq!(page.search, None);

        let default = list_foods(&ctx, None, None, None).unwrap();
        assert_eq!(default.pagination.items_per_page, 10);
    }

    #[test]
    fn test_list_foods_huge_page_is_empty() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["a", "b"]);

        let page = list_foods(&ctx, Some(i64::MAX), Some(100), None).unwrap();
        assert!(page.foods.is_empty());
        assert_eq!(page.pagination.current_page, i64::MAX);
        assert_eq!(page.pagination.total_items, 2);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.showing_end, 2);

        let p = Pagination::new(i64::MAX, 100, 5);
        assert_eq!(p.offset(), i64::MAX);
        assert_eq!(p.showing_start, i64::MAX);
    }

    #[test]
    fn test_list_foods_search_filter() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe goreng", "tahu goreng", "nasi putih"]);

        let page = list_foods(&ctx, None, None, Some("goreng")).unwrap();
        assert_eq!(page.pagination.total_items, 2);
    }

    #[test]
    fn test_search_ranking() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe goreng", "keripik tempe", "tempe"]);

        let result = search_foods(&ctx, "TEMPE", None).unwrap();
        let names: Vec<&str> = result.results.iter().map(|f| f.food.name.as_str()).collect();
        assert_eq!(names, vec!["tempe", "tempe goreng", "keripik tempe"]);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_search_rejects_empty_query() {
        let ctx = AppContext::for_tests();
        assert!(matches!(search_foods(&ctx, "  ", None), Err(FnaError::InvalidInput(_))));
    }

    #[test]
    fn test_get_food_case_insensitive() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["Nasi Putih"]);

        let entry = get_food(&ctx, "NASI PUTIH").unwrap();
        assert_eq!(entry.food.name, "Nasi Putih");
        assert_eq!(entry.food.value(Nutrient::Energy), Some(100.0));
        assert!(matches!(get_food(&ctx, "rendang"), Err(FnaError::NotFound(_))));
    }

    #[test]
    fn test_get_multiple_foods_reports_missing() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["nasi putih", "tempe goreng"]);

        let result = get_multiple_foods(&ctx, "tempe goreng, rendang, nasi putih").unwrap();
        assert_eq!(result.foods.len(), 2);
        assert_eq!(result.foods[0].food.name, "tempe goreng");
        assert_eq!(result.missing, vec!["rendang"]);
    }

    #[test]
    fn test_add_food_validation() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe"]);

        assert!(matches!(add_food(&ctx, " ", &values(&[])), Err(FnaError::InvalidInput(_))));
        assert!(matches!(add_food(&ctx, "TEMPE", &values(&[])), Err(FnaError::InvalidInput(_))));
        assert!(matches!(
            add_food(&ctx, "tahu", &values(&[("Protein (g)", Some(-1.0))])),
            Err(FnaError::InvalidInput(_))
        ));
        assert!(matches!(
            add_food(&ctx, "tahu", &values(&[("Protein", Some(1.0))])),
            Err(FnaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_writes_invalidate_cache() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe"]);
        assert!(get_food(&ctx, "tempe").is_ok());

        delete_food(&ctx, "tempe").unwrap();
        assert!(matches!(get_food(&ctx, "tempe"), Err(FnaError::NotFound(_))));

        assert!(matches!(get_food(&ctx, "tahu"), Err(FnaError::NotFound(_))));
        seed(&ctx, &["tahu"]);
        assert!(get_food(&ctx, "tahu").is_ok());
    }

    #[test]
    fn test_update_food() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe", "tahu"]);

        let updated = update_food(
            &ctx,
            "tempe",
            Some("tempe goreng"),
            &values(&[("Energy (kJ)", None), ("Protein (g)", Some(18.5))]),
        )
        .unwrap();
        assert_eq!(updated.food.name, "tempe goreng");
        assert_eq!(updated.food.value(Nutrient::Energy), None);
        assert_eq!(updated.food.value(Nutrient::Protein), Some(18.5));

        assert!(matches!(
            update_food(&ctx, "tempe goreng", Some("TAHU"), &values(&[])),
            Err(FnaError::InvalidInput(_))
        ));
        assert!(matches!(
            update_food(&ctx, "rendang", None, &values(&[])),
            Err(FnaError::NotFound(_))
        ));
    }

    #[test]
    fn test_rename_to_own_name_with_other_case() {
        let ctx = AppContext::for_tests();
        seed(&ctx, &["tempe"]);
        let updated = update_food(&ctx, "tempe", Some("Tempe"), &values(&[])).unwrap();
        assert_eq!(updated.food.name, "Tempe");
    }

    #[test]
    fn test_delete_missing_food() {
        let ctx = AppContext::for_tests();
        assert!(matches!(delete_food(&ctx, "rendang"), Err(FnaError::NotFound(_))));
    }
}

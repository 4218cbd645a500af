//! Cached storage reads shared by the tool functions

use crate::context::AppContext;
use crate::error::FnaResult;
use crate::models::{Food, Standard};

const STANDARDS_KEY: &str = "standards:all";

/// Split a comma-separated list of names, trimming and dropping blanks
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop names repeated with different case, keeping the first spelling
pub fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}

/// All standards sorted by nutrient label
pub fn standards(ctx: &AppContext) -> FnaResult<Vec<Standard>> {
    ctx.cache.get_or_try_insert(STANDARDS_KEY, || {
        Ok(ctx.database.with_conn(Standard::list_all)?)
    })
}

/// One food by case-insensitive name
pub fn food_by_name(ctx: &AppContext, name: &str) -> FnaResult<Option<Food>> {
    let key = format!("food:{}", name.to_lowercase());
    ctx.cache.get_or_try_insert(&key, || {
        Ok(ctx.database.with_conn(|conn| Food::get_by_name(conn, name))?)
    })
}

/// Foods matching `names`, returned in the order the names were given.
/// Unknown names are skipped.
pub fn foods_by_names(ctx: &AppContext, names: &[String]) -> FnaResult<Vec<Food>> {
    let lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    // JSON array keeps names containing separators apart
    let key = format!("foods:{}", serde_json::Value::from(lowered.clone()));

    ctx.cache.get_or_try_insert(&key, || {
        let found = ctx.database.with_conn(|conn| Food::get_by_names(conn, names))?;
        Ok(lowered
            .iter()
            .filter_map(|name| found.iter().find(|f| f.name.to_lowercase() == *name).cloned())
            .collect())
    })
}

/// Drop every cached read after a write
pub fn invalidate(ctx: &AppContext) {
    let removed = ctx.cache.clear();
    if removed > 0 {
        tracing::debug!("invalidated {} cached entries", removed);
    }
}

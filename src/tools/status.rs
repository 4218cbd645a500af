//! FNA Status Tool
//!
//! Runtime status, cache control and usage instructions.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::context::AppContext;

/// Analysis workflow instructions for AI assistants
pub const ANALYSIS_INSTRUCTIONS: &str = r#"
# FNA Nutrition Analysis Instructions

This guide explains how to analyze foods with the Food Nutrition Analyzer (FNA) tools.

## Overview

Every food stores one value per tracked nutrient (21 in total, e.g. `Energy (kJ)`,
`Protein (g)`, `Total Folic Acid (µg)`). Values may be missing; missing values are
shown as `-` and are treated as 0 when classified.

Each nutrient may have a **standard**: a minimum, a maximum, both, or only a free-text
daily recommendation.

---

## Finding Foods

1. `search_foods` with a partial name. Exact matches come first, then names starting
   with the query, then the rest.
2. `list_foods` to browse alphabetically (`page`, `limit`, optional `search`).
3. `get_food` for one food by exact name (case-insensitive).

Always use the exact stored name returned by search when calling other tools.

---

## Analyzing One Food

**Tool:** `get_nutrition_analysis`

Each standard is compared with the food's value:

| Status | Meaning |
|--------|---------|
| normal | within the recommended range |
| excess | above the maximum |
| deficiency | below the minimum (missing values count as 0) |
| no-standard | the standard has no minimum or maximum |

The summary gives `safe_nutrients` of `total_nutrients` and a rounded
`safety_percentage`.

---

## Comparing Foods

**Tool:** `compare_foods` with 2 to 5 comma-separated names, e.g.
`"Nasi Putih, Tempe Goreng"`.

- Columns follow the order you gave the names.
- Every row is one nutrient, with a status per food and the recommended range
  (`"3 - 10"`, `"≥ 3"`, `"≤ 2000"`, the recommendation text, or `"No standard"`).
- Names that do not match a food are listed under `summary.missing`.
- At least 2 names must resolve to foods.

The response also carries insight cards (energy, protein, variety).

**Charts:** `generate_comparison_chart` writes a PNG bar chart. Use
`nutrient: "all"` for energy, protein, fat and carbohydrates, or a single
nutrient label. `generate_nutrition_chart` charts one food's values
against the minimum and maximum of up to 10 bounded standards.

---

## Maintaining Data

- `add_food`, `update_food`, `delete_food` edit foods. Nutrient values are keyed by
  their full label and must not be negative. `null` clears a value on update.
- `set_standard` creates or replaces the standard for one nutrient.
- Every write clears cached results. `clear_cache` does the same on demand.
"#;

/// Runtime status of the FNA service
#[derive(Debug, Clone, Serialize)]
pub struct FnaStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Cache information
    pub cache_enabled: bool,
    pub cache_entries: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, ctx: &AppContext) -> FnaStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FnaStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            cache_enabled: ctx.cache.is_enabled(),
            cache_entries: ctx.cache.len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub entries_removed: usize,
}

pub fn clear_cache(ctx: &AppContext) -> ClearCacheResponse {
    let entries_removed = ctx.cache.clear();
    tracing::info!("cache cleared ({} entries)", entries_removed);
    ClearCacheResponse {
        success: true,
        entries_removed,
    }
}

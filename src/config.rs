//! Runtime configuration from environment variables

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::nutrition::{MAX_COMPARISON_FOODS, MIN_COMPARISON_FOODS};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 10;
pub const DEFAULT_MAX_COMPARISON_ITEMS: usize = MAX_COMPARISON_FOODS;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub items_per_page: i64,
    pub max_comparison_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            cache_enabled: true,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_comparison_items: DEFAULT_MAX_COMPARISON_ITEMS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or invalid values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup("FNA_DATABASE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        Self {
            database_path,
            cache_enabled: try_load(&lookup, "FNA_CACHE_ENABLED", true),
            cache_ttl_secs: try_load(&lookup, "FNA_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
            items_per_page: try_load(&lookup, "FNA_ITEMS_PER_PAGE", DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, 100),
            max_comparison_items: try_load(
                &lookup,
                "FNA_MAX_COMPARISON_ITEMS",
                DEFAULT_MAX_COMPARISON_ITEMS,
            )
            .clamp(MIN_COMPARISON_FOODS, MAX_COMPARISON_FOODS),
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

/// `<project>/data/fna.db`, resolved from the executable location
fn default_database_path() -> PathBuf {
    let mut path = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("fna.db");
    path
}

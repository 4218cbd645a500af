//! Shared handles passed to every tool function

use std::sync::Arc;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::db::Database;

#[derive(Clone)]
pub struct AppContext {
    pub database: Database,
    pub cache: Arc<ResultCache>,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(database: Database, config: Config) -> Self {
        let cache = ResultCache::new(config.cache_enabled, config.cache_ttl_secs);
        Self {
            database,
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }

    /// Fresh in-memory database with migrations applied
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let database = Database::in_memory().unwrap();
        database.with_conn(crate::db::migrations::run_migrations).unwrap();
        Self::new(database, Config::default())
    }
}

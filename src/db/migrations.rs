//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: foods and nutrition standards
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- FOODS
        -- One row per menu item, nutrient values per portion.
        -- NULL means the lab data is missing.
        -- ============================================
        CREATE TABLE foods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,

            energy_kj REAL,
            protein_g REAL,
            fat_g REAL,
            carbohydrates_g REAL,
            dietary_fiber_g REAL,
            pufa_g REAL,
            cholesterol_mg REAL,
            vitamin_a_mg REAL,
            vitamin_e_mg REAL,
            vitamin_b1_mg REAL,
            vitamin_b2_mg REAL,
            vitamin_b6_mg REAL,
            total_folic_acid_ug REAL,
            vitamin_c_mg REAL,
            sodium_mg REAL,
            potassium_mg REAL,
            calcium_mg REAL,
            magnesium_mg REAL,
            phosphorus_mg REAL,
            iron_mg REAL,
            zinc_mg REAL,

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_foods_name ON foods(name);

        -- ============================================
        -- STANDARDS
        -- Recommended daily range per nutrient (children 1-5 years)
        -- ============================================
        CREATE TABLE standards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nutrient TEXT NOT NULL UNIQUE,       -- catalog label, e.g. "Protein (g)"
            minimum REAL,
            maximum REAL,
            daily_recommendation TEXT,
            function_text TEXT,
            excess_effect TEXT,
            deficiency_effect TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

//! Nutrition standard model
//!
//! Recommended range and guidance text for one nutrient.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Recommended range for a nutrient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standard {
    pub id: i64,
    /// Catalog label, e.g. "Protein (g)"
    pub nutrient: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub daily_recommendation: Option<String>,
    pub function_text: Option<String>,
    pub excess_effect: Option<String>,
    pub deficiency_effect: Option<String>,
}

/// Data for creating or replacing a standard
#[derive(Debug, Clone, Default)]
pub struct StandardUpsert {
    pub nutrient: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub daily_recommendation: Option<String>,
    pub function_text: Option<String>,
    pub excess_effect: Option<String>,
    pub deficiency_effect: Option<String>,
}

impl Standard {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            nutrient: row.get("nutrient")?,
            minimum: row.get("minimum")?,
            maximum: row.get("maximum")?,
            daily_recommendation: row.get("daily_recommendation")?,
            function_text: row.get("function_text")?,
            excess_effect: row.get("excess_effect")?,
            deficiency_effect: row.get("deficiency_effect")?,
        })
    }

    /// True when at least one bound is set
    pub fn has_bounds(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }

    /// All standards, sorted by nutrient label
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM standards ORDER BY nutrient ASC")?;
        let standards = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(standards)
    }

    /// Get the standard for one nutrient label
    pub fn get_by_nutrient(conn: &Connection, nutrient: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM standards WHERE nutrient = ?1 LIMIT 1")?;

        match stmt.query_row([nutrient], Self::from_row) {
            Ok(standard) => Ok(Some(standard)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a standard, or replace every field of the existing one for that nutrient
    pub fn upsert(conn: &Connection, data: &StandardUpsert) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO standards (
                nutrient, minimum, maximum, daily_recommendation,
                function_text, excess_effect, deficiency_effect
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(nutrient) DO UPDATE SET
                minimum = excluded.minimum,
                maximum = excluded.maximum,
                daily_recommendation = excluded.daily_recommendation,
                function_text = excluded.function_text,
                excess_effect = excluded.excess_effect,
                deficiency_effect = excluded.deficiency_effect,
                updated_at = datetime('now')
            "#,
            params![
                data.nutrient,
                data.minimum,
                data.maximum,
                data.daily_recommendation,
                data.function_text,
                data.excess_effect,
                data.deficiency_effect,
            ],
        )?;

        Self::get_by_nutrient(conn, &data.nutrient)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

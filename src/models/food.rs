//! Food model
//!
//! A catalog food item with its per-nutrient values.

use rusqlite::{params, params_from_iter, types::Value, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::{Nutrient, NutrientValues};

/// A food item with nutritional information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub values: NutrientValues,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new food
#[derive(Debug, Clone, Default)]
pub struct FoodCreate {
    pub name: String,
    pub values: NutrientValues,
}

/// Data for updating a food. Each nutrient entry sets (or clears, with `None`) one value.
#[derive(Debug, Clone, Default)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub values: Vec<(Nutrient, Option<f64>)>,
}

impl Food {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            values: NutrientValues::from_row(row)?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Value of one nutrient for this food
    pub fn value(&self, nutrient: Nutrient) -> Option<f64> {
        self.values.get(nutrient)
    }

    /// Insert a new food into the database
    pub fn create(conn: &Connection, data: &FoodCreate) -> DbResult<Self> {
        let columns: Vec<&str> = Nutrient::ALL.iter().map(|n| n.column()).collect();
        let placeholders: Vec<String> = (2..=columns.len() + 1).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO foods (name, {}) VALUES (?1, {})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut values: Vec<Value> = Vec::with_capacity(columns.len() + 1);
        values.push(Value::Text(data.name.clone()));
        for (_, value) in data.values.iter() {
            values.push(value.map_or(Value::Null, Value::Real));
        }

        conn.execute(&sql, params_from_iter(values))?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a food by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(food) => Ok(Some(food)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a food by exact name, ignoring case
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM foods WHERE LOWER(name) = LOWER(?1) LIMIT 1"
        )?;

        match stmt.query_row([name], Self::from_row) {
            Ok(food) => Ok(Some(food)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get every food whose name matches one of `names` (ignoring case).
    ///
    /// Best effort: names that do not exist are skipped, so the result may
    /// be shorter than the input. Rows come back in storage order.
    pub fn get_by_names(conn: &Connection, names: &[String]) -> DbResult<Vec<Self>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("LOWER(?{})", i)).collect();
        let sql = format!(
            "SELECT * FROM foods WHERE LOWER(name) IN ({}) ORDER BY id ASC",
            placeholders.join(", ")
        );

        let mut stmt = conn.prepare(&sql)?;
        let foods = stmt
            .query_map(params_from_iter(names.iter()), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// List foods ordered by name, optionally filtered by a substring
    pub fn list(conn: &Connection, search: Option<&str>, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let foods = match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term);
                let mut stmt = conn.prepare(
                    "SELECT * FROM foods WHERE name LIKE ?1 ORDER BY name ASC LIMIT ?2 OFFSET ?3"
                )?;
                let rows = stmt.query_map(params![pattern, limit, offset], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM foods ORDER BY name ASC LIMIT ?1 OFFSET ?2"
                )?;
                let rows = stmt.query_map(params![limit, offset], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(foods)
    }

    /// Count foods, optionally filtered by a substring
    pub fn count(conn: &Connection, search: Option<&str>) -> DbResult<i64> {
        let count = match search.filter(|s| !s.is_empty()) {
            Some(term) => conn.query_row(
                "SELECT COUNT(*) FROM foods WHERE name LIKE ?1",
                [format!("%{}%", term)],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?,
        };
        Ok(count)
    }

    /// Search by name: exact matches first, then prefix matches, then the rest
    pub fn search(conn: &Connection, query: &str, limit: i64) -> DbResult<Vec<Self>> {
        let contains = format!("%{}%", query);
        let starts = format!("{}%", query);
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM foods
            WHERE name LIKE ?1
            ORDER BY
                CASE
                    WHEN LOWER(name) = LOWER(?2) THEN 1
                    WHEN LOWER(name) LIKE LOWER(?3) THEN 2
                    ELSE 3
                END,
                name ASC
            LIMIT ?4
            "#
        )?;

        let foods = stmt
            .query_map(params![contains, query, starts, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// Update a food's name and/or nutrient values
    pub fn update(conn: &Connection, id: i64, data: &FoodUpdate) -> DbResult<Option<Self>> {
        let mut updates = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(ref name) = data.name {
            values.push(Value::Text(name.clone()));
            updates.push(format!("name = ?{}", values.len()));
        }

        for (nutrient, value) in &data.values {
            values.push(value.map_or(Value::Null, Value::Real));
            updates.push(format!("{} = ?{}", nutrient.column(), values.len()));
        }

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = datetime('now')".to_string());
        values.push(Value::Integer(id));

        let sql = format!(
            "UPDATE foods SET {} WHERE id = ?{}",
            updates.join(", "),
            values.len()
        );
        conn.execute(&sql, params_from_iter(values))?;

        Self::get_by_id(conn, id)
    }

    /// Delete a food. Returns false when nothing was deleted.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let affected = conn.execute("DELETE FROM foods WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn create(conn: &Connection, name: &str, energy: f64) -> Food {
        Food::create(conn, &FoodCreate {
            name: name.to_string(),
            values: NutrientValues::default().with(Nutrient::Energy, energy),
        })
        .unwrap()
    }

    #[test]
    fn test_create_keeps_nulls() {
        let conn = setup();
        let food = create(&conn, "nasi putih", 500.0);
        assert_eq!(food.value(Nutrient::Energy), Some(500.0));
        assert_eq!(food.value(Nutrient::Protein), None);
    }

    #[test]
    fn test_get_by_name_ignores_case() {
        let conn = setup();
        create(&conn, "Tempe Goreng", 900.0);
        let found = Food::get_by_name(&conn, "tempe goreng").unwrap();
        assert_eq!(found.map(|f| f.name), Some("Tempe Goreng".to_string()));
        assert!(Food::get_by_name(&conn, "tempe").unwrap().is_none());
    }

    #[test]
    fn test_names_are_unique_ignoring_case() {
        let conn = setup();
        create(&conn, "Bakso", 300.0);
        let duplicate = Food::create(&conn, &FoodCreate {
            name: "BAKSO".to_string(),
            values: NutrientValues::default(),
        });
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_get_by_names_is_best_effort() {
        let conn = setup();
        create(&conn, "Nasi Putih", 500.0);
        create(&conn, "Tempe Goreng", 900.0);
        let names = vec!["nasi putih".to_string(), "missing".to_string(), "TEMPE GORENG".to_string()];
        let foods = Food::get_by_names(&conn, &names).unwrap();
        assert_eq!(foods.len(), 2);
        assert!(Food::get_by_names(&conn, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_list_and_count_with_search() {
        let conn = setup();
        create(&conn, "ayam goreng", 1.0);
        create(&conn, "tempe goreng", 2.0);
        create(&conn, "nasi putih", 3.0);

        let all = Food::list(&conn, None, 10, 0).unwrap();
        let names: Vec<&str> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ayam goreng", "nasi putih", "tempe goreng"]);

        let page = Food::list(&conn, Some("goreng"), 1, 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "tempe goreng");

        assert_eq!(Food::count(&conn, None).unwrap(), 3);
        assert_eq!(Food::count(&conn, Some("goreng")).unwrap(), 2);
        assert_eq!(Food::count(&conn, Some("")).unwrap(), 3);
    }

    #[test]
    fn test_search_ranks_exact_then_prefix() {
        let conn = setup();
        create(&conn, "es teh manis", 1.0);
        create(&conn, "teh manis", 2.0);
        create(&conn, "teh", 3.0);

        let results = Food::search(&conn, "teh", 10).unwrap();
        let names: Vec<&str> = results.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["teh", "teh manis", "es teh manis"]);
    }

    #[test]
    fn test_update_sets_and_clears_values() {
        let conn = setup();
        let food = create(&conn, "bakso", 300.0);
        let update = FoodUpdate {
            name: Some("bakso sapi".to_string()),
            values: vec![(Nutrient::Energy, None), (Nutrient::Protein, Some(14.0))],
        };
        let updated = Food::update(&conn, food.id, &update).unwrap().unwrap();
        assert_eq!(updated.name, "bakso sapi");
        assert_eq!(updated.value(Nutrient::Energy), None);
        assert_eq!(updated.value(Nutrient::Protein), Some(14.0));
    }

    #[test]
    fn test_delete() {
        let conn = setup();
        let food = create(&conn, "bakso", 300.0);
        assert!(Food::delete(&conn, food.id).unwrap());
        assert!(!Food::delete(&conn, food.id).unwrap());
        assert!(Food::get_by_id(&conn, food.id).unwrap().is_none());
    }
}

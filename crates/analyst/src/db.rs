//! The local campaign metrics database.

use crate::error::{AnalystError, Result};
use crate::rows_to_tsv::{cell_to_json, cell_to_string, rows_to_tsv};
use rusqlite::{Connection, params};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// A query result row, keyed by column name.
pub type JsonRow = Map<String, Value>;

pub struct SeedCampaign {
    pub name: &'static str,
    pub platform: &'static str,
    pub spend: f64,
    pub roas: f64,
    pub status: &'static str,
}

pub const SEED_CAMPAIGNS: [SeedCampaign; 5] = [
    SeedCampaign { name: "Summer_Sale", platform: "Meta", spend: 1200.5, roas: 3.2, status: "Active" },
    SeedCampaign { name: "Winter_Promo", platform: "TikTok", spend: 2500.0, roas: 1.1, status: "Paused" },
    SeedCampaign { name: "Influencer_Reach", platform: "Meta", spend: 500.0, roas: 4.5, status: "Active" },
    SeedCampaign { name: "Black_Friday", platform: "TikTok", spend: 5000.0, roas: 2.8, status: "Scheduled" },
    SeedCampaign { name: "Retargeting_Q1", platform: "Meta", spend: 800.0, roas: 1.9, status: "Active" },
];

const CREATE_CAMPAIGNS: &str = r#"CREATE TABLE campaigns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    platform TEXT,
    spend REAL,
    roas REAL,
    status TEXT
)"#;

/// Handle to the SQLite database. Cloning shares the underlying connection.
///
/// rusqlite is blocking, so every call is moved onto tokio's blocking pool.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!(path = %path.display(), "opening database");
        let conn = tokio::task::spawn_blocking(move || Connection::open(path)).await??;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|_| AnalystError::LockPoisoned)?;
            f(&mut conn)
        })
        .await?
    }

    /// Drops and recreates the `campaigns` table with the demo rows.
    /// Returns the number of rows inserted.
    pub async fn seed(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DROP TABLE IF EXISTS campaigns", [])?;
            tx.execute(CREATE_CAMPAIGNS, [])?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO campaigns (name, platform, spend, roas, status) VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;
                for c in &SEED_CAMPAIGNS {
                    stmt.execute(params![c.name, c.platform, c.spend, c.roas, c.status])?;
                }
            }
            tx.commit()?;
            info!(rows = SEED_CAMPAIGNS.len(), "seeded campaigns table");
            Ok(SEED_CAMPAIGNS.len())
        })
        .await
    }

    pub async fn has_table(&self, name: &str) -> Result<bool> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [&name],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
    }

    pub async fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    /// Schema context for the model: each table's `CREATE` statement followed
    /// by a few sample rows.
    pub async fn table_info(&self, sample_rows: usize) -> Result<String> {
        self.with_conn(move |conn| {
            let tables: Vec<(String, Option<String>)> = conn
                .prepare(
                    "SELECT name, sql FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )?
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<rusqlite::Result<_>>()?;

            let mut out = String::new();
            for (name, create) in tables {
                let mut stmt = conn.prepare(&format!(
                    r#"SELECT * FROM "{}" LIMIT {}"#,
                    name.replace('"', r#""""#),
                    sample_rows
                ))?;
                let columns: Vec<String> =
                    stmt.column_names().into_iter().map(String::from).collect();
                let rows: Vec<Vec<String>> = stmt
                    .query_map([], |row| {
                        (0..columns.len())
                            .map(|i| row.get_ref(i).map(cell_to_string))
                            .collect::<rusqlite::Result<Vec<String>>>()
                    })?
                    .collect::<rusqlite::Result<_>>()?;

                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str(create.as_deref().unwrap_or_default().trim());
                out.push_str(&format!(
                    "\n\n/*\n{} rows from {} table:\n{}*/",
                    sample_rows,
                    name,
                    rows_to_tsv(&columns, &rows)
                ));
            }
            Ok(out)
        })
        .await
    }

    /// Runs a single read-only statement and returns every row as a JSON object.
    pub async fn execute_query(&self, sql: &str) -> Result<Vec<JsonRow>> {
        let sql = sql.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            if !stmt.readonly() {
                return Err(AnalystError::NotReadOnly(sql.clone()));
            }
            let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
            let rows = stmt
                .query_map([], |row| {
                    let mut obj = Map::new();
                    for (i, column) in columns.iter().enumerate() {
                        obj.insert(column.clone(), cell_to_json(row.get_ref(i)?));
                    }
                    Ok(obj)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            debug!(rows = rows.len(), "query returned");
            Ok(rows)
        })
        .await
    }
}

//! Append-only history store for completed search passes.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::info;

use crate::core::types::{parse_positions, SearchRecord};
use crate::core::SearchError;

/// History records returned per query, newest first.
const HISTORY_LIMIT: i64 = 100;

/// Persistence boundary for search records. The engine only ever appends;
/// there is no update or delete path.
#[async_trait]
pub trait SearchResultRepository: Send + Sync {
    /// Persist one record, returning it with its assigned id.
    async fn save(&self, record: SearchRecord) -> Result<SearchRecord, SearchError>;

    /// Records captured within the last `days`, optionally filtered by a
    /// term substring, newest first, capped at 100.
    async fn history(
        &self,
        term_filter: Option<&str>,
        days: u32,
    ) -> Result<Vec<SearchRecord>, SearchError>;

    /// All records for an exact term within the last `days`, newest first.
    async fn by_term(&self, term: &str, days: u32) -> Result<Vec<SearchRecord>, SearchError>;
}

/// SQLite-backed repository. Positions are stored as a comma-separated text
/// column and round-trip without loss or reordering; dates are RFC 3339.
pub struct SqliteSearchResultRepository {
    pool: SqlitePool,
}

impl SqliteSearchResultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` (created if missing) and ensure the schema.
    pub async fn connect(database_url: &str) -> Result<Self, SearchError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database exists per connection; more than one pooled
        // connection would each see their own empty schema.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };
        let repo = Self::new(pool);
        repo.init_schema().await?;
        Ok(repo)
    }

    pub async fn init_schema(&self) -> Result<(), SearchError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS search_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                search_term TEXT NOT NULL,
                target_url TEXT NOT NULL,
                positions TEXT NOT NULL,
                total_results INTEGER NOT NULL,
                search_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_search_results_term_date
             ON search_results (search_term, search_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_record(row: &SqliteRow) -> Result<SearchRecord, SearchError> {
        let search_date: String = row.try_get("search_date")?;
        let search_date = DateTime::parse_from_rfc3339(&search_date)
            .map_err(|e| SearchError::Storage(sqlx::Error::Decode(Box::new(e))))?
            .with_timezone(&Utc);

        let positions: String = row.try_get("positions")?;

        Ok(SearchRecord {
            id: Some(row.try_get("id")?),
            search_term: row.try_get("search_term")?,
            target_url: row.try_get("target_url")?,
            positions: parse_positions(&positions),
            total_results: row.try_get::<i64, _>("total_results")? as u32,
            search_date,
        })
    }
}

fn cutoff(days: u32) -> DateTime<Utc> {
    Utc::now() - Duration::days(i64::from(days))
}

#[async_trait]
impl SearchResultRepository for SqliteSearchResultRepository {
    async fn save(&self, record: SearchRecord) -> Result<SearchRecord, SearchError> {
        let result = sqlx::query(
            r"
            INSERT INTO search_results (search_term, target_url, positions, total_results, search_date)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(&record.search_term)
        .bind(&record.target_url)
        .bind(record.positions_csv())
        .bind(record.total_results as i64)
        .bind(record.search_date.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(id, term = %record.search_term, "search result saved");

        Ok(SearchRecord {
            id: Some(id),
            ..record
        })
    }

    async fn history(
        &self,
        term_filter: Option<&str>,
        days: u32,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        let cutoff = cutoff(days).to_rfc3339();

        let rows = match term_filter.filter(|t| !t.trim().is_empty()) {
            Some(term) => {
                sqlx::query(
                    r"
                    SELECT id, search_term, target_url, positions, total_results, search_date
                    FROM search_results
                    WHERE search_date >= ? AND search_term LIKE ?
                    ORDER BY search_date DESC
                    LIMIT ?
                    ",
                )
                .bind(&cutoff)
                .bind(format!("%{}%", term))
                .bind(HISTORY_LIMIT)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, search_term, target_url, positions, total_results, search_date
                    FROM search_results
                    WHERE search_date >= ?
                    ORDER BY search_date DESC
                    LIMIT ?
                    ",
                )
                .bind(&cutoff)
                .bind(HISTORY_LIMIT)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = records.len(), "retrieved search history");
        Ok(records)
    }

    async fn by_term(&self, term: &str, days: u32) -> Result<Vec<SearchRecord>, SearchError> {
        let rows = sqlx::query(
            r"
            SELECT id, search_term, target_url, positions, total_results, search_date
            FROM search_results
            WHERE search_term = ? AND search_date >= ?
            ORDER BY search_date DESC
            ",
        )
        .bind(term)
        .bind(cutoff(days).to_rfc3339())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }
}

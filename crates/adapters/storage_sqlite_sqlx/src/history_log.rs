//! `SQLite` implementation of [`HistoryLog`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use planthub_app::ports::HistoryLog;
use planthub_domain::error::PlantHubError;
use planthub_domain::history::{HistoryRecord, Readings};
use planthub_domain::time::Timestamp;

use crate::error::StorageError;
use crate::timestamp;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(HistoryRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let recorded_at: String = row.try_get("recorded_at")?;
        Ok(Self(HistoryRecord {
            recorded_at: timestamp::decode(&recorded_at)?,
            readings: Readings {
                temperature_c: row.try_get("temperature_c")?,
                humidity_pct: row.try_get("humidity_pct")?,
                light_lux: row.try_get("light_lux")?,
                eco2_ppm: row.try_get("eco2_ppm")?,
                tvoc_ppb: row.try_get("tvoc_ppb")?,
                soil_moisture_pct: row.try_get("soil_moisture_pct")?,
            },
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO history (recorded_at, temperature_c, humidity_pct, light_lux, eco2_ppm, tvoc_ppb, soil_moisture_pct)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str = r"
    SELECT * FROM (SELECT * FROM history ORDER BY id DESC LIMIT ?)
    ORDER BY id ASC
";

const SELECT_IN_RANGE: &str = r"
    SELECT * FROM history
    WHERE recorded_at >= ? AND recorded_at < ?
    ORDER BY recorded_at ASC, id ASC
";

/// `SQLite`-backed environmental history.
#[derive(Clone)]
pub struct SqliteHistoryLog {
    pool: SqlitePool,
}

impl SqliteHistoryLog {
    /// Create a new log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HistoryLog for SqliteHistoryLog {
    async fn append(&self, record: HistoryRecord) -> Result<(), PlantHubError> {
        let readings = &record.readings;
        sqlx::query(INSERT)
            .bind(timestamp::encode(record.recorded_at))
            .bind(readings.temperature_c)
            .bind(readings.humidity_pct)
            .bind(readings.light_lux)
            .bind(readings.eco2_ppm)
            .bind(readings.tvoc_ppb)
            .bind(readings.soil_moisture_pct)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, PlantHubError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<HistoryRecord>, PlantHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_IN_RANGE)
            .bind(timestamp::encode_bound(from))
            .bind(timestamp::encode_bound(to))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

//! `SQLite` implementation of [`ActionLog`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use planthub_app::ports::ActionLog;
use planthub_domain::action::{ActionKind, ActionRecord};
use planthub_domain::error::PlantHubError;

use crate::error::StorageError;
use crate::timestamp;

struct Wrapper(ActionRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let recorded_at: String = row.try_get("recorded_at")?;
        let kind: String = row.try_get("kind")?;
        let kind: ActionKind = kind
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        Ok(Self(ActionRecord {
            recorded_at: timestamp::decode(&recorded_at)?,
            kind,
            detail: row.try_get("detail")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO actions (recorded_at, kind, detail) VALUES (?, ?, ?)";

const SELECT_RECENT: &str = r"
    SELECT * FROM (SELECT * FROM actions ORDER BY id DESC LIMIT ?)
    ORDER BY id ASC
";

/// `SQLite`-backed actuator audit trail.
#[derive(Clone)]
pub struct SqliteActionLog {
    pool: SqlitePool,
}

impl SqliteActionLog {
    /// Create a new log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActionLog for SqliteActionLog {
    async fn append(&self, record: ActionRecord) -> Result<(), PlantHubError> {
        sqlx::query(INSERT)
            .bind(timestamp::encode(record.recorded_at))
            .bind(record.kind.as_str())
            .bind(&record.detail)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActionRecord>, PlantHubError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

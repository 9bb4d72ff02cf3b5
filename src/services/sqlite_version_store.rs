//! SQLite-backed version store.
//!
//! Every operation opens its own connection. Multi-statement writes run in a
//! transaction that rolls back when dropped uncommitted.

use std::path::{Path, PathBuf};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::domain::{
    AppError, Category, TaskEntry, TaskRecord, Version, VersionName, VersionStats, VersionSummary,
};
use crate::ports::VersionStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS release_versions (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  version_name TEXT UNIQUE NOT NULL,
  created_at_ms INTEGER NOT NULL,
  is_active INTEGER NOT NULL DEFAULT 0,
  override_text TEXT
);

CREATE TABLE IF NOT EXISTS tasks (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  version_id INTEGER NOT NULL REFERENCES release_versions(id) ON DELETE CASCADE,
  ticket_id TEXT NOT NULL,
  category TEXT NOT NULL,
  title TEXT NOT NULL,
  description TEXT NOT NULL,
  body TEXT NOT NULL,
  image TEXT,
  created_at_ms INTEGER NOT NULL,
  UNIQUE(version_id, ticket_id)
);
"#;

const VERSION_COLUMNS: &str = "id, version_name, created_at_ms, is_active, override_text";

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        Category::from_label(label)
            .ok_or_else(|| FromSqlError::Other(format!("unknown category '{label}'").into()))
    }
}

/// Version store persisted in a single SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteVersionStore {
    path: PathBuf,
}

impl SqliteVersionStore {
    /// Open (creating if needed) the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        store.connect()?.execute_batch(SCHEMA)?;
        debug!(path = %store.path.display(), "version store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, AppError> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn version_from_row(row: &Row<'_>) -> rusqlite::Result<Version> {
    Ok(Version {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at_ms: row.get(2)?,
        is_active: row.get(3)?,
        override_text: row.get(4)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRecord> {
    Ok(TaskRecord {
        id: row.get(0)?,
        version_id: row.get(1)?,
        ticket_id: row.get(2)?,
        category: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        body: row.get(6)?,
        image: row.get(7)?,
        created_at_ms: row.get(8)?,
    })
}

/// `CASE` expression ranking categories in document order; unknown labels sort last.
fn category_rank_sql() -> String {
    let arms: String = Category::ALL
        .iter()
        .map(|category| format!(" WHEN '{}' THEN {}", category.label(), category.rank()))
        .collect();
    format!("CASE t.category{} ELSE {} END", arms, Category::ALL.len() + 1)
}

fn find_version_in(conn: &Connection, name: &str) -> Result<Option<Version>, AppError> {
    let version = conn
        .query_row(
            &format!("SELECT {VERSION_COLUMNS} FROM release_versions WHERE version_name = ?1"),
            params![name],
            version_from_row,
        )
        .optional()?;
    Ok(version)
}

fn require_version_id(conn: &Connection, name: &VersionName) -> Result<i64, AppError> {
    conn.query_row(
        "SELECT id FROM release_versions WHERE version_name = ?1",
        params![name.as_str()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::VersionNotFound(name.to_string()))
}

impl VersionStore for SqliteVersionStore {
    fn find_version(&self, name: &VersionName) -> Result<Option<Version>, AppError> {
        let conn = self.connect()?;
        find_version_in(&conn, name.as_str())
    }

    fn get_or_create_version(&self, name: &VersionName) -> Result<Version, AppError> {
        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO release_versions (version_name, created_at_ms, is_active) \
             VALUES (?1, ?2, 0)",
            params![name.as_str(), now_ms()],
        )?;
        if inserted > 0 {
            info!(version = %name, "created version");
        }
        find_version_in(&conn, name.as_str())?
            .ok_or_else(|| AppError::VersionNotFound(name.to_string()))
    }

    fn active_version(&self) -> Result<Option<Version>, AppError> {
        let conn = self.connect()?;
        let version = conn
            .query_row(
                &format!(
                    "SELECT {VERSION_COLUMNS} FROM release_versions WHERE is_active = 1 ORDER BY created_at_ms DESC, id DESC LIMIT 1"
                ),
                [],
                version_from_row,
            )
            .optional()?;
        Ok(version)
    }

    fn create_active_version(&self, name: &VersionName) -> Result<Version, AppError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("UPDATE release_versions SET is_active = 0", [])?;
        tx.execute(
            r#"
            INSERT INTO release_versions (version_name, created_at_ms, is_active)
            VALUES (?1, ?2, 1)
            ON CONFLICT(version_name) DO UPDATE SET is_active = 1
            "#,
            params![name.as_str(), now_ms()],
        )?;
        let version = find_version_in(&tx, name.as_str())?
            .ok_or_else(|| AppError::VersionNotFound(name.to_string()))?;
        tx.commit()?;
        info!(version = %name, "activated version");
        Ok(version)
    }

    fn upsert_task(
        &self,
        version: &VersionName,
        entry: &TaskEntry,
        body: &str,
    ) -> Result<TaskRecord, AppError> {
        let version = self.get_or_create_version(version)?;
        let conn = self.connect()?;
        let created_at_ms = now_ms();
        conn.execute(
            r#"
            INSERT OR REPLACE INTO tasks
              (version_id, ticket_id, category, title, description, body, image, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                version.id,
                entry.ticket_id,
                entry.category.label(),
                entry.title,
                entry.description,
                body,
                entry.image,
                created_at_ms,
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(version = %version.name, ticket = %entry.ticket_id, "saved task");

        Ok(TaskRecord {
            id,
            version_id: version.id,
            ticket_id: entry.ticket_id.clone(),
            category: entry.category,
            title: entry.title.clone(),
            description: entry.description.clone(),
            body: body.to_string(),
            image: entry.image.clone(),
            created_at_ms,
        })
    }

    fn list_tasks(&self, version: &VersionName) -> Result<Vec<TaskRecord>, AppError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT t.id, t.version_id, t.ticket_id, t.category, t.title, t.description,
                   t.body, t.image, t.created_at_ms
            FROM tasks t
            JOIN release_versions v ON v.id = t.version_id
            WHERE v.version_name = ?1
            ORDER BY {}, t.created_at_ms ASC, t.id ASC
            "#,
            category_rank_sql()
        ))?;
        let rows = stmt.query_map(params![version.as_str()], task_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn stats(&self, version: &VersionName) -> Result<VersionStats, AppError> {
        let conn = self.connect()?;
        let Some(found) = find_version_in(&conn, version.as_str())? else {
            return Ok(VersionStats::default());
        };

        let mut stmt = conn.prepare(
            "SELECT category, COUNT(*) FROM tasks WHERE version_id = ?1 GROUP BY category",
        )?;
        let rows = stmt.query_map(params![found.id], |row| {
            Ok((row.get::<_, Category>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut stats =
            VersionStats { overridden: found.override_text.is_some(), ..Default::default() };
        for row in rows {
            let (category, count) = row?;
            stats.record(category, usize::try_from(count).unwrap_or_default());
        }
        Ok(stats)
    }

    fn replace_document(&self, version: &VersionName, text: &str) -> Result<(), AppError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let version_id = require_version_id(&tx, version)?;
        let removed = tx.execute("DELETE FROM tasks WHERE version_id = ?1", params![version_id])?;
        tx.execute(
            "UPDATE release_versions SET override_text = ?1 WHERE id = ?2",
            params![text, version_id],
        )?;
        tx.commit()?;
        info!(version = %version, removed_tasks = removed, "replaced document with manual edit");
        Ok(())
    }

    fn clear_override(&self, version: &VersionName) -> Result<(), AppError> {
        let conn = self.connect()?;
        let updated = conn.execute(
            "UPDATE release_versions SET override_text = NULL WHERE version_name = ?1",
            params![version.as_str()],
        )?;
        if updated == 0 {
            return Err(AppError::VersionNotFound(version.to_string()));
        }
        info!(version = %version, "cleared manual edit");
        Ok(())
    }

    fn delete_version(&self, name: &VersionName) -> Result<(), AppError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let version_id = require_version_id(&tx, name)?;
        let removed = tx.execute("DELETE FROM tasks WHERE version_id = ?1", params![version_id])?;
        tx.execute("DELETE FROM release_versions WHERE id = ?1", params![version_id])?;
        tx.commit()?;
        info!(version = %name, removed_tasks = removed, "deleted version");
        Ok(())
    }

    fn list_versions(&self) -> Result<Vec<VersionSummary>, AppError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT v.version_name, v.created_at_ms, v.is_active, COUNT(t.id)
            FROM release_versions v
            LEFT JOIN tasks t ON t.version_id = v.id
            GROUP BY v.id
            ORDER BY v.created_at_ms DESC, v.id DESC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(VersionSummary {
                name: row.get(0)?,
                created_at_ms: row.get(1)?,
                is_active: row.get(2)?,
                task_count: usize::try_from(row.get::<_, i64>(3)?).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn purge(&self) -> Result<(), AppError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        tx.execute("DELETE FROM release_versions", [])?;
        tx.execute(
            "DELETE FROM sqlite_sequence WHERE name IN ('tasks', 'release_versions')",
            [],
        )?;
        tx.commit()?;
        info!("purged all versions");
        Ok(())
    }
}

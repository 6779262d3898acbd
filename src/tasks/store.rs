use crate::tasks::model::{AuditOperation, AuditRecord, Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, thiserror::Error)]
pub enum TaskStoreError {
    #[error("SQLite failure")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unreadable row in {table}: {reason}")]
    CorruptRow { table: &'static str, reason: String },
    #[error("Store lock poisoned")]
    Poisoned,
    #[error("Cannot create database directory {path}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Local task table plus the `raft_log` audit table, in one SQLite database.
///
/// Passing `":memory:"` keeps everything in memory.
pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    /// Missing parent directories of a file-backed database are created.
    pub fn open(path: &str) -> Result<Self, TaskStoreError> {
        if path != IN_MEMORY {
            create_parent_dir(Path::new(path))?;
        }
        let conn = Connection::open(path)?;
        let store = TaskStore {
            conn: Mutex::new(conn),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<(), TaskStoreError> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            PRAGMA busy_timeout = 5000;

            CREATE TABLE IF NOT EXISTS tasks (
                id              TEXT PRIMARY KEY,
                title           TEXT NOT NULL,
                description     TEXT,
                status          TEXT NOT NULL DEFAULT 'pending',
                priority        TEXT NOT NULL DEFAULT 'medium',
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL,
                created_by_node INTEGER NOT NULL,
                log_index       INTEGER
            );

            CREATE TABLE IF NOT EXISTS raft_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                term        INTEGER NOT NULL,
                log_index   INTEGER NOT NULL,
                operation   TEXT NOT NULL,
                task_id     TEXT NOT NULL,
                data        TEXT,
                committed   INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, TaskStoreError> {
        self.conn.lock().map_err(|_| TaskStoreError::Poisoned)
    }

    // ------- tasks -------

    /// Insert the task, or overwrite the row with the same id.
    pub fn upsert_task(&self, task: &Task) -> Result<(), TaskStoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO tasks (id, title, description, status, priority, created_at, updated_at, created_by_node, log_index)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                status = excluded.status,
                priority = excluded.priority,
                updated_at = excluded.updated_at,
                log_index = excluded.log_index",
            params![
                task.id,
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
                task.created_by_node as i64,
                task.log_index.map(|i| i as i64),
            ],
        )?;
        Ok(())
    }

    pub fn delete_task(&self, id: &str) -> Result<bool, TaskStoreError> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, TaskStoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, title, description, status, priority, created_at, updated_at, created_by_node, log_index
                 FROM tasks WHERE id = ?1",
                params![id],
                TaskRow::from_row,
            )
            .optional()?;

        row.map(TaskRow::into_task).transpose()
    }

    /// All tasks, oldest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, TaskStoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, status, priority, created_at, updated_at, created_by_node, log_index
             FROM tasks ORDER BY created_at, id",
        )?;
        let rows = stmt
            .query_map([], TaskRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    // ------- raft_log -------

    pub fn append_audit(
        &self,
        term: u64,
        log_index: u64,
        operation: AuditOperation,
        task_id: &str,
        data: Option<&serde_json::Value>,
        committed: bool,
    ) -> Result<i64, TaskStoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO raft_log (term, log_index, operation, task_id, data, committed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                term as i64,
                log_index as i64,
                operation.to_string(),
                task_id,
                data.map(|d| d.to_string()),
                committed,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Newest rows first.
    pub fn recent_audit(&self, limit: usize) -> Result<Vec<AuditRecord>, TaskStoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, term, log_index, operation, task_id, data, committed, created_at
             FROM raft_log ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], AuditRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(AuditRow::into_record).collect()
    }
}

// Raw column values. Parsing happens outside rusqlite callbacks so failures map to our error type.
struct TaskRow {
    id: String,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    created_at: String,
    updated_at: String,
    created_by_node: i64,
    log_index: Option<i64>,
}

impl TaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TaskRow {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            priority: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
            created_by_node: row.get(7)?,
            log_index: row.get(8)?,
        })
    }

    fn into_task(self) -> Result<Task, TaskStoreError> {
        let corrupt = |reason: String| TaskStoreError::CorruptRow { table: "tasks", reason };

        Ok(Task {
            status: TaskStatus::from_str(&self.status).map_err(|e| corrupt(e.to_string()))?,
            priority: TaskPriority::from_str(&self.priority).map_err(|e| corrupt(e.to_string()))?,
            created_at: parse_timestamp(&self.created_at).map_err(corrupt)?,
            updated_at: parse_timestamp(&self.updated_at).map_err(corrupt)?,
            id: self.id,
            title: self.title,
            description: self.description,
            created_by_node: self.created_by_node as u64,
            log_index: self.log_index.map(|i| i as u64),
        })
    }
}

struct AuditRow {
    id: i64,
    term: i64,
    log_index: i64,
    operation: String,
    task_id: String,
    data: Option<String>,
    committed: bool,
    created_at: String,
}

impl AuditRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AuditRow {
            id: row.get(0)?,
            term: row.get(1)?,
            log_index: row.get(2)?,
            operation: row.get(3)?,
            task_id: row.get(4)?,
            data: row.get(5)?,
            committed: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<AuditRecord, TaskStoreError> {
        let corrupt = |reason: String| TaskStoreError::CorruptRow {
            table: "raft_log",
            reason,
        };
        let data = match self.data {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| corrupt(e.to_string()))?),
            None => None,
        };

        Ok(AuditRecord {
            id: self.id,
            term: self.term as u64,
            log_index: self.log_index as u64,
            operation: AuditOperation::from_str(&self.operation).map_err(|e| corrupt(e.to_string()))?,
            task_id: self.task_id,
            data,
            committed: self.committed,
            created_at: parse_timestamp(&self.created_at).map_err(corrupt)?,
        })
    }
}

fn create_parent_dir(db_path: &Path) -> Result<(), TaskStoreError> {
    match db_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(|source| TaskStoreError::CreateDir {
            path: dir.display().to_string(),
            source,
        }),
        _ => Ok(()),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("bad timestamp '{}': {}", raw, e))
}

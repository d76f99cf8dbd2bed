//! File-backed document store.
//!
//! Tables are named, ordered lists of task records held in memory; every
//! mutation rewrites the whole snapshot file before returning, so the
//! on-disk state always reflects a consistent table set and mutation
//! order. Missing tables and missing ids are normal "nothing to do"
//! outcomes, not errors.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::task::{Task, TaskPatch};

type TableSet = HashMap<String, Vec<Task>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("duplicate task id {0}")]
    DuplicateId(Uuid),
}

/// In-process store of named task tables, durable via a JSON snapshot
/// file. Reads run concurrently; mutations take the write lock and hold
/// it across the snapshot write, so writes land in mutation order.
pub struct Database {
    tables: RwLock<TableSet>,
    path: PathBuf,
}

impl Database {
    /// Load the snapshot at `path`, or start empty if none exists.
    ///
    /// The empty state is persisted immediately, so the snapshot file
    /// exists after the first startup. A present-but-unreadable snapshot
    /// is a fatal startup error.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tables: TableSet = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(error) if error.kind() == ErrorKind::NotFound => TableSet::new(),
            Err(error) => return Err(error.into()),
        };

        let record_count: usize = tables.values().map(Vec::len).sum();
        tracing::info!(path = %path.display(), tables = tables.len(), records = record_count, "snapshot loaded");

        let db = Self { tables: RwLock::new(tables), path };
        db.flush().await?;
        Ok(db)
    }

    /// Append a record to the named table, creating the table on first
    /// use. Ids are unique within a table; a duplicate is rejected.
    pub async fn insert(&self, table: &str, task: Task) -> Result<Task, StoreError> {
        let mut tables = self.tables.write().await;
        let records = tables.entry(table.to_string()).or_default();
        if records.iter().any(|existing| existing.id == task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        records.push(task.clone());
        self.write_snapshot(&tables).await?;
        Ok(task)
    }

    /// Return the table's records in insertion order, filtered when a
    /// needle is given. Missing table yields an empty list.
    pub async fn select(&self, table: &str, filter: Option<&str>) -> Vec<Task> {
        let tables = self.tables.read().await;
        let Some(records) = tables.get(table) else {
            return Vec::new();
        };
        match filter {
            Some(needle) => records.iter().filter(|task| task.matches(needle)).cloned().collect(),
            None => records.clone(),
        }
    }

    /// Apply a patch to the record with the given id. `None` when the
    /// table or id is absent; nothing is persisted in that case.
    pub async fn update(&self, table: &str, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables
            .get_mut(table)
            .and_then(|records| records.iter_mut().find(|task| task.id == id))
        else {
            return Ok(None);
        };

        task.apply(patch);
        let updated = task.clone();
        self.write_snapshot(&tables).await?;
        Ok(Some(updated))
    }

    /// Remove the record with the given id. `false` when the table or id
    /// is absent; nothing is persisted in that case.
    pub async fn delete(&self, table: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(records) = tables.get_mut(table) else {
            return Ok(false);
        };
        let Some(index) = records.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        records.remove(index);
        self.write_snapshot(&tables).await?;
        Ok(true)
    }

    /// Write the current table set to the snapshot file.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let tables = self.tables.read().await;
        self.write_snapshot(&tables).await
    }

    async fn write_snapshot(&self, tables: &TableSet) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(tables)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::task::TaskDraft;

    fn draft(title: &str, description: &str) -> Task {
        Task::new(TaskDraft { title: title.to_string(), description: description.to_string() })
    }

    async fn open_temp() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("db.json")).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn snapshot_file_exists_after_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let _db = Database::open(&path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn insert_then_select_preserves_order() {
        let (db, _dir) = open_temp().await;

        let first = db.insert("tasks", draft("first", "a")).await.unwrap();
        let second = db.insert("tasks", draft("second", "b")).await.unwrap();

        let tasks = db.select("tasks", None).await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, first.id);
        assert_eq!(tasks[1].id, second.id);
    }

    #[tokio::test]
    async fn select_missing_table_is_empty() {
        let (db, _dir) = open_temp().await;
        assert!(db.select("tasks", None).await.is_empty());
    }

    #[tokio::test]
    async fn filter_spans_all_fields_case_insensitively() {
        let (db, _dir) = open_temp().await;

        let groceries = db.insert("tasks", draft("Buy groceries", "Milk and bread")).await.unwrap();
        db.insert("tasks", draft("Do laundry", "Whites only")).await.unwrap();

        let hits = db.select("tasks", Some("GROCERIES")).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, groceries.id);

        let hits = db.select("tasks", Some("milk")).await;
        assert_eq!(hits.len(), 1);

        let by_id = db.select("tasks", Some(&groceries.id.to_string())).await;
        assert_eq!(by_id.len(), 1);

        let all = db.select("tasks", Some("")).await;
        assert_eq!(all.len(), 2);

        assert!(db.select("tasks", Some("ironing")).await.is_empty());
    }

    #[tokio::test]
    async fn update_applies_patch_and_refreshes_timestamp() {
        let (db, _dir) = open_temp().await;
        let task = db.insert("tasks", draft("title", "desc")).await.unwrap();
        let before = task.updated_at;

        let updated = db
            .update(
                "tasks",
                task.id,
                TaskPatch { completed: Some(true), ..TaskPatch::default() },
            )
            .await
            .unwrap()
            .expect("record exists");

        assert!(updated.completed_at.expect("completed") >= before);
        assert!(updated.updated_at >= before);
        assert_eq!(updated.title, "title");
    }

    #[tokio::test]
    async fn update_missing_id_leaves_table_untouched() {
        let (db, _dir) = open_temp().await;
        let task = db.insert("tasks", draft("title", "desc")).await.unwrap();

        let missing = db.update("tasks", Uuid::new_v4(), TaskPatch::default()).await.unwrap();
        assert!(missing.is_none());

        let tasks = db.select("tasks", None).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].updated_at, task.updated_at);
    }

    #[tokio::test]
    async fn delete_removes_exactly_once() {
        let (db, _dir) = open_temp().await;
        let task = db.insert("tasks", draft("title", "desc")).await.unwrap();

        assert!(db.delete("tasks", task.id).await.unwrap());
        assert!(!db.delete("tasks", task.id).await.unwrap());
        assert!(!db.delete("absent", task.id).await.unwrap());
        assert!(db.select("tasks", None).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let (db, _dir) = open_temp().await;
        let task = db.insert("tasks", draft("title", "desc")).await.unwrap();

        let result = db.insert("tasks", task.clone()).await;
        assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == task.id));
        assert_eq!(db.select("tasks", None).await.len(), 1);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let db = Database::open(&path).await.unwrap();
        let task = db.insert("tasks", draft("persist me", "across restarts")).await.unwrap();
        drop(db);

        let reopened = Database::open(&path).await.unwrap();
        let tasks = reopened.select("tasks", None).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
        assert_eq!(tasks[0].title, "persist me");
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_fatal_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        assert!(matches!(Database::open(&path).await, Err(StoreError::Encoding(_))));
    }
}

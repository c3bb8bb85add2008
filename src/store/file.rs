use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{Result, TodoStore};
use crate::model::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Snapshot-backed store: the whole collection lives in one JSON array
/// document, rewritten after every mutation. A crash between requests
/// loses at most the in-flight one, never committed state.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    todos: Mutex<HashMap<TodoId, Todo>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unparsable snapshot
    /// yields an empty collection; corruption never prevents startup.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let todos = match tokio::fs::read(&path).await {
            Ok(data) => match serde_json::from_slice::<Vec<Todo>>(&data) {
                Ok(todos) => todos.into_iter().map(|todo| (todo.id, todo)).collect(),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "todo snapshot is unparsable, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            // Availability over durability: even a permissions mistake
            // must not keep the server from starting. The kind in the
            // log tells an operator this was not corruption.
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    kind = ?err.kind(),
                    "todo snapshot is unreadable, starting empty"
                );
                HashMap::new()
            }
        };

        Self {
            path,
            todos: Mutex::new(todos),
        }
    }

    /// Rewrites the snapshot wholesale. Writes to a temp file first and
    /// renames it into place, so a crash mid-write leaves the previous
    /// snapshot intact.
    async fn persist(&self, todos: &HashMap<TodoId, Todo>) -> Result<()> {
        let mut snapshot = todos.values().cloned().collect::<Vec<Todo>>();
        super::sort_newest_first(&mut snapshot);

        let data = serde_json::to_vec_pretty(&snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl TodoStore for FileStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let todos = self.todos.lock().await;

        let mut todos = todos.values().cloned().collect::<Vec<Todo>>();
        super::sort_newest_first(&mut todos);

        Ok(todos)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let todos = self.todos.lock().await;

        Ok(todos.get(&id).cloned())
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let now = Utc::now();
        let todo = Todo {
            id: TodoId::new(),
            text: input.text,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };

        // The lock is held across the whole read-modify-write-persist
        // sequence; see the TodoStore contract. On a failed persist the
        // map change is rolled back, so memory never serves state the
        // snapshot does not hold and a caller retry cannot duplicate it.
        let mut todos = self.todos.lock().await;
        todos.insert(todo.id, todo.clone());
        if let Err(err) = self.persist(&todos).await {
            todos.remove(&todo.id);
            return Err(err);
        }

        Ok(todo)
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Option<Todo>> {
        let mut todos = self.todos.lock().await;

        let Some(todo) = todos.get_mut(&id) else {
            return Ok(None);
        };
        let previous = todo.clone();
        todo.apply(input, Utc::now());
        let updated = todo.clone();

        if let Err(err) = self.persist(&todos).await {
            todos.insert(id, previous);
            return Err(err);
        }

        Ok(Some(updated))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let mut todos = self.todos.lock().await;

        let Some(removed) = todos.remove(&id) else {
            return Ok(false);
        };
        if let Err(err) = self.persist(&todos).await {
            todos.insert(id, removed);
            return Err(err);
        }

        Ok(true)
    }
}

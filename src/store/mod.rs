use async_trait::async_trait;

use crate::model::{CreateTodo, Todo, TodoId, UpdateTodo};

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to persist todo snapshot: {0}")]
    Persist(#[from] std::io::Error),
    #[error("failed to encode todo snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The component owning the authoritative todo collection.
///
/// Every mutating operation runs its read-modify-write(-persist)
/// sequence under a single lock, so concurrent mutations never
/// overwrite each other.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All todos, newest first. The order is total and stable across
    /// calls as long as no mutation intervenes.
    async fn list(&self) -> Result<Vec<Todo>>;

    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;

    /// Allocates a fresh id, stamps `created_at = updated_at = now`.
    /// Text validity is enforced at the API boundary, not here.
    async fn create(&self, input: CreateTodo) -> Result<Todo>;

    /// `None` when the id is unknown; that is a signal, not an error.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Option<Todo>>;

    /// Whether a removal occurred. Deleting an unknown id is not an
    /// error.
    async fn delete(&self, id: TodoId) -> Result<bool>;
}

fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

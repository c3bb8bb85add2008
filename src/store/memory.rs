use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{Result, TodoStore};
use crate::model::{CreateTodo, Todo, TodoId, UpdateTodo};

/// In-process backing: a map behind a mutex, nothing durable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: Mutex<HashMap<TodoId, Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
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

        let mut todos = self.todos.lock().await;
        todos.insert(todo.id, todo.clone());

        Ok(todo)
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Option<Todo>> {
        let mut todos = self.todos.lock().await;

        let Some(todo) = todos.get_mut(&id) else {
            return Ok(None);
        };
        todo.apply(input, Utc::now());

        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let mut todos = self.todos.lock().await;

        Ok(todos.remove(&id).is_some())
    }
}

use crate::model::{Todo, TodoId};

mod http;

pub use http::{ApiClient, ClientError};

/// Client-side view filter over the cached todo list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl Filter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => todo.completed,
            Filter::Incomplete => !todo.completed,
        }
    }
}

/// Holds a local cache of the server's todo list plus the active
/// filter. The cache is never authoritative: every mutation goes
/// through the API and is followed by a refresh.
pub struct Controller {
    client: ApiClient,
    todos: Vec<Todo>,
    filter: Filter,
}

impl Controller {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            filter: Filter::All,
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.todos = self.client.list().await?;

        Ok(())
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The cached todos the active filter selects, in server order.
    pub fn visible(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .collect()
    }

    /// Rejects empty input locally before any request goes out; the
    /// server enforces the same rule independently.
    pub async fn add(&mut self, text: &str) -> Result<(), ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::EmptyText);
        }

        self.client.create(text).await?;
        self.refresh().await
    }

    pub async fn toggle(&mut self, id: TodoId) -> Result<(), ClientError> {
        let Some(todo) = self.todos.iter().find(|todo| todo.id == id) else {
            return Err(ClientError::NotFound);
        };
        let completed = !todo.completed;

        self.client.update(id, None, Some(completed)).await?;
        self.refresh().await
    }

    pub async fn edit(&mut self, id: TodoId, text: &str) -> Result<(), ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::EmptyText);
        }

        self.client.update(id, Some(text), None).await?;
        self.refresh().await
    }

    pub async fn delete(&mut self, id: TodoId) -> Result<(), ClientError> {
        self.client.delete(id).await?;
        self.refresh().await
    }
}

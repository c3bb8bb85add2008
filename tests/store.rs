use std::collections::HashSet;
use std::sync::Arc;

use todo_server::model::{CreateTodo, TodoId, UpdateTodo};
use todo_server::store::{FileStore, MemoryStore, TodoStore};

fn create(text: &str) -> CreateTodo {
    CreateTodo {
        text: text.to_string(),
        completed: false,
    }
}

#[tokio::test]
async fn memory_round_trip() {
    let store = MemoryStore::new();

    let created = store.create(create("buy <b>milk</b>  ")).await.unwrap();
    assert!(!created.completed);
    assert_eq!(created.created_at, created.updated_at);

    let todos = store.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    // Text is stored verbatim, no escaping or trimming.
    assert_eq!(todos[0].text, "buy <b>milk</b>  ");
    assert_eq!(todos[0], created);
}

#[tokio::test]
async fn file_round_trip_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");

    let created = {
        let store = FileStore::open(&path).await;
        store.create(create("persist me")).await.unwrap()
    };

    let store = FileStore::open(&path).await;
    let todos = store.list().await.unwrap();
    assert_eq!(todos, vec![created]);
}

#[tokio::test]
async fn update_touches_only_supplied_fields() {
    let store = MemoryStore::new();
    let created = store.create(create("original")).await.unwrap();

    let toggled = store
        .update(
            created.id,
            UpdateTodo {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.text, "original");
    assert_eq!(toggled.created_at, created.created_at);
    assert!(toggled.updated_at >= toggled.created_at);

    let renamed = store
        .update(
            created.id,
            UpdateTodo {
                text: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.text, "renamed");
    assert!(renamed.completed);
}

#[tokio::test]
async fn update_unknown_id_is_absent() {
    let store = MemoryStore::new();

    let result = store
        .update(
            TodoId::new(),
            UpdateTodo {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("todos.json")).await;

    let keep = store.create(create("keep")).await.unwrap();
    let gone = store.create(create("gone")).await.unwrap();

    assert!(store.delete(gone.id).await.unwrap());
    assert!(!store.delete(gone.id).await.unwrap());
    assert!(!store.delete(TodoId::new()).await.unwrap());

    let todos = store.list().await.unwrap();
    assert_eq!(todos, vec![keep]);
}

#[tokio::test]
async fn list_is_newest_first_and_stable() {
    let store = MemoryStore::new();

    for text in ["first", "second", "third"] {
        store.create(create(text)).await.unwrap();
        // Keep creation timestamps strictly apart.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let todos = store.list().await.unwrap();
    let texts = todos.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, ["third", "second", "first"]);

    assert_eq!(todos, store.list().await.unwrap());
}

#[tokio::test]
async fn missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("does-not-exist.json")).await;

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unparsable_snapshot_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(&path, b"{ this is not json").unwrap();

    let store = FileStore::open(&path).await;
    assert!(store.list().await.unwrap().is_empty());

    // The store serves writes again and the snapshot heals.
    store.create(create("fresh start")).await.unwrap();
    drop(store);

    let reopened = FileStore::open(&path).await;
    let todos = reopened.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "fresh start");
}

#[tokio::test]
async fn failed_persist_rolls_the_collection_back() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let store = FileStore::open(sub.join("todos.json")).await;

    let kept = store.create(create("kept")).await.unwrap();

    // Removing the parent directory makes every snapshot write fail.
    std::fs::remove_dir_all(&sub).unwrap();

    store.create(create("doomed")).await.unwrap_err();
    assert_eq!(store.list().await.unwrap(), vec![kept.clone()]);

    store
        .update(
            kept.id,
            UpdateTodo {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(store.list().await.unwrap(), vec![kept.clone()]);

    store.delete(kept.id).await.unwrap_err();
    assert_eq!(store.list().await.unwrap(), vec![kept]);
}

#[tokio::test]
async fn concurrent_creates_lose_no_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("todos.json")).await);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..50 {
        let store = store.clone();
        tasks.spawn(async move { store.create(create(&format!("task {i}"))).await });
    }

    let mut ids = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let todo = result.unwrap().unwrap();
        ids.insert(todo.id);
    }
    assert_eq!(ids.len(), 50);

    let todos = store.list().await.unwrap();
    assert_eq!(todos.len(), 50);
    assert_eq!(todos.iter().map(|t| t.id).collect::<HashSet<_>>(), ids);
}

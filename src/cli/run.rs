use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use miette::IntoDiagnostic;

use crate::store::{FileStore, MemoryStore, TodoStore};

#[derive(Debug, clap::Parser)]
pub struct Options {
    /// Path to the JSON snapshot file backing the store
    #[clap(long, default_value = "./todos.json", env = "TODO_SERVER_STORE_PATH")]
    pub store_path: PathBuf,

    /// Keep todos in memory only, without a backing file
    #[clap(long, env = "TODO_SERVER_MEMORY")]
    pub memory: bool,

    /// Address to bind the HTTP server to
    #[clap(
        long,
        default_value = "127.0.0.1:3000",
        env = "TODO_SERVER_LISTEN_ADDR"
    )]
    pub listen_addr: SocketAddr,
}

pub async fn run(opts: Options) -> miette::Result<()> {
    use std::time::Duration;

    use tokio_graceful_shutdown::{SubsystemBuilder, SubsystemHandle, Toplevel};

    let store: Arc<dyn TodoStore> = if opts.memory {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(&opts.store_path).await)
    };

    Toplevel::new(move |s: SubsystemHandle| async move {
        let api_subsys = SubsystemBuilder::new("api", {
            let store = store.clone();
            let listen_addr = opts.listen_addr;

            move |subsys: SubsystemHandle| crate::api::run(subsys, store, listen_addr)
        });
        s.start(api_subsys);
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .into_diagnostic()
}

use std::net::SocketAddr;
use std::sync::Arc;

use miette::IntoDiagnostic;
use tokio_graceful_shutdown::SubsystemHandle;

use crate::store::TodoStore;

pub mod error;
mod todos;

#[derive(Clone)]
pub struct Context {
    pub store: Arc<dyn TodoStore>,
}

pub(crate) type Result<T> = std::result::Result<T, error::Error>;
pub type Router = axum::Router<Context>;

pub async fn run(
    subsys: SubsystemHandle,
    store: Arc<dyn TodoStore>,
    listen_addr: SocketAddr,
) -> miette::Result<()> {
    use tokio::net::TcpListener;

    let ctx = Context { store };

    let app = router().with_state(ctx);

    let listener = TcpListener::bind(listen_addr).await.into_diagnostic()?;
    tracing::info!("API server listening on {listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { subsys.on_shutdown_requested().await })
        .await
        .into_diagnostic()
}

pub fn router() -> Router {
    use tower_http::trace::TraceLayer;

    use crate::util::OtelTrace;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(OtelTrace)
        .on_response(OtelTrace)
        .on_body_chunk(())
        .on_eos(())
        .on_failure(OtelTrace);

    Router::new().merge(todos::router()).layer(trace_layer)
}

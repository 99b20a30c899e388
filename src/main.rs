use call_analytics::{
    AppState, Config, Coordinator, JsonFileStore, RecordStore, RemoteStore, router,
    session::SessionCache,
};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    ensure_parent(&config.session_path).await?;

    let store: Arc<dyn RecordStore> = match config.remote.clone() {
        Some(remote) => {
            info!(url = %remote.base_url, table = %remote.table, "using hosted record store");
            Arc::new(RemoteStore::new(remote)?)
        }
        None => {
            ensure_parent(&config.data_path).await?;
            info!(path = %config.data_path.display(), "using local record file");
            Arc::new(JsonFileStore::open(&config.data_path).await)
        }
    };

    let cache = SessionCache::new(&config.session_path);
    let state = AppState::restore(Coordinator::new(store), cache).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

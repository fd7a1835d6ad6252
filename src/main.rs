use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salaboard::api::router;
use salaboard::db::{RoomStore, SqliteRoomStore};
use salaboard::feed::ChangeFeed;
use salaboard::services::ambient::{AmbientMonitor, DEFAULT_REFRESH_SECS};
use salaboard::services::{RoomListView, TimeContext};
use salaboard::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "salaboard=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://salaboard.db".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store: Arc<dyn RoomStore> = Arc::new(SqliteRoomStore::new(pool.clone()));
    let feed = ChangeFeed::new();

    // Seed the view from the store, then let the feed keep it current.
    let mut view = RoomListView::new();
    view.seed(store.list().await?);
    view.apply_time_defaults(&TimeContext::now());
    let view = Arc::new(Mutex::new(view));

    let mut subscription = feed.subscribe();
    let view_task = {
        let view = view.clone();
        tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                debug!("applying feed event for room {}", event.room_id());
                view.lock().await.apply(event);
            }
        })
    };

    let refresh_secs = std::env::var("AMBIENT_REFRESH_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REFRESH_SECS);
    let monitor = AmbientMonitor::new(refresh_secs);
    let ambient = monitor.shared();
    let ambient_task = tokio::spawn(monitor.start());

    let state = AppState {
        db: pool.clone(),
        store,
        feed,
        view,
        ambient,
    };

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    // Release the long-lived tasks on every exit path past this point.
    view_task.abort();
    ambient_task.abort();

    Ok(())
}

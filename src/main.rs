use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use trade_journal::{config, routes, services, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trade_journal=info,tower_http=info")),
        )
        .init();

    let settings = config::load();

    // Mongo connection (or memory:// for a throwaway store)
    let db = services::store::Db::connect(&settings.mongodb_uri, &settings.mongodb_db)
        .await
        .expect("Failed to connect to MongoDB");

    match db.ping().await {
        Ok(_) => tracing::info!("connected to document store"),
        Err(e) => tracing::warn!(error = %e, "document store ping failed"),
    }

    if let Err(e) = services::db_init::ensure_indexes(&db).await {
        tracing::warn!(error = %e, "failed to create indexes");
    }

    if settings.strict_ownership {
        tracing::info!("strict ownership checks enabled");
    }

    let state = AppState::new(db, settings.clone());
    let app = routes::app(state);

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .expect("HOST must be an IP address");
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind listener");
    axum::serve(listener, app).await.expect("server error");
}

use axum::Router;
use geoportal::config::Config;
use geoportal::db::{MemoryRouteStore, RouteStore, SqliteRouteStore};
use geoportal::planner::RoutePlanner;
use geoportal::services::osrm::OsrmClient;
use geoportal::services::poi_catalog::PoiCatalog;
use geoportal::services::route_calculator::RouteCalculator;
use geoportal::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoportal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Geoportal route planner");
    tracing::info!("Configuration loaded successfully");

    let catalog = Arc::new(PoiCatalog::embedded()?);
    tracing::info!("POI catalog loaded with {} entries", catalog.len());

    // Saved routes: SQLite when configured, otherwise process memory
    let store: Arc<dyn RouteStore> = if let Some(ref database_url) = config.database_url {
        tracing::info!("Opening route database...");
        let store = SqliteRouteStore::connect(database_url).await?;
        tracing::info!("Route database ready");
        Arc::new(store)
    } else {
        tracing::info!("DATABASE_URL not configured. Saved routes are kept in memory.");
        Arc::new(MemoryRouteStore::new())
    };

    // Initialize services
    tracing::info!(
        "Routing service at {} (timeout {}s)",
        config.routing_base_url,
        config.routing_timeout_secs
    );
    let osrm_client = OsrmClient::with_config(
        config.routing_base_url.clone(),
        config.routing_timeout(),
    );
    let calculator = RouteCalculator::new(Arc::new(osrm_client), config.planner.clone());
    let planner = RoutePlanner::new(calculator, catalog.clone());

    // Create application state
    let state = Arc::new(AppState {
        planner,
        store,
        catalog,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", geoportal::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

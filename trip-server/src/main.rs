use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::activities::{
    ActivityCacheConfig, CachedActivityClient, EventfindaClient, EventfindaConfig,
};
use trip_server::config::AppConfig;
use trip_server::places::{PlaceCache, PlaceDirectory, PlaceStoreClient, PlaceStoreConfig};
use trip_server::routing::RoutingClient;
use trip_server::trips::MemoryTripStore;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Place directory over the hosted store
    let store_config = PlaceStoreConfig::new(&config.place_store_url, &config.place_store_key);
    let store = PlaceStoreClient::new(store_config).expect("Failed to create place store client");
    let places = PlaceDirectory::new(Arc::new(store), PlaceCache::new(config.place_cache_ttl));

    // Warm the place cache; lookups reload on demand if this fails
    if let Err(e) = places.refresh().await {
        warn!(error = %e, "failed to load places, will retry on demand");
    }

    let routing = RoutingClient::new(config.routing()).expect("Failed to create routing client");
    let trips = Arc::new(MemoryTripStore::new());

    let mut state = AppState::new(places, Arc::new(routing), trips);

    if let Some(creds) = &config.eventfinda {
        let client = EventfindaClient::new(EventfindaConfig::new(&creds.username, &creds.password))
            .expect("Failed to create Eventfinda client");
        let cache_config = ActivityCacheConfig {
            ttl: config.activity_cache_ttl,
            ..Default::default()
        };
        let cached = CachedActivityClient::new(Arc::new(client), &cache_config);
        state = state.with_activities(Arc::new(cached));
    }

    // Spawn background task to refresh the place list once per TTL
    let places_refresh = state.places.clone();
    let refresh_every = config.place_cache_ttl;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = places_refresh.refresh().await {
                warn!(error = %e, "failed to refresh places");
            }
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind");
    info!(addr = %config.addr, "trip server listening");

    axum::serve(listener, app).await.expect("Server error");
}

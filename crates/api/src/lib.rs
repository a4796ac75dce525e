//! HTTP API server with observability for the booking orchestrator.
//!
//! Provides REST endpoints for creating, reading and confirming bookings,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use booking_store::{BookingStore, InMemoryBookingStore, PostgresBookingStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{
    BookingOrchestrator, HttpIdentityGateway, HttpInventoryGateway, HttpNotificationGateway,
    IdentityGateway, InMemoryIdentityGateway, InMemoryInventoryGateway,
    InMemoryNotificationGateway, InventoryGateway, NotificationGateway, OrchestratorConfig,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;

/// The orchestrator as wired into the server, with every collaborator boxed.
pub type AppOrchestrator = BookingOrchestrator<
    Arc<dyn BookingStore>,
    Arc<dyn InventoryGateway>,
    Arc<dyn IdentityGateway>,
    Arc<dyn NotificationGateway>,
>;

/// Where bookings are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
        }
    }
}

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: AppOrchestrator,
    pub store_backend: StoreBackend,
}

/// Handles on the in-memory collaborators behind an in-memory [`AppState`].
#[derive(Clone)]
pub struct InMemoryServices {
    pub store: InMemoryBookingStore,
    pub inventory: InMemoryInventoryGateway,
    pub identity: InMemoryIdentityGateway,
    pub notifications: InMemoryNotificationGateway,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/bookings", post(routes::bookings::create))
        .route("/api/bookings/{id}", get(routes::bookings::get))
        .route("/api/bookings/{id}/confirm", put(routes::bookings::confirm))
        .route(
            "/api/bookings/user/{user_id}",
            get(routes::bookings::list_for_user),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed entirely by in-memory collaborators.
///
/// Must be called from within a Tokio runtime.
pub fn create_in_memory_state(config: OrchestratorConfig) -> (Arc<AppState>, InMemoryServices) {
    let services = InMemoryServices {
        store: InMemoryBookingStore::new(),
        inventory: InMemoryInventoryGateway::new(),
        identity: InMemoryIdentityGateway::new(),
        notifications: InMemoryNotificationGateway::new(),
    };

    let orchestrator = BookingOrchestrator::new(
        Arc::new(services.store.clone()) as Arc<dyn BookingStore>,
        Arc::new(services.inventory.clone()) as Arc<dyn InventoryGateway>,
        Arc::new(services.identity.clone()) as Arc<dyn IdentityGateway>,
        Arc::new(services.notifications.clone()) as Arc<dyn NotificationGateway>,
        config,
    );

    let state = Arc::new(AppState {
        orchestrator,
        store_backend: StoreBackend::Memory,
    });

    (state, services)
}

/// Creates application state for the server: HTTP collaborators, and a
/// PostgreSQL store when `DATABASE_URL` is set.
pub async fn build_state(config: &Config) -> Result<Arc<AppState>, StoreError> {
    let (store, store_backend) = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await?;
            let store = PostgresBookingStore::new(pool);
            store.run_migrations().await?;
            tracing::info!("using PostgreSQL booking store");
            (Arc::new(store) as Arc<dyn BookingStore>, StoreBackend::Postgres)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory booking store");
            (
                Arc::new(InMemoryBookingStore::new()) as Arc<dyn BookingStore>,
                StoreBackend::Memory,
            )
        }
    };

    let client = reqwest::Client::new();
    let orchestrator = BookingOrchestrator::new(
        store,
        Arc::new(HttpInventoryGateway::new(
            client.clone(),
            &config.flight_service_url,
            &config.hotel_service_url,
        )) as Arc<dyn InventoryGateway>,
        Arc::new(HttpIdentityGateway::new(
            client.clone(),
            &config.user_service_url,
        )) as Arc<dyn IdentityGateway>,
        Arc::new(HttpNotificationGateway::new(
            client,
            &config.notification_service_url,
        )) as Arc<dyn NotificationGateway>,
        config.orchestrator_config(),
    );

    Ok(Arc::new(AppState {
        orchestrator,
        store_backend,
    }))
}

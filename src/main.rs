use chattr::api::handlers::{AppState, api_routes};
use chattr::api::openapi::ApiDoc;
use chattr::auth::JwtService;
use chattr::config::CONFIG;
use chattr::{GroupService, InMemoryChatProvider, InMemoryStorage, LogNotificationHook, WebhookRelay};
use http::header;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.clone())
        .init();
    info!("Starting with {:?}", *CONFIG);

    // Dependencies are built here and injected; nothing holds a global
    // provider client.
    let storage = InMemoryStorage::new();
    let provider = InMemoryChatProvider::new();
    let groups = Arc::new(GroupService::new(storage, provider));
    let relay = Arc::new(WebhookRelay::new(groups.clone(), LogNotificationHook));
    let state = AppState {
        groups,
        relay,
        jwt: Arc::new(JwtService::new(CONFIG.jwt_secret.clone())),
    };

    let app = api_routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Quotes-rs server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use quotes_api::{AppState, router as api_router};
use quotes_common::Config;
use quotes_core::{
    FavoriteService, ImageCache, MessageDeliveryService, NoOpDelivery, QuoteProviderService,
    QuoteService, ReactionService, SearchHistoryService, SubscriptionService, TelegramDelivery,
    ZenQuotesProvider,
};
use quotes_db::repositories::{
    DailySubscriberRepository, FavoriteRepository, QuoteRepository, ReactionRepository,
    SearchHistoryRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotes=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting quotes-rs server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = quotes_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    quotes_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let quote_repo = QuoteRepository::new(Arc::clone(&db));
    let favorite_repo = FavoriteRepository::new(Arc::clone(&db));
    let history_repo = SearchHistoryRepository::new(Arc::clone(&db));
    let reaction_repo = ReactionRepository::new(Arc::clone(&db));
    let subscriber_repo = DailySubscriberRepository::new(Arc::clone(&db));

    // Initialize external collaborators
    let provider: QuoteProviderService = Arc::new(ZenQuotesProvider::new(&config.provider));
    let delivery: MessageDeliveryService = match config.telegram.bot_token.clone() {
        Some(token) => {
            info!("Telegram delivery enabled");
            Arc::new(TelegramDelivery::new(&config.telegram, token))
        }
        None => {
            info!("No Telegram bot token configured, daily dispatch messages will be dropped");
            Arc::new(NoOpDelivery)
        }
    };

    // Initialize services
    let quote_service = QuoteService::new(
        quote_repo.clone(),
        history_repo.clone(),
        Arc::clone(&provider),
    );
    let favorite_service = FavoriteService::new(favorite_repo, quote_repo.clone());
    let reaction_service = ReactionService::new(reaction_repo, quote_repo);
    let history_service = SearchHistoryService::new(history_repo);
    let subscription_service =
        SubscriptionService::new(subscriber_repo, quote_service.clone(), delivery);
    let image_cache = Arc::new(ImageCache::new(provider));

    // Create app state
    let state = AppState {
        quote_service,
        favorite_service,
        reaction_service,
        history_service,
        subscription_service,
        image_cache,
    };

    // Build router
    let app = api_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

use lms_notifications::db::{create_pool, run_migrations};
use lms_notifications::notification::notification_repository::NotificationRepository;
use lms_notifications::notification::notification_service::NotificationService;
use lms_notifications::notification::start_cleanup_job;
use lms_notifications::routes::create_router;
use lms_notifications::state::{AppState, Config};
use lms_notifications::user::user_repository::UserRepository;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lms_notifications=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create repositories and services
    let user_repository = UserRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());
    let notification_service = NotificationService::new(
        notification_repository.clone(),
        user_repository.clone(),
    );

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        user_repository,
        notification_repository,
        notification_service,
    };

    // Start the retention cleanup job
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_cleanup_job(cleanup_state).await {
            tracing::error!("Cleanup job error: {:?}", e);
        }
    });

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use crate::{
    middleware::auth_middleware,
    notification::notification_dto::{
        MarkAllReadResponse, MessageResponse, NotificationListResponse,
        NotificationStatsResponse, PaginationMeta, TypeStats,
    },
    notification::notification_handlers,
    notification::notification_models::{EntityType, Notification, NotificationType, Priority},
    state::AppState,
};
use axum::{
    middleware,
    routing::{delete, get, patch},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        notification_handlers::list_notifications,
        notification_handlers::mark_notification_read,
        notification_handlers::mark_all_notifications_read,
        notification_handlers::delete_notification,
        notification_handlers::notification_stats,
    ),
    components(
        schemas(
            Notification,
            NotificationType,
            Priority,
            EntityType,
            NotificationListResponse,
            PaginationMeta,
            MarkAllReadResponse,
            MessageResponse,
            NotificationStatsResponse,
            TypeStats,
        )
    ),
    tags(
        (name = "notifications", description = "Notification endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // All notification routes require an authenticated caller.
    let notification_routes = Router::new()
        .route("/", get(notification_handlers::list_notifications))
        .route("/stats", get(notification_handlers::notification_stats))
        .route(
            "/mark-all-read",
            patch(notification_handlers::mark_all_notifications_read),
        )
        .route(
            "/:id/read",
            patch(notification_handlers::mark_notification_read),
        )
        .route("/:id", delete(notification_handlers::delete_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new().nest("/notifications", notification_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

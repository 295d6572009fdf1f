use super::notification_dto::{
    total_pages, ListNotificationsQuery, MarkAllReadResponse, MessageResponse,
    NotificationListResponse, NotificationStatsResponse, PaginationMeta,
};
use super::notification_models::Notification;
use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(ListNotificationsQuery),
    responses(
        (status = 200, description = "Page of notifications", body = NotificationListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<NotificationListResponse>> {
    let (page, limit) = query.normalize();
    let unread_only = query.unread_only();
    let offset = (page - 1) * limit;

    let notifications = state
        .notification_repository
        .find_page(user_id, unread_only, limit, offset)
        .await?;
    let total_count = state.notification_repository.count(user_id, unread_only).await?;
    let unread_count = state.notification_repository.count_unread(user_id).await?;

    Ok(Json(NotificationListResponse {
        notifications,
        pagination: PaginationMeta {
            current_page: page,
            total_pages: total_pages(total_count, limit),
            total_count,
            unread_count,
        },
    }))
}

/// Mark one notification as read (idempotent)
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 404, description = "Notification not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Notification>> {
    let notification = state
        .notification_repository
        .mark_as_read(notification_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(notification))
}

/// Mark every unread notification of the caller as read
#[utoipa::path(
    patch,
    path = "/api/notifications/mark-all-read",
    responses(
        (status = 200, description = "Unread notifications transitioned", body = MarkAllReadResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MarkAllReadResponse>> {
    let modified_count = state
        .notification_repository
        .mark_all_as_read(user_id)
        .await?;

    Ok(Json(MarkAllReadResponse { modified_count }))
}

/// Delete a notification owned by the caller
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification deleted", body = MessageResponse),
        (status = 404, description = "Notification not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    let rows_affected = state
        .notification_repository
        .delete(notification_id, user_id)
        .await?;

    // Missing and not-owned look the same; the response must not reveal
    // whether another user's notification exists.
    if rows_affected == 0 {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Notification deleted".to_string(),
    }))
}

/// Per-type counts and total unread for the caller
#[utoipa::path(
    get,
    path = "/api/notifications/stats",
    responses(
        (status = 200, description = "Notification statistics", body = NotificationStatsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn notification_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<NotificationStatsResponse>> {
    let rows = state.notification_repository.stats_by_type(user_id).await?;

    Ok(Json(NotificationStatsResponse::from_rows(rows)))
}

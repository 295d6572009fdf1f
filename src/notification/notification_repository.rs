use super::notification_models::{NewNotification, Notification, NotificationType};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Per-type aggregate for the stats endpoint.
#[derive(Debug, FromRow)]
pub struct TypeStatsRow {
    pub notification_type: NotificationType,
    pub count: i64,
    pub unread_count: i64,
}

/// The store. Every write touches a single row (or a single recipient-scoped
/// filter); no multi-statement transactions are needed.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewNotification) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications
                (recipient_id, sender_id, notification_type, title, message, content,
                 priority, related_entity_type, related_entity_id, action_url, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(new.recipient_id)
        .bind(new.sender_id)
        .bind(new.notification_type)
        .bind(&new.title)
        .bind(&new.message)
        .bind(&new.content)
        .bind(new.priority)
        .bind(new.related_entity_type)
        .bind(new.related_entity_id)
        .bind(&new.action_url)
        .bind(&new.metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// One page of the recipient's notifications, newest first.
    pub async fn find_page(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>> {
        let notifications = if unread_only {
            sqlx::query_as::<_, Notification>(
                "SELECT * FROM notifications
                 WHERE recipient_id = $1 AND read = FALSE
                 ORDER BY created_at DESC
                 LIMIT $2 OFFSET $3",
            )
            .bind(recipient_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Notification>(
                "SELECT * FROM notifications
                 WHERE recipient_id = $1
                 ORDER BY created_at DESC
                 LIMIT $2 OFFSET $3",
            )
            .bind(recipient_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(notifications)
    }

    pub async fn count(&self, recipient_id: Uuid, unread_only: bool) -> Result<i64> {
        let count = if unread_only {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND read = FALSE",
            )
            .bind(recipient_id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1",
            )
            .bind(recipient_id)
            .fetch_one(&self.pool)
            .await?
        };

        Ok(count)
    }

    pub async fn count_unread(&self, recipient_id: Uuid) -> Result<i64> {
        self.count(recipient_id, true).await
    }

    /// Transition unread -> read. Idempotent: an already-read row is returned
    /// unchanged (COALESCE keeps the original read_at). None means the row
    /// does not exist or belongs to someone else; callers cannot tell which.
    pub async fn mark_as_read(
        &self,
        id: Uuid,
        recipient_id: Uuid,
    ) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications
             SET read = TRUE, read_at = COALESCE(read_at, NOW())
             WHERE id = $1 AND recipient_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn mark_all_as_read(&self, recipient_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications
             SET read = TRUE, read_at = NOW()
             WHERE recipient_id = $1 AND read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid, recipient_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient_id = $2")
            .bind(id)
            .bind(recipient_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn stats_by_type(&self, recipient_id: Uuid) -> Result<Vec<TypeStatsRow>> {
        let rows = sqlx::query_as::<_, TypeStatsRow>(
            "SELECT notification_type,
                    COUNT(*) AS count,
                    COUNT(*) FILTER (WHERE read = FALSE) AS unread_count
             FROM notifications
             WHERE recipient_id = $1
             GROUP BY notification_type",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Administrative cleanup. Only rows that are both read and older than the
    /// cutoff go; unread rows stay regardless of age.
    pub async fn delete_read_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE read = TRUE AND created_at < $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}

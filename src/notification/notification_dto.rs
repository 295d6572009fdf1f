use super::notification_models::Notification;
use super::notification_repository::TypeStatsRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for listing the caller's notifications. Field names match
/// the frontend's camelCase convention.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub unread_only: Option<bool>,
}

impl ListNotificationsQuery {
    /// Clamp raw query input into a sane (page, limit) pair.
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }

    pub fn unread_only(&self) -> bool {
        self.unread_only.unwrap_or(false)
    }
}

pub fn total_pages(total_count: i64, limit: i64) -> i64 {
    if total_count <= 0 {
        0
    } else {
        (total_count + limit - 1) / limit
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub modified_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeStats {
    pub count: i64,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStatsResponse {
    pub by_type: BTreeMap<String, TypeStats>,
    pub total_unread: i64,
}

impl NotificationStatsResponse {
    pub fn from_rows(rows: Vec<TypeStatsRow>) -> Self {
        let mut by_type = BTreeMap::new();
        let mut total_unread = 0;

        for row in rows {
            total_unread += row.unread_count;
            by_type.insert(
                row.notification_type.to_string(),
                TypeStats {
                    count: row.count,
                    unread_count: row.unread_count,
                },
            );
        }

        Self {
            by_type,
            total_unread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_models::NotificationType;

    #[test]
    fn test_normalize_defaults() {
        let q = ListNotificationsQuery {
            page: None,
            limit: None,
            unread_only: None,
        };
        assert_eq!(q.normalize(), (1, 20));
        assert!(!q.unread_only());
    }

    #[test]
    fn test_normalize_clamps_bad_input() {
        let q = ListNotificationsQuery {
            page: Some(0),
            limit: Some(5000),
            unread_only: Some(true),
        };
        assert_eq!(q.normalize(), (1, 100));
        assert!(q.unread_only());

        let q = ListNotificationsQuery {
            page: Some(-3),
            limit: Some(0),
            unread_only: None,
        };
        assert_eq!(q.normalize(), (1, 1));
    }

    #[test]
    fn test_unread_only_accepts_camel_case() {
        let q: ListNotificationsQuery =
            serde_json::from_value(serde_json::json!({"unreadOnly": true})).unwrap();
        assert!(q.unread_only());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(100, 20), 5);
    }

    #[test]
    fn test_stats_from_rows() {
        let rows = vec![
            TypeStatsRow {
                notification_type: NotificationType::AdminAnnouncement,
                count: 3,
                unread_count: 1,
            },
            TypeStatsRow {
                notification_type: NotificationType::System,
                count: 2,
                unread_count: 2,
            },
        ];

        let stats = NotificationStatsResponse::from_rows(rows);
        assert_eq!(stats.total_unread, 3);
        assert_eq!(stats.by_type["admin_announcement"].count, 3);
        assert_eq!(stats.by_type["admin_announcement"].unread_count, 1);
        assert_eq!(stats.by_type["system"].unread_count, 2);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalUnread"], 3);
        assert_eq!(json["byType"]["system"]["unreadCount"], 2);
    }
}

use crate::db::DbPool;
use std::sync::Arc;

use crate::notification::notification_repository::NotificationRepository;
use crate::notification::notification_service::NotificationService;
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub notification_repository: NotificationRepository,
    pub notification_service: NotificationService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub notification_retention_days: i64,
    pub cleanup_schedule: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            notification_retention_days: std::env::var("NOTIFICATION_RETENTION_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("NOTIFICATION_RETENTION_DAYS must be a number"),
            // Defaults to 03:00 every day.
            cleanup_schedule: std::env::var("NOTIFICATION_CLEANUP_SCHEDULE")
                .unwrap_or_else(|_| "0 0 3 * * *".to_string()),
        }
    }
}

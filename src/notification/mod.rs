pub mod jobs;
pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_models;
pub mod notification_repository;
pub mod notification_service;

pub use jobs::start_cleanup_job;
pub use notification_models::{Notification, NotificationType, Priority};
pub use notification_repository::NotificationRepository;
pub use notification_service::NotificationService;

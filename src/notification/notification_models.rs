use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Notification categories. These drive display affordances (icon, color) on
/// the client, never business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    StudentMessage,
    AssignmentSubmission,
    AdminAnnouncement,
    QuizSubmission,
    GradeRequest,
    Enrollment,
    HomeworkReminder,
    ParentMessage,
    System,
    LiveClassStarted,
    LiveClassEnded,
    ZoomClass,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::StudentMessage => "student_message",
            NotificationType::AssignmentSubmission => "assignment_submission",
            NotificationType::AdminAnnouncement => "admin_announcement",
            NotificationType::QuizSubmission => "quiz_submission",
            NotificationType::GradeRequest => "grade_request",
            NotificationType::Enrollment => "enrollment",
            NotificationType::HomeworkReminder => "homework_reminder",
            NotificationType::ParentMessage => "parent_message",
            NotificationType::System => "system",
            NotificationType::LiveClassStarted => "live_class_started",
            NotificationType::LiveClassEnded => "live_class_ended",
            NotificationType::ZoomClass => "zoom_class",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display prominence only; no scheduling or delivery effect.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Weak reference target kinds. Lookup-only: no ownership, no cascading
/// deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Course,
    Homework,
    Quiz,
    Submission,
    Announcement,
    Application,
    LiveClass,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub content: Option<String>,
    pub priority: Priority,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub related_entity_type: Option<EntityType>,
    pub related_entity_id: Option<Uuid>,
    pub action_url: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for one notification. Everything not set here takes the
/// store default (unread, empty metadata, medium priority).
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub content: Option<String>,
    pub priority: Priority,
    pub related_entity_type: Option<EntityType>,
    pub related_entity_id: Option<Uuid>,
    pub action_url: Option<String>,
    pub metadata: serde_json::Value,
}

impl NewNotification {
    pub fn new(
        recipient_id: Uuid,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: None,
            notification_type,
            title: title.into(),
            message: message.into(),
            content: None,
            priority: Priority::default(),
            related_entity_type: None,
            related_entity_id: None,
            action_url: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    pub fn sender(mut self, sender_id: Uuid) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn related_entity(mut self, entity_type: EntityType, entity_id: Uuid) -> Self {
        self.related_entity_type = Some(entity_type);
        self.related_entity_id = Some(entity_id);
        self
    }

    pub fn action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_wire_format() {
        assert_eq!(NotificationType::StudentMessage.to_string(), "student_message");
        assert_eq!(
            NotificationType::AssignmentSubmission.to_string(),
            "assignment_submission"
        );
        assert_eq!(NotificationType::LiveClassStarted.to_string(), "live_class_started");
        assert_eq!(NotificationType::ZoomClass.to_string(), "zoom_class");

        let json = serde_json::to_value(NotificationType::AdminAnnouncement).unwrap();
        assert_eq!(json, serde_json::json!("admin_announcement"));
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::default().to_string(), "medium");
    }

    #[test]
    fn test_new_notification_defaults() {
        let n = NewNotification::new(
            Uuid::new_v4(),
            NotificationType::System,
            "T",
            "M",
        );

        assert_eq!(n.priority, Priority::Medium);
        assert!(n.sender_id.is_none());
        assert!(n.action_url.is_none());
        assert_eq!(n.metadata, serde_json::json!({}));
    }

    #[test]
    fn test_new_notification_builder() {
        let sender = Uuid::new_v4();
        let homework = Uuid::new_v4();
        let n = NewNotification::new(
            Uuid::new_v4(),
            NotificationType::AssignmentSubmission,
            "New submission",
            "Alice submitted Essay 3",
        )
        .sender(sender)
        .priority(Priority::High)
        .related_entity(EntityType::Homework, homework)
        .action_url("/homework/essay-3");

        assert_eq!(n.sender_id, Some(sender));
        assert_eq!(n.priority, Priority::High);
        assert_eq!(n.related_entity_type, Some(EntityType::Homework));
        assert_eq!(n.related_entity_id, Some(homework));
        assert_eq!(n.action_url.as_deref(), Some("/homework/essay-3"));
    }
}

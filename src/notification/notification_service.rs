use super::notification_models::{
    EntityType, NewNotification, Notification, NotificationType, Priority,
};
use super::notification_repository::NotificationRepository;
use crate::error::{AppError, Result};
use crate::user::user_models::{ROLE_ADMIN, ROLE_PARENT, ROLE_STUDENT, ROLE_TEACHER};
use crate::user::user_repository::UserRepository;
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use uuid::Uuid;

/// Creation side of the notification subsystem. Other business modules call
/// into this; recipients go through the HTTP access layer instead.
///
/// Notifications are a best-effort side channel. Callers triggering these as a
/// side effect of another operation should go through [`spawn_detached`] so a
/// failed fan-out can never fail the primary action.
#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    users: UserRepository,
}

fn validate(new: &NewNotification) -> Result<()> {
    if new.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if new.message.trim().is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }
    Ok(())
}

fn cleanup_cutoff(days_old: i64) -> Result<DateTime<Utc>> {
    if days_old < 1 {
        return Err(AppError::Validation(
            "daysOld must be at least 1".to_string(),
        ));
    }
    Ok(Utc::now() - Duration::days(days_old))
}

/// Fire-and-forget dispatch for side-effect notifications. Errors are logged
/// and dropped; the spawning operation never sees them.
pub fn spawn_detached<F, T>(context: &'static str, fut: F)
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            tracing::error!("Notification dispatch failed ({}): {:?}", context, e);
        }
    });
}

impl NotificationService {
    pub fn new(repo: NotificationRepository, users: UserRepository) -> Self {
        Self { repo, users }
    }

    pub async fn create_notification(&self, new: NewNotification) -> Result<Notification> {
        validate(&new)?;
        self.repo.create(&new).await
    }

    /// Fan out one notification per recipient. Duplicate recipients get
    /// duplicate records. Inserts run sequentially and outside a transaction;
    /// a crash mid-batch leaves a partial fan-out, which is acceptable for a
    /// best-effort side channel.
    pub async fn create_bulk_notifications(
        &self,
        recipients: &[Uuid],
        build: impl Fn(Uuid) -> NewNotification,
    ) -> Result<Vec<Notification>> {
        if recipients.is_empty() {
            return Err(AppError::Validation(
                "recipients must not be empty".to_string(),
            ));
        }

        let mut created = Vec::with_capacity(recipients.len());
        for &recipient_id in recipients {
            let new = build(recipient_id);
            validate(&new)?;
            created.push(self.repo.create(&new).await?);
        }

        Ok(created)
    }

    /// Resolve a role-based recipient set and fan out. An empty resolution is
    /// a no-op, not an error: delivery must never abort the triggering action.
    async fn fan_out_to_roles(
        &self,
        roles: &[&str],
        context: &str,
        build: impl Fn(Uuid) -> NewNotification,
    ) -> Result<Vec<Notification>> {
        let recipients = self.users.find_ids_by_roles(roles).await?;
        if recipients.is_empty() {
            tracing::warn!("No recipients with roles {:?} for {}", roles, context);
            return Ok(Vec::new());
        }

        self.create_bulk_notifications(&recipients, build).await
    }

    pub async fn notify_assignment_submission(
        &self,
        student_id: Uuid,
        student_name: &str,
        homework_id: Uuid,
        homework_title: &str,
    ) -> Result<Vec<Notification>> {
        self.fan_out_to_roles(&[ROLE_TEACHER, ROLE_ADMIN], "assignment submission", |r| {
            NewNotification::new(
                r,
                NotificationType::AssignmentSubmission,
                "New homework submission",
                format!("{} submitted \"{}\"", student_name, homework_title),
            )
            .sender(student_id)
            .related_entity(EntityType::Homework, homework_id)
            .action_url(format!("/homework/{}/submissions", homework_id))
        })
        .await
    }

    pub async fn notify_quiz_submission(
        &self,
        student_id: Uuid,
        student_name: &str,
        quiz_id: Uuid,
        quiz_title: &str,
    ) -> Result<Vec<Notification>> {
        self.fan_out_to_roles(&[ROLE_TEACHER, ROLE_ADMIN], "quiz submission", |r| {
            NewNotification::new(
                r,
                NotificationType::QuizSubmission,
                "New quiz submission",
                format!("{} completed the quiz \"{}\"", student_name, quiz_title),
            )
            .sender(student_id)
            .related_entity(EntityType::Quiz, quiz_id)
            .action_url(format!("/quizzes/{}/submissions", quiz_id))
        })
        .await
    }

    pub async fn notify_admin_announcement(
        &self,
        sender_id: Uuid,
        announcement_id: Uuid,
        title: &str,
        body: &str,
    ) -> Result<Vec<Notification>> {
        self.fan_out_to_roles(
            &[ROLE_STUDENT, ROLE_TEACHER, ROLE_PARENT],
            "announcement",
            |r| {
                NewNotification::new(r, NotificationType::AdminAnnouncement, title, body)
                    .sender(sender_id)
                    .priority(Priority::High)
                    .related_entity(EntityType::Announcement, announcement_id)
                    .action_url(format!("/announcements/{}", announcement_id))
            },
        )
        .await
    }

    pub async fn notify_new_enrollment(
        &self,
        application_id: Uuid,
        applicant_name: &str,
    ) -> Result<Vec<Notification>> {
        self.fan_out_to_roles(&[ROLE_ADMIN], "enrollment application", |r| {
            NewNotification::new(
                r,
                NotificationType::Enrollment,
                "New enrollment application",
                format!("{} applied for enrollment", applicant_name),
            )
            .related_entity(EntityType::Application, application_id)
            .action_url(format!("/applications/{}", application_id))
        })
        .await
    }

    pub async fn notify_grade_request(
        &self,
        student_id: Uuid,
        student_name: &str,
        homework_id: Uuid,
        homework_title: &str,
    ) -> Result<Vec<Notification>> {
        self.fan_out_to_roles(&[ROLE_TEACHER], "grade request", |r| {
            NewNotification::new(
                r,
                NotificationType::GradeRequest,
                "Grading requested",
                format!("{} asked for \"{}\" to be graded", student_name, homework_title),
            )
            .sender(student_id)
            .related_entity(EntityType::Homework, homework_id)
        })
        .await
    }

    /// Grade-posted notices are filed under `system`; the type enumeration has
    /// no dedicated value for them and the grade travels in metadata.
    pub async fn notify_grade_posted(
        &self,
        student_id: Uuid,
        homework_id: Uuid,
        homework_title: &str,
        grade: &str,
    ) -> Result<Notification> {
        self.create_notification(
            NewNotification::new(
                student_id,
                NotificationType::System,
                "Homework graded",
                format!("Your homework \"{}\" has been graded", homework_title),
            )
            .related_entity(EntityType::Homework, homework_id)
            .metadata(serde_json::json!({ "grade": grade }))
            .action_url(format!("/homework/{}", homework_id)),
        )
        .await
    }

    pub async fn notify_system_maintenance(
        &self,
        title: &str,
        message: &str,
    ) -> Result<Vec<Notification>> {
        let recipients = self.users.find_all_ids().await?;
        if recipients.is_empty() {
            tracing::warn!("No users to notify for system maintenance");
            return Ok(Vec::new());
        }

        self.create_bulk_notifications(&recipients, |r| {
            NewNotification::new(r, NotificationType::System, title, message)
                .priority(Priority::High)
        })
        .await
    }

    pub async fn notify_live_class_started(
        &self,
        class_id: Uuid,
        course_title: &str,
        meeting_url: &str,
    ) -> Result<Vec<Notification>> {
        let meeting_url = meeting_url.to_string();
        self.fan_out_to_roles(&[ROLE_STUDENT], "live class start", move |r| {
            NewNotification::new(
                r,
                NotificationType::LiveClassStarted,
                "Live class started",
                format!("\"{}\" is live now. Join in!", course_title),
            )
            .priority(Priority::High)
            .related_entity(EntityType::LiveClass, class_id)
            .action_url(meeting_url.clone())
        })
        .await
    }

    pub async fn notify_live_class_ended(
        &self,
        class_id: Uuid,
        course_title: &str,
    ) -> Result<Vec<Notification>> {
        self.fan_out_to_roles(&[ROLE_STUDENT], "live class end", |r| {
            NewNotification::new(
                r,
                NotificationType::LiveClassEnded,
                "Live class ended",
                format!("\"{}\" has ended", course_title),
            )
            .related_entity(EntityType::LiveClass, class_id)
        })
        .await
    }

    /// Delete notifications older than `days_old` days that have been read.
    /// Unread notifications are kept regardless of age; the recipient must
    /// have had the chance to see them.
    pub async fn cleanup_old_notifications(&self, days_old: i64) -> Result<u64> {
        let cutoff = cleanup_cutoff(days_old)?;
        let removed = self.repo.delete_read_older_than(cutoff).await?;

        if removed > 0 {
            tracing::info!("Cleaned up {} read notifications older than {} days", removed, days_old);
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_title() {
        let new = NewNotification::new(Uuid::new_v4(), NotificationType::System, "  ", "body");
        assert!(matches!(validate(&new), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_message() {
        let new = NewNotification::new(Uuid::new_v4(), NotificationType::System, "title", "");
        assert!(matches!(validate(&new), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_accepts_complete_fields() {
        let new = NewNotification::new(Uuid::new_v4(), NotificationType::System, "title", "body");
        assert!(validate(&new).is_ok());
    }

    #[test]
    fn test_cleanup_cutoff_is_in_the_past() {
        let cutoff = cleanup_cutoff(30).unwrap();
        let expected = Utc::now() - Duration::days(30);
        assert!((cutoff - expected).num_seconds().abs() < 5);
    }

    #[test]
    fn test_cleanup_cutoff_rejects_non_positive_days() {
        assert!(cleanup_cutoff(0).is_err());
        assert!(cleanup_cutoff(-7).is_err());
    }
}

//! Notification subsystem of the LMS backend.
//!
//! Business modules (submission, announcement, enrollment handlers) depend on
//! [`notification::NotificationService`] directly; recipients reach their own
//! notifications through the HTTP routes in [`routes`].

pub mod auth;
pub mod db;
pub mod error;
pub mod middleware;
pub mod notification;
pub mod routes;
pub mod state;
pub mod user;

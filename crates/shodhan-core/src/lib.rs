//! Shodhan Core Library
//!
//! Shared functionality for the Shodhan clinic client:
//! - Form validation and input sanitization
//! - Blog records and the backend model descriptor
//! - Booking flows, routing and the daily promo dialog
//! - Admin session and persisted state
//! - Configuration resolution and common error types

pub mod blog;
pub mod blog_model;
pub mod config;
pub mod content;
pub mod error;
pub mod promo;
pub mod route;
pub mod sanitize;
pub mod service_kind;
pub mod session;
pub mod store;
pub mod timer;
pub mod tracing_init;
pub mod validation;

pub use blog::{Blog, BlogForm, BlogPayload, Tags};
pub use config::{Config, LoginProbe};
pub use error::{Error, Result};
pub use route::{Navigator, Route};
pub use service_kind::{AppointmentForm, AppointmentRequest, ServiceKind};
pub use session::{AdminUser, Credential, SessionProvider};
pub use store::{JsonFileStore, MemoryStore, StateStore};
